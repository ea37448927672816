use tracing_subscriber::EnvFilter;

/// Logs go to stderr; stdout carries only the report.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| "backlogtools=warn".into());
    // may already be initialised in tests
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
