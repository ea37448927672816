fn main() {
    backlogtools::logging::init();
    if let Err(err) = backlogtools::inspect::run(std::env::args_os()) {
        eprintln!("Error analyzing the file: {err:#}");
        eprintln!("{err:?}");
        std::process::exit(1);
    }
}
