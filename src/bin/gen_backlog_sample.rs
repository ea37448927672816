fn main() {
    backlogtools::logging::init();
    if let Err(err) = backlogtools::sample::run(std::env::args_os()) {
        eprintln!("Error writing the sample workbook: {err:#}");
        std::process::exit(1);
    }
}
