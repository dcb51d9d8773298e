use clap::Parser;
use socextract::{Cli, SocExtract};
use std::process;

fn main() {
    setup_logging();
    let exit_code = run();
    process::exit(exit_code);
}

fn run() -> i32 {
    // Usage errors exit through clap
    let cli = Cli::parse();
    let app = SocExtract::from_cli(&cli);

    match app.run() {
        Ok(report) => {
            app.output_formatter().print_extraction_report(&report);
            0
        }
        Err(e) => {
            app.handle_error(&e);
            e.exit_code()
        }
    }
}

fn setup_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .init();
}
