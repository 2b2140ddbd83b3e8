//! `framemark` binary entry point.

use framemark_cli::{CliError, USAGE};
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::init();

    let result = framemark_cli::parse_args(std::env::args().skip(1)).and_then(framemark_cli::run);
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            if matches!(e, CliError::Usage(_)) {
                eprintln!("{USAGE}");
            }
            ExitCode::FAILURE
        }
    }
}
