use hellocheck_core::logging;
use std::process::ExitCode;

mod cli;

use crate::cli::Cli;

#[tokio::main]
async fn main() -> ExitCode {
    // Diagnostics go to stderr; stdout is reserved for the program's output.
    logging::init_logging_stderr();

    Cli::run_from_args().await
}
