//! Body of the worker unit: run the printer lifecycle and absorb its fault.

use crate::console::ConsoleLogger;
use crate::printer::GreetingPrinter;

/// Terminal state of the printer lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerOutcome {
    /// The greeting was verified and printed.
    Printed,
    /// The checksum did not match; the failure was logged.
    Faulted,
}

/// Runs `prepare()` then `print()`. A print error is logged as
/// `Exception caught in thread: <error>` and never escapes.
pub fn print_in_worker(printer: &GreetingPrinter, logger: &ConsoleLogger) -> WorkerOutcome {
    printer.prepare();
    match printer.print() {
        Ok(()) => WorkerOutcome::Printed,
        Err(e) => {
            tracing::warn!(error = ?e, "print failed in worker");
            logger.log(&format!("Exception caught in thread: {e}"));
            WorkerOutcome::Faulted
        }
    }
}
