//! Top-level sequence: build the printer, run it on one worker unit, join,
//! log completion. Also the last-resort reporting for anything that escapes.

use std::any::Any;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use thiserror::Error;
use tokio::runtime::Handle;

use crate::config::HelloConfig;
use crate::console::{Console, ConsoleLogger};
use crate::printer::{GreetingPrinter, OutputMode};
use crate::worker::{print_in_worker, WorkerOutcome};

pub const COMPLETED_MESSAGE: &str = "Main function completed successfully.";

/// Per-run settings resolved from config and CLI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    pub delay: Duration,
    pub mode: OutputMode,
    /// Flip this bit of the greeting before verification (fault injection).
    pub flip_bit: Option<usize>,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self::from(&HelloConfig::default())
    }
}

impl From<&HelloConfig> for RunOptions {
    fn from(cfg: &HelloConfig) -> Self {
        Self {
            delay: cfg.delay(),
            mode: cfg.mode,
            flip_bit: None,
        }
    }
}

/// Failure of the worker unit itself (not a print fault, which it absorbs).
#[derive(Debug, Error)]
pub enum WorkerError {
    #[error("{0}")]
    Panicked(String),
    #[error("worker panicked with a non-string payload")]
    UnknownPanic,
    #[error("worker was cancelled")]
    Cancelled,
}

impl WorkerError {
    fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        match payload.downcast::<String>() {
            Ok(msg) => WorkerError::Panicked(*msg),
            Err(payload) => match payload.downcast::<&'static str>() {
                Ok(msg) => WorkerError::Panicked((*msg).to_string()),
                Err(_) => WorkerError::UnknownPanic,
            },
        }
    }
}

impl From<tokio::task::JoinError> for WorkerError {
    fn from(err: tokio::task::JoinError) -> Self {
        match err.try_into_panic() {
            Ok(payload) => WorkerError::from_panic(payload),
            Err(_) => WorkerError::Cancelled,
        }
    }
}

/// Run the printer on a single blocking worker and wait for it.
///
/// The deferred "verified" line is not waited for; it may land after the
/// completion line or never, if the runtime shuts down first.
pub async fn run(opts: &RunOptions, console: Console, logger: Arc<ConsoleLogger>) -> Result<WorkerOutcome> {
    let mut printer = GreetingPrinter::new(Arc::clone(&logger), console, Handle::current())
        .with_mode(opts.mode)
        .with_delay(opts.delay);
    if let Some(bit) = opts.flip_bit {
        printer = printer.with_flipped_bit(bit);
    }

    let worker_logger = Arc::clone(&logger);
    let outcome = tokio::task::spawn_blocking(move || print_in_worker(&printer, &worker_logger))
        .await
        .map_err(WorkerError::from)?;
    tracing::info!(?outcome, "worker finished");

    logger.log(COMPLETED_MESSAGE);
    Ok(outcome)
}

/// Log an error that escaped `run` (or anything before it).
pub fn report_unhandled(logger: &ConsoleLogger, err: &anyhow::Error) {
    tracing::error!("unhandled error: {:#}", err);
    match err.downcast_ref::<WorkerError>() {
        Some(WorkerError::UnknownPanic) => logger.log("Unknown exception caught"),
        _ => logger.log(&format!("Unhandled exception: {err:#}")),
    }
}
