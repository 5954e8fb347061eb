//! Diagnostics init: `tracing` to stderr.
//!
//! Stdout carries the program's own output (greeting and `[LOG]:` lines),
//! so diagnostics always go to stderr and nothing is written to disk.

use tracing_subscriber::EnvFilter;

/// Default filter when `RUST_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "warn";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Initialize logging to stderr. Call once, before anything logs.
pub fn init_logging_stderr() {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    tracing::debug!("hellocheck diagnostics initialized");
}
