//! CLI for hellocheck. With no arguments it runs the default greeting check.

use anyhow::Result;
use clap::Parser;
use hellocheck_core::config::{self, HelloConfig};
use hellocheck_core::console::{Console, ConsoleLogger};
use hellocheck_core::driver::{self, RunOptions};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

/// Print a checksum-verified greeting from a worker thread.
#[derive(Debug, Parser)]
#[command(name = "hellocheck")]
#[command(about = "Print a checksum-verified greeting", long_about = None)]
pub struct Cli {
    /// Load settings from this TOML file (nothing is read otherwise).
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Delay before the deferred "verified" log line, in milliseconds.
    #[arg(long, value_name = "MS")]
    pub delay_ms: Option<u64>,

    /// Corrupt the greeting by flipping bit N before it is verified.
    #[arg(long, value_name = "N")]
    pub flip_bit: Option<usize>,
}

impl Cli {
    pub async fn run_from_args() -> ExitCode {
        let cli = Cli::parse();

        let console = Console::stdout();
        let logger = Arc::new(ConsoleLogger::new(console.clone()));

        match cli.execute(console, Arc::clone(&logger)).await {
            Ok(()) => ExitCode::SUCCESS,
            Err(err) => {
                driver::report_unhandled(&logger, &err);
                ExitCode::FAILURE
            }
        }
    }

    async fn execute(&self, console: Console, logger: Arc<ConsoleLogger>) -> Result<()> {
        let cfg = match &self.config {
            Some(path) => config::load_from_path(path)?,
            None => HelloConfig::default(),
        };
        let opts = self.run_options(&cfg);
        tracing::debug!("run options: {:?}", opts);

        let outcome = driver::run(&opts, console, logger).await?;
        tracing::info!(?outcome, "hellocheck finished");
        Ok(())
    }

    /// CLI flags override the config file.
    fn run_options(&self, cfg: &HelloConfig) -> RunOptions {
        let mut opts = RunOptions::from(cfg);
        if let Some(ms) = self.delay_ms {
            opts.delay = Duration::from_millis(ms);
        }
        opts.flip_bit = self.flip_bit;
        opts
    }
}
