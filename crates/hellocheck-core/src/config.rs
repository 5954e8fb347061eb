use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::deferred::DEFAULT_DELAY;
use crate::printer::OutputMode;

/// Optional settings, read only from an explicitly given TOML file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HelloConfig {
    /// Delay in milliseconds before the deferred "verified" line is logged.
    pub delay_ms: u64,
    /// Output mode marker passed to the printer.
    pub mode: OutputMode,
}

impl Default for HelloConfig {
    fn default() -> Self {
        Self {
            delay_ms: DEFAULT_DELAY.as_millis() as u64,
            mode: OutputMode::Standard,
        }
    }
}

impl HelloConfig {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

/// Load configuration from `path`. Missing keys take their defaults.
pub fn load_from_path(path: &Path) -> Result<HelloConfig> {
    let data =
        fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
    let cfg: HelloConfig =
        toml::from_str(&data).with_context(|| format!("parse config {}", path.display()))?;
    tracing::debug!("loaded config from {}: {:?}", path.display(), cfg);
    Ok(cfg)
}
