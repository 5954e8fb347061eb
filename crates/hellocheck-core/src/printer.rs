//! Checksum-verified greeting printer.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::runtime::Handle;

use crate::checksum::XorChecksum;
use crate::console::{Console, ConsoleLogger};
use crate::deferred;

pub const GREETING_LEN: usize = 13;

/// The greeting printed on success.
pub const GREETING: &[u8; GREETING_LEN] = b"Hello, World!";

/// Expected checksum of the greeting, built from its literal bytes.
pub const EXPECTED_CHECKSUM: XorChecksum = XorChecksum::of(&[
    b'H', b'e', b'l', b'l', b'o', b',', b' ', b'W', b'o', b'r', b'l', b'd', b'!',
]);

pub const PREPARED_MESSAGE: &str = "Preparation complete";
pub const MISMATCH_MESSAGE: &str = "Hash mismatch detected";
pub const VERIFIED_MESSAGE: &str = "Message verified and printed";

/// Output mode marker. Stored on the printer; does not change behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    #[default]
    Standard,
    Advanced,
}

#[derive(Debug, Error)]
pub enum PrintError {
    /// The greeting no longer matches its expected checksum.
    #[error("Hash Mismatch Exception!")]
    ChecksumMismatch {
        expected: XorChecksum,
        actual: XorChecksum,
    },
}

/// Prints the greeting after verifying its checksum.
///
/// Lifecycle: `prepare()` then `print()`; `print()` either writes the
/// greeting (printed) or returns `PrintError::ChecksumMismatch` (faulted).
#[derive(Debug)]
pub struct GreetingPrinter {
    mode: OutputMode,
    source: [u8; GREETING_LEN],
    delay: Duration,
    logger: Arc<ConsoleLogger>,
    console: Console,
    runtime: Handle,
}

impl GreetingPrinter {
    /// Build a printer; deferred log lines are spawned on `runtime`.
    pub fn new(logger: Arc<ConsoleLogger>, console: Console, runtime: Handle) -> Self {
        logger.log(&format!("Object type: {}", std::any::type_name::<Self>()));
        Self {
            mode: OutputMode::default(),
            source: *GREETING,
            delay: deferred::DEFAULT_DELAY,
            logger,
            console,
            runtime,
        }
    }

    pub fn with_mode(mut self, mode: OutputMode) -> Self {
        self.mode = mode;
        self
    }

    /// Delay before the "verified" line is logged.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Corrupt the stored greeting: flip bit `bit % 8` of byte `(bit / 8) % len`.
    pub fn with_flipped_bit(mut self, bit: usize) -> Self {
        let byte = (bit / 8) % GREETING_LEN;
        self.source[byte] ^= 1 << (bit % 8);
        tracing::warn!(byte, bit = bit % 8, "greeting corrupted on request");
        self
    }

    pub fn mode(&self) -> OutputMode {
        self.mode
    }

    pub fn prepare(&self) {
        self.logger.log(PREPARED_MESSAGE);
    }

    /// Verify the greeting and print it, then schedule the deferred "verified" line.
    pub fn print(&self) -> Result<(), PrintError> {
        let message = self.source.to_vec();

        let mut actual = XorChecksum::new();
        for &byte in &message {
            actual.accumulate(byte);
        }
        tracing::debug!(%actual, expected = %EXPECTED_CHECKSUM, "greeting checksum");

        if actual != EXPECTED_CHECKSUM {
            self.logger.log(MISMATCH_MESSAGE);
            return Err(PrintError::ChecksumMismatch {
                expected: EXPECTED_CHECKSUM,
                actual,
            });
        }

        self.console.write_line(&[message.as_slice()]);
        deferred::schedule_log(
            &self.runtime,
            Arc::clone(&self.logger),
            VERIFIED_MESSAGE,
            self.delay,
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::Captured;

    fn printer() -> (GreetingPrinter, Captured) {
        let (console, captured) = Console::capture();
        let logger = Arc::new(ConsoleLogger::new(console.clone()));
        let printer = GreetingPrinter::new(logger, console, Handle::current())
            .with_delay(Duration::from_secs(30));
        (printer, captured)
    }

    #[test]
    fn literal_checksum_matches_greeting_string() {
        assert_eq!(EXPECTED_CHECKSUM, XorChecksum::of("Hello, World!".as_bytes()));
        assert_eq!(EXPECTED_CHECKSUM, XorChecksum::of(GREETING));
    }

    #[test]
    fn every_single_bit_flip_changes_the_checksum() {
        for byte in 0..GREETING_LEN {
            for bit in 0..8 {
                let mut corrupted = *GREETING;
                corrupted[byte] ^= 1 << bit;
                assert_ne!(
                    XorChecksum::of(&corrupted),
                    EXPECTED_CHECKSUM,
                    "flip of byte {byte} bit {bit} went undetected"
                );
            }
        }
    }

    #[tokio::test]
    async fn construction_logs_object_type() {
        let (_printer, captured) = printer();
        let lines = captured.lines();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("[LOG]: Object type: "));
        assert!(lines[0].ends_with("GreetingPrinter"));
    }

    #[tokio::test]
    async fn prepare_logs_completion() {
        let (printer, captured) = printer();
        printer.prepare();
        assert_eq!(captured.lines()[1], "[LOG]: Preparation complete");
    }

    #[tokio::test]
    async fn print_writes_greeting() {
        let (printer, captured) = printer();
        printer.print().unwrap();
        assert_eq!(captured.lines()[1..], ["Hello, World!".to_string()]);
    }

    #[tokio::test]
    async fn corrupted_greeting_is_rejected() {
        let (printer, captured) = printer();
        let printer = printer.with_flipped_bit(0);

        let err = printer.print().unwrap_err();
        assert_eq!(err.to_string(), "Hash Mismatch Exception!");
        let PrintError::ChecksumMismatch { expected, actual } = err;
        assert_eq!(expected, EXPECTED_CHECKSUM);
        assert_ne!(actual, expected);

        let lines = captured.lines();
        assert_eq!(lines[1..], ["[LOG]: Hash mismatch detected".to_string()]);
        assert!(!captured.contents().contains("Hello, World!"));
    }

    #[tokio::test]
    async fn flip_bit_wraps_around_message_length() {
        let (printer, _captured) = printer();
        let printer = printer.with_flipped_bit(GREETING_LEN * 8 + 3);
        assert_eq!(printer.source[0], GREETING[0] ^ 0b1000);
        assert_eq!(printer.source[1..], GREETING[1..]);
    }

    #[tokio::test]
    async fn mode_is_stored() {
        let (printer, _captured) = printer();
        assert_eq!(printer.mode(), OutputMode::Standard);
        assert_eq!(printer.with_mode(OutputMode::Advanced).mode(), OutputMode::Advanced);
    }
}
