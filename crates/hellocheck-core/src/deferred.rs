//! Fire-and-forget delayed log lines.
//!
//! A scheduled line runs on the tokio runtime as a detached task. Nobody
//! awaits it: if the runtime shuts down first, the line is never written.

use std::sync::Arc;
use std::time::Duration;

use tokio::runtime::Handle;

use crate::console::ConsoleLogger;

/// Delay used when the config does not override it.
pub const DEFAULT_DELAY: Duration = Duration::from_millis(69);

/// Log `message` once, `delay` after scheduling, on the runtime behind `runtime`.
///
/// The task yields before doing anything, then sleeps, then logs. The
/// `JoinHandle` is dropped here, so the caller cannot observe or cancel it.
pub fn schedule_log(
    runtime: &Handle,
    logger: Arc<ConsoleLogger>,
    message: impl Into<String>,
    delay: Duration,
) {
    let message = message.into();
    tracing::debug!(delay_ms = delay.as_millis() as u64, %message, "deferred log scheduled");
    let _detached = runtime.spawn(async move {
        tokio::task::yield_now().await;
        tokio::time::sleep(delay).await;
        logger.log(&message);
    });
}
