//! Console output: a shared line sink and the `[LOG]:` logger on top of it.
//!
//! Every line goes out under the sink's mutex, so lines from different
//! threads never interleave. Writes are best-effort; I/O errors are dropped.

use std::fmt;
use std::io::{self, Write};
use std::sync::{Arc, Mutex, MutexGuard};

/// Prefix of every console log line.
pub const LOG_PREFIX: &str = "[LOG]: ";

type Sink = Box<dyn Write + Send>;

/// Cloneable handle to a single line-oriented output sink.
#[derive(Clone)]
pub struct Console {
    sink: Arc<Mutex<Sink>>,
}

impl Console {
    pub fn stdout() -> Self {
        Self::from_writer(io::stdout())
    }

    pub fn from_writer<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            sink: Arc::new(Mutex::new(Box::new(writer))),
        }
    }

    /// Console backed by an in-memory buffer; the returned `Captured` reads it back.
    pub fn capture() -> (Self, Captured) {
        let captured = Captured::default();
        (Self::from_writer(captured.clone()), captured)
    }

    /// Write the concatenation of `parts` plus a newline as one unit.
    pub fn write_line(&self, parts: &[&[u8]]) {
        let mut sink = self.lock();
        if let Err(e) = write_parts(&mut *sink, parts) {
            tracing::debug!(error = %e, "console write failed");
        }
    }

    // A panic while holding the lock must not silence later writers.
    fn lock(&self) -> MutexGuard<'_, Sink> {
        self.sink.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl fmt::Debug for Console {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Console").finish_non_exhaustive()
    }
}

fn write_parts(w: &mut dyn Write, parts: &[&[u8]]) -> io::Result<()> {
    for part in parts {
        w.write_all(part)?;
    }
    w.write_all(b"\n")?;
    w.flush()
}

/// In-memory sink filled by a `Console::capture()` console.
#[derive(Debug, Clone, Default)]
pub struct Captured(Arc<Mutex<Vec<u8>>>);

impl Captured {
    pub fn contents(&self) -> String {
        let buf = self.0.lock().unwrap_or_else(|p| p.into_inner());
        String::from_utf8_lossy(&buf).into_owned()
    }

    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_owned).collect()
    }
}

impl Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// The program's log sink: `[LOG]: <message>` lines on the console.
///
/// Constructed once by the driver and shared through `Arc`; it is neither
/// `Clone` nor global.
#[derive(Debug)]
pub struct ConsoleLogger {
    console: Console,
}

impl ConsoleLogger {
    pub fn new(console: Console) -> Self {
        Self { console }
    }

    pub fn log(&self, message: &str) {
        self.console
            .write_line(&[LOG_PREFIX.as_bytes(), message.as_bytes()]);
    }
}
