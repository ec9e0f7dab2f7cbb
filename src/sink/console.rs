//! Line-oriented console sink.

use super::Sink;
use crate::error::Error;
use crate::event::LogEvent;
use crate::level::Level;
use chrono::{DateTime, SecondsFormat, Utc};
use std::io::Write;
use std::sync::Mutex;

/// Writes one line per event to stderr (default) or stdout.
///
/// Implements the simple-emission capability, so argument-free literal
/// messages skip event construction entirely.
#[derive(Debug)]
pub struct ConsoleSink {
    // Serializes whole lines; stderr/stdout handles interleave per write
    // otherwise.
    lock: Mutex<()>,
    use_stdout: bool,
}

impl ConsoleSink {
    /// A sink writing to stderr.
    #[must_use]
    pub fn new() -> Self {
        Self {
            lock: Mutex::new(()),
            use_stdout: false,
        }
    }

    /// A sink writing to stdout.
    #[must_use]
    pub fn stdout() -> Self {
        Self {
            lock: Mutex::new(()),
            use_stdout: true,
        }
    }

    fn write_line(&self, timestamp: DateTime<Utc>, level: Level, message: &str) -> std::io::Result<()> {
        let line = format!(
            "{} [{}] {message}",
            timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
            level.short()
        );
        let _guard = self.lock.lock().expect("console sink poisoned");
        if self.use_stdout {
            writeln!(std::io::stdout(), "{line}")
        } else {
            writeln!(std::io::stderr(), "{line}")
        }
    }
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::new()
    }
}

impl Sink for ConsoleSink {
    fn emit(&self, event: &LogEvent) -> Result<(), Error> {
        let mut message = event.render_message();
        if let Some(err) = &event.exception {
            message.push_str(" | error: ");
            message.push_str(&err.to_string());
        }
        self.write_line(event.timestamp, event.level, &message)?;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "console"
    }

    fn emit_simple(&self, timestamp: DateTime<Utc>, level: Level, message: &str) -> bool {
        self.write_line(timestamp, level, message).is_ok()
    }
}
