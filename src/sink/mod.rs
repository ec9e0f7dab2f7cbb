//! Terminal pipeline stages that emit events to an output.
//!
//! Transports (files, rolling files, Seq, Elasticsearch) live outside the
//! core and implement [`Sink`]; the crate ships a console sink and an
//! in-memory sink for tests.

mod console;
mod memory;

pub use console::ConsoleSink;
pub use memory::MemorySink;

use crate::error::Error;
use crate::event::LogEvent;
use crate::level::Level;
use chrono::{DateTime, Utc};

/// A terminal pipeline stage.
///
/// Emit failures never reach the logging caller; the pipeline reports them
/// through selflog, identified by [`name`](Self::name).
pub trait Sink: Send + Sync {
    /// Writes one event.
    ///
    /// # Errors
    /// Returns an error on output failure; the pipeline swallows it.
    fn emit(&self, event: &LogEvent) -> Result<(), Error>;

    /// Identifies this sink in selflog diagnostics.
    fn name(&self) -> &'static str {
        "sink"
    }

    /// Fast-path emission for argument-free literal messages.
    ///
    /// Returns `false` when the sink has no simple form, in which case the
    /// caller synthesizes a minimal event and uses [`emit`](Self::emit).
    fn emit_simple(&self, _timestamp: DateTime<Utc>, _level: Level, _message: &str) -> bool {
        false
    }

    /// Releases resources; called once by `Logger::close`.
    ///
    /// # Errors
    /// Returns an error when flushing or closing the output fails.
    fn close(&self) -> Result<(), Error> {
        Ok(())
    }
}
