//! In-memory sink for tests and assertions.

use super::Sink;
use crate::error::Error;
use crate::event::LogEvent;
use std::sync::{Arc, Mutex};

/// Retains every emitted event. Share it with a logger via `Arc` and read
/// the captured events back after logging.
#[derive(Debug, Default)]
pub struct MemorySink {
    events: Mutex<Vec<LogEvent>>,
}

impl MemorySink {
    /// An empty shared sink.
    #[must_use]
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Snapshot of the captured events.
    #[must_use]
    pub fn events(&self) -> Vec<LogEvent> {
        self.events.lock().expect("memory sink poisoned").clone()
    }

    /// Number of captured events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.lock().expect("memory sink poisoned").len()
    }

    /// Whether nothing has been captured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Discards captured events.
    pub fn clear(&self) {
        self.events.lock().expect("memory sink poisoned").clear();
    }
}

impl Sink for MemorySink {
    fn emit(&self, event: &LogEvent) -> Result<(), Error> {
        self.events
            .lock()
            .expect("memory sink poisoned")
            .push(event.clone());
        Ok(())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
