//! Adds `ProcessId` and, when resolvable, `ProcessName`.

use super::Enricher;
use crate::event::LogEvent;
use crate::value::Value;

/// Process identity is constant for the process lifetime, so both values are
/// resolved once at construction.
#[derive(Debug, Clone)]
pub struct ProcessEnricher {
    pid: u32,
    name: Option<String>,
}

impl ProcessEnricher {
    /// Captures the current process id and executable stem.
    #[must_use]
    pub fn new() -> Self {
        let name = std::env::current_exe()
            .ok()
            .and_then(|p| p.file_stem().map(|s| s.to_string_lossy().into_owned()));
        Self {
            pid: std::process::id(),
            name,
        }
    }
}

impl Default for ProcessEnricher {
    fn default() -> Self {
        Self::new()
    }
}

impl Enricher for ProcessEnricher {
    fn enrich(&self, event: &mut LogEvent) {
        event.add_property_if_absent("ProcessId", Value::Uint(u64::from(self.pid)));
        if let Some(name) = &self.name {
            event.add_property_if_absent("ProcessName", Value::Str(name.clone()));
        }
    }
}
