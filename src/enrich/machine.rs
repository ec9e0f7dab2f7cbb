//! Adds the host name as `MachineName`.

use super::Enricher;
use crate::event::LogEvent;
use crate::value::Value;

/// The host name is resolved once at construction; the syscall does not
/// belong on the logging hot path.
#[derive(Debug, Clone)]
pub struct MachineNameEnricher {
    name: String,
}

impl MachineNameEnricher {
    /// Resolves the host name via `gethostname`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            name: gethostname::gethostname().to_string_lossy().into_owned(),
        }
    }
}

impl Default for MachineNameEnricher {
    fn default() -> Self {
        Self::new()
    }
}

impl Enricher for MachineNameEnricher {
    fn enrich(&self, event: &mut LogEvent) {
        event.add_property_if_absent("MachineName", Value::Str(self.name.clone()));
    }
}
