//! Default `SourceContext` for loggers that never called `for_type`.

use super::Enricher;
use crate::event::LogEvent;
use crate::value::Value;

/// Stamps a fixed component name; a `SourceContext` set by `for_type` or
/// `for_source_context` arrives as a scoped property and wins.
#[derive(Debug, Clone)]
pub struct SourceContextEnricher {
    name: String,
}

impl SourceContextEnricher {
    /// An enricher stamping the given component name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
        }
    }
}

impl Enricher for SourceContextEnricher {
    fn enrich(&self, event: &mut LogEvent) {
        event.add_property_if_absent("SourceContext", Value::Str(self.name.clone()));
    }
}
