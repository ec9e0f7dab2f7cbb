//! Ensures every event carries a `CorrelationId`.

use super::Enricher;
use crate::event::LogEvent;
use crate::value::Value;

/// Either stamps a fixed id (one unit of work, one enricher) or mints a
/// fresh ULID per event when none was provided upstream.
#[derive(Debug, Clone, Default)]
pub struct CorrelationEnricher {
    fixed: Option<String>,
}

impl CorrelationEnricher {
    /// Mints a fresh ULID for events that lack a correlation id.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stamps the given id instead of minting one.
    #[must_use]
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            fixed: Some(id.into()),
        }
    }
}

impl Enricher for CorrelationEnricher {
    fn enrich(&self, event: &mut LogEvent) {
        if event.property("CorrelationId").is_some() {
            return;
        }
        let id = self
            .fixed
            .clone()
            .unwrap_or_else(|| ulid::Ulid::new().to_string());
        event.add_property_if_absent("CorrelationId", Value::Str(id));
    }
}
