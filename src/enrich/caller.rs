//! Materializes the call-site location as a `Caller` property.

use super::Enricher;
use crate::event::LogEvent;
use crate::value::Value;

/// The logger's entry points are `#[track_caller]` and record the call-site
/// location on the event; this enricher turns it into `Caller` =
/// `"src/handler.rs:42"`. Without the enricher the location stays a
/// zero-cost static reference and never reaches a sink.
#[derive(Debug, Default, Clone, Copy)]
pub struct CallerEnricher;

impl Enricher for CallerEnricher {
    fn enrich(&self, event: &mut LogEvent) {
        if let Some(location) = event.caller {
            event.add_property_if_absent(
                "Caller",
                Value::Str(format!("{}:{}", location.file(), location.line())),
            );
        }
    }
}
