//! Pipeline stages that add properties to events.
//!
//! Enrichers only ever use [`LogEvent::add_property_if_absent`], so values
//! bound from the template or scoped onto the logger always win over
//! anything an enricher supplies.
//!
//! [`LogEvent::add_property_if_absent`]: crate::LogEvent::add_property_if_absent

mod caller;
mod context;
mod correlation;
mod env;
mod machine;
mod otel;
mod process;
mod source;
mod timestamp;

pub use caller::CallerEnricher;
pub use context::{CarrierEnricher, ContextStackEnricher};
pub use correlation::CorrelationEnricher;
pub use env::EnvironmentEnricher;
pub use machine::MachineNameEnricher;
pub use otel::OtelEnricher;
pub use process::ProcessEnricher;
pub use source::SourceContextEnricher;
pub use timestamp::TimestampEnricher;

use crate::event::LogEvent;

/// A pipeline stage that adds properties to an event.
///
/// Enrichers must not panic; the pipeline does not catch unwinds.
pub trait Enricher: Send + Sync {
    /// Adds properties to `event`.
    fn enrich(&self, event: &mut LogEvent);
}
