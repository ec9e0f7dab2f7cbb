//! OpenTelemetry-convention trace correlation.

use super::Enricher;
use crate::context::Context;
use crate::event::LogEvent;
use crate::value::Value;

/// Emits the carrier's trace identity under the OTEL attribute names
/// `trace_id` and `span_id`, for backends that join logs to traces by those
/// exact keys. The carrier enricher's `TraceId`/`SpanId` remain the
/// human-facing spellings.
#[derive(Debug, Clone)]
pub struct OtelEnricher {
    ctx: Context,
}

impl OtelEnricher {
    /// An enricher bound to the given carrier.
    #[must_use]
    pub fn new(ctx: Context) -> Self {
        Self {
            ctx,
        }
    }
}

impl Enricher for OtelEnricher {
    fn enrich(&self, event: &mut LogEvent) {
        if let Some(trace_id) = self.ctx.trace_id() {
            event.add_property_if_absent("trace_id", Value::Str(trace_id.to_string()));
        }
        if let Some(span_id) = self.ctx.span_id() {
            event.add_property_if_absent("span_id", Value::Str(span_id.to_string()));
        }
    }
}
