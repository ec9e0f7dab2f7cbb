//! The two enrichers layered by `Logger::with_context`: one materializes the
//! carrier's property stack, the other its well-known identity values.
//!
//! The stack enricher is installed ahead of the carrier enricher, and both
//! add-if-absent, which yields the documented precedence: event-literal
//! beats scoped beats stacked beats carrier.

use super::Enricher;
use crate::context::Context;
use crate::event::LogEvent;
use crate::value::Value;

/// Copies the carrier's property stack onto the event.
///
/// The stack is walked newest-first and shadowed entries are skipped by the
/// add-if-absent write, so inner scopes win inside the stack too.
#[derive(Debug, Clone)]
pub struct ContextStackEnricher {
    ctx: Context,
}

impl ContextStackEnricher {
    /// An enricher bound to the given carrier.
    #[must_use]
    pub fn new(ctx: Context) -> Self {
        Self {
            ctx,
        }
    }
}

impl Enricher for ContextStackEnricher {
    fn enrich(&self, event: &mut LogEvent) {
        self.ctx.for_each_property(|key, value| {
            event.add_property_if_absent(key, value.clone());
        });
    }
}

/// Copies the carrier's well-known ids onto the event.
#[derive(Debug, Clone)]
pub struct CarrierEnricher {
    ctx: Context,
}

impl CarrierEnricher {
    /// An enricher bound to the given carrier.
    #[must_use]
    pub fn new(ctx: Context) -> Self {
        Self {
            ctx,
        }
    }
}

impl Enricher for CarrierEnricher {
    fn enrich(&self, event: &mut LogEvent) {
        let pairs = [
            ("RequestId", self.ctx.request_id()),
            ("CorrelationId", self.ctx.correlation_id()),
            ("UserId", self.ctx.user_id()),
            ("SessionId", self.ctx.session_id()),
            ("TraceId", self.ctx.trace_id()),
            ("SpanId", self.ctx.span_id()),
        ];
        for (name, value) in pairs {
            if let Some(v) = value {
                event.add_property_if_absent(name, Value::Str(v.to_string()));
            }
        }
    }
}
