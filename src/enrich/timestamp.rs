//! Backfills the capture timestamp on events constructed without one.

use super::Enricher;
use crate::event::LogEvent;
use chrono::{DateTime, Utc};

/// Events built through the logger are stamped at creation; this enricher
/// covers events synthesized elsewhere (tests, adapters) whose timestamp is
/// still the epoch zero.
#[derive(Debug, Default, Clone, Copy)]
pub struct TimestampEnricher;

impl Enricher for TimestampEnricher {
    fn enrich(&self, event: &mut LogEvent) {
        if event.timestamp == DateTime::<Utc>::UNIX_EPOCH {
            event.timestamp = Utc::now();
        }
    }
}
