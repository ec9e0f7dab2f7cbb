//! Time-window sampling: at most one event per window.

use super::{SamplingFilter, SamplingStats, StatCounters, monotonic_nanos};
use crate::event::LogEvent;
use crate::filter::Filter;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Passes an event when at least `window` has elapsed since the last
/// accepted one. The last-accepted timestamp advances by compare-and-swap,
/// so under contention exactly one caller wins each window.
#[derive(Debug)]
pub struct DurationSampler {
    window_nanos: u64,
    // Nanos-since-start of the last accepted event, offset by one so zero
    // means "nothing accepted yet".
    last: AtomicU64,
    stats: StatCounters,
}

impl DurationSampler {
    /// A sampler accepting at most one event per `window`.
    #[must_use]
    pub fn new(window: Duration) -> Self {
        Self {
            window_nanos: u64::try_from(window.as_nanos()).unwrap_or(u64::MAX),
            last: AtomicU64::new(0),
            stats: StatCounters::new(),
        }
    }
}

impl Filter for DurationSampler {
    fn is_enabled(&self, _event: &LogEvent) -> bool {
        let now = monotonic_nanos() + 1;
        let last = self.last.load(Ordering::Relaxed);
        let due = last == 0 || now.saturating_sub(last) >= self.window_nanos;
        let accepted = due
            && self
                .last
                .compare_exchange(last, now, Ordering::Relaxed, Ordering::Relaxed)
                .is_ok();
        self.stats.record(accepted)
    }
}

impl SamplingFilter for DurationSampler {
    fn stats(&self) -> SamplingStats {
        self.stats.snapshot()
    }

    fn reset(&self) {
        self.last.store(0, Ordering::Relaxed);
        self.stats.reset();
    }

    fn describe(&self) -> String {
        format!("once per {:?}", Duration::from_nanos(self.window_nanos))
    }
}
