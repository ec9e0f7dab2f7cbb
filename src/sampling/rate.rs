//! Proportional sampling by deterministic stride.

use super::{SamplingFilter, SamplingStats, StatCounters};
use crate::event::LogEvent;
use crate::filter::Filter;
use crate::selflog;
use std::sync::atomic::{AtomicU64, Ordering};

/// Passes approximately `rate` of the stream, spread evenly: the decision is
/// whether the running count crosses an integer multiple of `1/rate`, so no
/// randomness is involved and tests are exact.
#[derive(Debug)]
pub struct RateSampler {
    rate: f64,
    count: AtomicU64,
    stats: StatCounters,
}

impl RateSampler {
    /// A sampler passing the given proportion, clamped to `[0, 1]`. A
    /// non-positive rate passes nothing and is reported through selflog.
    #[must_use]
    pub fn proportion(rate: f64) -> Self {
        if rate <= 0.0 && selflog::is_enabled() {
            selflog::report("sampling", "sample_rate(<=0) passes no events");
        }
        Self {
            rate: rate.clamp(0.0, 1.0),
            count: AtomicU64::new(0),
            stats: StatCounters::new(),
        }
    }
}

impl Filter for RateSampler {
    fn is_enabled(&self, _event: &LogEvent) -> bool {
        let count = self.count.fetch_add(1, Ordering::Relaxed) + 1;
        let accepted = (count as f64 * self.rate).floor() > ((count - 1) as f64 * self.rate).floor();
        self.stats.record(accepted)
    }
}

impl SamplingFilter for RateSampler {
    fn stats(&self) -> SamplingStats {
        self.stats.snapshot()
    }

    fn reset(&self) {
        self.count.store(0, Ordering::Relaxed);
        self.stats.reset();
    }

    fn describe(&self) -> String {
        format!("rate {:.4}", self.rate)
    }
}
