//! Predicate-gated every-Nth sampling.

use super::{SamplingFilter, SamplingStats, StatCounters};
use crate::event::LogEvent;
use crate::filter::Filter;
use crate::selflog;
use std::sync::atomic::{AtomicU64, Ordering};

/// While the predicate holds, behaves like every-Nth sampling; while it does
/// not, rejects without advancing the counter. Typical use: only sample the
/// noisy path when the system is under pressure.
pub struct ConditionalSampler {
    predicate: Box<dyn Fn() -> bool + Send + Sync>,
    n: u64,
    count: AtomicU64,
    stats: StatCounters,
}

impl ConditionalSampler {
    /// A sampler counting only while `predicate()` is true. An `n` of zero
    /// is corrected to 1 and reported through selflog.
    #[must_use]
    pub fn new(predicate: impl Fn() -> bool + Send + Sync + 'static, n: u64) -> Self {
        if n == 0 && selflog::is_enabled() {
            selflog::report("sampling", "sample_when(_, 0) corrected to 1");
        }
        Self {
            predicate: Box::new(predicate),
            n: n.max(1),
            count: AtomicU64::new(0),
            stats: StatCounters::new(),
        }
    }
}

impl Filter for ConditionalSampler {
    fn is_enabled(&self, _event: &LogEvent) -> bool {
        if !(self.predicate)() {
            return self.stats.record(false);
        }
        let count = self.count.fetch_add(1, Ordering::Relaxed) + 1;
        self.stats.record((count - 1) % self.n == 0)
    }
}

impl SamplingFilter for ConditionalSampler {
    fn stats(&self) -> SamplingStats {
        self.stats.snapshot()
    }

    fn reset(&self) {
        self.count.store(0, Ordering::Relaxed);
        self.stats.reset();
    }

    fn describe(&self) -> String {
        format!("conditional every {}", self.n)
    }
}
