//! Every-Nth sampling.

use super::{SamplingFilter, SamplingStats, StatCounters};
use crate::event::LogEvent;
use crate::filter::Filter;
use crate::selflog;
use std::sync::atomic::{AtomicU64, Ordering};

/// Passes the 1st, N+1st, 2N+1st, … event through a monotonic counter.
#[derive(Debug)]
pub struct CounterSampler {
    n: u64,
    count: AtomicU64,
    stats: StatCounters,
}

impl CounterSampler {
    /// A sampler passing one event in every `n`. Zero is corrected to 1 and
    /// reported through selflog.
    #[must_use]
    pub fn every(n: u64) -> Self {
        if n == 0 && selflog::is_enabled() {
            selflog::report("sampling", "sample(0) corrected to sample(1)");
        }
        Self {
            n: n.max(1),
            count: AtomicU64::new(0),
            stats: StatCounters::new(),
        }
    }
}

impl Filter for CounterSampler {
    fn is_enabled(&self, _event: &LogEvent) -> bool {
        let count = self.count.fetch_add(1, Ordering::Relaxed) + 1;
        self.stats.record((count - 1) % self.n == 0)
    }
}

impl SamplingFilter for CounterSampler {
    fn stats(&self) -> SamplingStats {
        self.stats.snapshot()
    }

    fn reset(&self) {
        self.count.store(0, Ordering::Relaxed);
        self.stats.reset();
    }

    fn describe(&self) -> String {
        format!("every {}", self.n)
    }
}
