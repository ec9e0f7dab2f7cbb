//! First-N sampling.

use super::{SamplingFilter, SamplingStats, StatCounters};
use crate::event::LogEvent;
use crate::filter::Filter;
use crate::selflog;
use std::sync::atomic::{AtomicU64, Ordering};

/// Passes the first `n` events, then nothing.
#[derive(Debug)]
pub struct FirstNSampler {
    n: u64,
    count: AtomicU64,
    stats: StatCounters,
}

impl FirstNSampler {
    /// A sampler passing the first `n` events. Zero passes none, which is
    /// accepted but reported through selflog since it silences the stream.
    #[must_use]
    pub fn new(n: u64) -> Self {
        if n == 0 && selflog::is_enabled() {
            selflog::report("sampling", "sample_first(0) passes no events");
        }
        Self {
            n,
            count: AtomicU64::new(0),
            stats: StatCounters::new(),
        }
    }
}

impl Filter for FirstNSampler {
    fn is_enabled(&self, _event: &LogEvent) -> bool {
        let count = self.count.fetch_add(1, Ordering::Relaxed) + 1;
        self.stats.record(count <= self.n)
    }
}

impl SamplingFilter for FirstNSampler {
    fn stats(&self) -> SamplingStats {
        self.stats.snapshot()
    }

    fn reset(&self) {
        self.count.store(0, Ordering::Relaxed);
        self.stats.reset();
    }

    fn describe(&self) -> String {
        format!("first {}", self.n)
    }
}
