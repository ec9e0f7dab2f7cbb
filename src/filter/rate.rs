//! Every-Nth rate limiting, independent of the sampling subsystem's richer
//! strategies.

use super::Filter;
use crate::event::LogEvent;
use std::sync::atomic::{AtomicU64, Ordering};

/// Passes one event in every `n`, by a shared atomic counter.
#[derive(Debug)]
pub struct RateFilter {
    n: u64,
    count: AtomicU64,
}

impl RateFilter {
    /// A filter passing every `n`-th event; `n` of zero behaves as 1.
    #[must_use]
    pub fn every(n: u64) -> Self {
        Self {
            n: n.max(1),
            count: AtomicU64::new(0),
        }
    }
}

impl Filter for RateFilter {
    fn is_enabled(&self, _event: &LogEvent) -> bool {
        let seen = self.count.fetch_add(1, Ordering::Relaxed);
        seen % self.n == 0
    }
}
