//! Stateful sampling strategies and their composites.
//!
//! Each strategy is a [`Filter`] with per-logger (or, for groups and
//! backoff, process-global) state, plus `(sampled, skipped)` counters. A
//! cascade of strategies has AND semantics: each sees only the events the
//! previous one accepted. [`CompositeSampler`] instead evaluates every
//! strategy against the same event, so all counters advance in lockstep.

mod adaptive;
mod backoff;
mod composite;
mod conditional;
mod config;
mod counter;
mod duration;
mod first;
mod group;
mod rate;
mod registry;
mod summary;

pub use adaptive::{AdaptiveOptions, AdaptiveSampler};
pub use backoff::{BackoffSampler, reset_backoff_state};
pub use composite::{CombineMode, CompositeSampler};
pub use conditional::ConditionalSampler;
pub use config::SamplingConfigBuilder;
pub use counter::CounterSampler;
pub use duration::DurationSampler;
pub use first::FirstNSampler;
pub use group::{GroupSampler, reset_group};
pub use rate::RateSampler;
pub use registry::{MigrationPolicy, ProfileFactory, ProfileRegistry};
pub use summary::SummaryGuard;

pub(crate) use summary::start_summary;

use crate::filter::Filter;
use std::sync::LazyLock;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

/// Accepted/rejected totals reported by every sampling strategy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SamplingStats {
    /// Events this strategy let through.
    pub sampled: u64,
    /// Events this strategy dropped.
    pub skipped: u64,
}

impl SamplingStats {
    /// Sum of two snapshots; used when aggregating a cascade.
    #[must_use]
    pub const fn merged(self, other: Self) -> Self {
        Self {
            sampled: self.sampled + other.sampled,
            skipped: self.skipped + other.skipped,
        }
    }
}

/// A sampling strategy: a filter that also reports stats and can be reset.
pub trait SamplingFilter: Filter {
    /// Accepted/rejected totals since construction or the last reset.
    fn stats(&self) -> SamplingStats;

    /// Resets counters and decision state.
    fn reset(&self);

    /// Short human-readable description, used by the summary emitter.
    fn describe(&self) -> String;
}

/// Shared accounting for all strategies.
#[derive(Debug, Default)]
pub(crate) struct StatCounters {
    sampled: AtomicU64,
    skipped: AtomicU64,
}

impl StatCounters {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Records a decision and passes it through unchanged.
    pub(crate) fn record(&self, accepted: bool) -> bool {
        if accepted {
            self.sampled.fetch_add(1, Ordering::Relaxed);
        } else {
            self.skipped.fetch_add(1, Ordering::Relaxed);
        }
        accepted
    }

    pub(crate) fn snapshot(&self) -> SamplingStats {
        SamplingStats {
            sampled: self.sampled.load(Ordering::Relaxed),
            skipped: self.skipped.load(Ordering::Relaxed),
        }
    }

    pub(crate) fn reset(&self) {
        self.sampled.store(0, Ordering::Relaxed);
        self.skipped.store(0, Ordering::Relaxed);
    }
}

/// Monotonic nanoseconds since process start; fits in an atomic, unlike
/// `Instant` itself.
pub(crate) fn monotonic_nanos() -> u64 {
    static START: LazyLock<Instant> = LazyLock::new(Instant::now);
    u64::try_from(START.elapsed().as_nanos()).unwrap_or(u64::MAX)
}
