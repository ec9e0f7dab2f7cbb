//! Exponential backoff sampling keyed by occurrence kind.
//!
//! The first two occurrences of a key always pass, then acceptance spaces
//! out geometrically: occurrences 1, 2, ⌈f⌉, ⌈f²⌉, ⌈f³⌉, … pass. Keyed
//! state is process-global so the same error backs off across loggers, held
//! in a bounded registry with LRU eviction.

use super::{SamplingFilter, SamplingStats, StatCounters};
use crate::event::LogEvent;
use crate::filter::Filter;
use crate::selflog;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, LazyLock, Mutex, RwLock};

const REGISTRY_CAPACITY: usize = 1000;

#[derive(Debug)]
struct BackoffState {
    inner: Mutex<BackoffInner>,
    stats: StatCounters,
    last_used: AtomicU64,
}

#[derive(Debug)]
struct BackoffInner {
    count: u64,
    next_accept: u64,
    // How many acceptances have happened; threshold k is ⌈factor^(k-1)⌉.
    step: u32,
}

impl Default for BackoffState {
    fn default() -> Self {
        Self {
            inner: Mutex::new(BackoffInner {
                count: 0,
                next_accept: 1,
                step: 0,
            }),
            stats: StatCounters::new(),
            last_used: AtomicU64::new(0),
        }
    }
}

struct BackoffRegistry {
    map: RwLock<HashMap<String, Arc<BackoffState>>>,
    clock: AtomicU64,
}

static BACKOFFS: LazyLock<BackoffRegistry> = LazyLock::new(|| BackoffRegistry {
    map: RwLock::new(HashMap::new()),
    clock: AtomicU64::new(0),
});

fn backoff_state(key: &str) -> Arc<BackoffState> {
    let registry = &*BACKOFFS;
    {
        let map = registry.map.read().expect("backoff registry poisoned");
        if let Some(state) = map.get(key) {
            state
                .last_used
                .store(registry.clock.fetch_add(1, Ordering::Relaxed), Ordering::Relaxed);
            return Arc::clone(state);
        }
    }
    let mut map = registry.map.write().expect("backoff registry poisoned");
    if map.len() >= REGISTRY_CAPACITY
        && !map.contains_key(key)
        && let Some(stalest) = map
            .iter()
            .min_by_key(|(_, s)| s.last_used.load(Ordering::Relaxed))
            .map(|(k, _)| k.clone())
    {
        map.remove(&stalest);
    }
    let state = map
        .entry(key.to_string())
        .or_insert_with(|| Arc::new(BackoffState::default()));
    state
        .last_used
        .store(registry.clock.fetch_add(1, Ordering::Relaxed), Ordering::Relaxed);
    Arc::clone(state)
}

/// Resets a key's backoff progression. No-op for unknown keys.
pub fn reset_backoff_state(key: &str) {
    let map = BACKOFFS.map.read().expect("backoff registry poisoned");
    if let Some(state) = map.get(key) {
        let mut inner = state.inner.lock().expect("backoff state poisoned");
        inner.count = 0;
        inner.next_accept = 1;
        inner.step = 0;
        state.stats.reset();
    }
}

/// Geometric backoff sampling for a named occurrence kind.
#[derive(Debug)]
pub struct BackoffSampler {
    key: String,
    factor: f64,
    state: Arc<BackoffState>,
}

impl BackoffSampler {
    /// A sampler backing off by `factor` per acceptance. A factor of 1 or
    /// less would never back off; it is clamped to 2 and reported through
    /// selflog.
    #[must_use]
    pub fn new(key: impl Into<String>, factor: f64) -> Self {
        let key = key.into();
        let corrected = if factor <= 1.0 {
            if selflog::is_enabled() {
                selflog::report(
                    "sampling",
                    &format!("sample_backoff('{key}', {factor}) factor clamped to 2"),
                );
            }
            2.0
        } else {
            factor
        };
        let state = backoff_state(&key);
        Self {
            key,
            factor: corrected,
            state,
        }
    }
}

/// The threshold after `step` acceptances is `⌈factor^(step-1)⌉`.
fn power_exponent(step: u32) -> i32 {
    i32::try_from(step.saturating_sub(1)).unwrap_or(i32::MAX)
}

impl Filter for BackoffSampler {
    fn is_enabled(&self, _event: &LogEvent) -> bool {
        let mut inner = self.state.inner.lock().expect("backoff state poisoned");
        inner.count += 1;
        let accepted = inner.count >= inner.next_accept;
        if accepted {
            inner.step += 1;
            // Thresholds 1, 2, ⌈f⌉, ⌈f²⌉, …. A power whose ceiling has
            // already been passed is not a valid threshold (factor 2 makes
            // ⌈f¹⌉ collide with the fixed threshold 2), so skip ahead to the
            // next power instead of inventing an off-sequence acceptance.
            let mut candidate = if inner.step == 1 {
                2.0
            } else {
                self.factor.powi(power_exponent(inner.step))
            };
            while (candidate.ceil() as u64) <= inner.count {
                inner.step += 1;
                candidate = self.factor.powi(power_exponent(inner.step));
            }
            inner.next_accept = candidate.ceil() as u64;
        }
        drop(inner);
        self.state.stats.record(accepted)
    }
}

impl SamplingFilter for BackoffSampler {
    fn stats(&self) -> SamplingStats {
        self.state.stats.snapshot()
    }

    fn reset(&self) {
        reset_backoff_state(&self.key);
    }

    fn describe(&self) -> String {
        format!("backoff '{}' x{}", self.key, self.factor)
    }
}
