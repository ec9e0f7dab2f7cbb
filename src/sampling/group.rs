//! Named sampling groups with process-global shared counters.
//!
//! Two loggers sampling the same group name advance one counter, so "at most
//! every 100th cache miss" holds across the whole process rather than per
//! logger. Group state lives in a bounded registry with LRU eviction.

use super::{SamplingFilter, SamplingStats, StatCounters};
use crate::event::LogEvent;
use crate::filter::Filter;
use crate::selflog;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, LazyLock, RwLock};

const REGISTRY_CAPACITY: usize = 1000;

#[derive(Debug, Default)]
struct GroupState {
    counter: AtomicU64,
    stats: StatCounters,
    last_used: AtomicU64,
}

struct GroupRegistry {
    map: RwLock<HashMap<String, Arc<GroupState>>>,
    clock: AtomicU64,
}

static GROUPS: LazyLock<GroupRegistry> = LazyLock::new(|| GroupRegistry {
    map: RwLock::new(HashMap::new()),
    clock: AtomicU64::new(0),
});

fn group_state(name: &str) -> Arc<GroupState> {
    let registry = &*GROUPS;
    {
        let map = registry.map.read().expect("group registry poisoned");
        if let Some(state) = map.get(name) {
            state
                .last_used
                .store(registry.clock.fetch_add(1, Ordering::Relaxed), Ordering::Relaxed);
            return Arc::clone(state);
        }
    }
    let mut map = registry.map.write().expect("group registry poisoned");
    if map.len() >= REGISTRY_CAPACITY
        && !map.contains_key(name)
        && let Some(stalest) = map
            .iter()
            .min_by_key(|(_, s)| s.last_used.load(Ordering::Relaxed))
            .map(|(k, _)| k.clone())
    {
        map.remove(&stalest);
    }
    let state = map
        .entry(name.to_string())
        .or_insert_with(|| Arc::new(GroupState::default()));
    state
        .last_used
        .store(registry.clock.fetch_add(1, Ordering::Relaxed), Ordering::Relaxed);
    Arc::clone(state)
}

/// Resets a named group's shared counter and stats. No-op for unknown names.
pub fn reset_group(name: &str) {
    let map = GROUPS.map.read().expect("group registry poisoned");
    if let Some(state) = map.get(name) {
        state.counter.store(0, Ordering::Relaxed);
        state.stats.reset();
    }
}

/// Every-Nth sampling over a counter shared by group name.
#[derive(Debug)]
pub struct GroupSampler {
    name: String,
    n: u64,
    state: Arc<GroupState>,
}

impl GroupSampler {
    /// A sampler sharing the counter registered under `name`. Zero is
    /// corrected to 1 and reported through selflog.
    #[must_use]
    pub fn new(name: impl Into<String>, n: u64) -> Self {
        let name = name.into();
        if n == 0 && selflog::is_enabled() {
            selflog::report("sampling", "sample_group(_, 0) corrected to 1");
        }
        let state = group_state(&name);
        Self {
            name,
            n: n.max(1),
            state,
        }
    }
}

impl Filter for GroupSampler {
    fn is_enabled(&self, _event: &LogEvent) -> bool {
        let count = self.state.counter.fetch_add(1, Ordering::Relaxed) + 1;
        self.state.stats.record((count - 1) % self.n == 0)
    }
}

impl SamplingFilter for GroupSampler {
    fn stats(&self) -> SamplingStats {
        self.state.stats.snapshot()
    }

    fn reset(&self) {
        self.state.counter.store(0, Ordering::Relaxed);
        self.state.stats.reset();
    }

    fn describe(&self) -> String {
        format!("group '{}' every {}", self.name, self.n)
    }
}
