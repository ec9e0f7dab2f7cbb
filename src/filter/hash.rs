//! Deterministic proportional filter keyed on the event type.

use super::Filter;
use crate::event::LogEvent;
use std::hash::{DefaultHasher, Hash, Hasher};

/// Passes a stable subset of event *types*: the decision hashes the raw
/// template, so a given call site is either always in or always out for a
/// fixed proportion. Restarting the process does not change the subset.
#[derive(Debug, Clone, Copy)]
pub struct HashFilter {
    threshold: u64,
}

const BUCKETS: u64 = 10_000;

impl HashFilter {
    /// Passes approximately `proportion` (clamped to `[0, 1]`) of templates.
    #[must_use]
    pub fn proportion(proportion: f64) -> Self {
        let clamped = proportion.clamp(0.0, 1.0);
        Self {
            threshold: (clamped * BUCKETS as f64).round() as u64,
        }
    }
}

impl Filter for HashFilter {
    fn is_enabled(&self, event: &LogEvent) -> bool {
        let mut hasher = DefaultHasher::new();
        event.template.hash(&mut hasher);
        hasher.finish() % BUCKETS < self.threshold
    }
}
