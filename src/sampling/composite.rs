//! Combines several strategies into one decision over the same event.

use super::{SamplingFilter, SamplingStats, StatCounters};
use crate::event::LogEvent;
use crate::filter::Filter;
use std::sync::Arc;

/// How a composite combines its parts' verdicts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombineMode {
    /// Every strategy must accept.
    All,
    /// Any single acceptance suffices.
    Any,
}

/// Evaluates every part against the same event, with no short-circuit, so
/// each part's counters and decision state advance identically whether or
/// not a sibling already settled the verdict. This is the difference from a
/// cascade, where later strategies only see survivors.
pub struct CompositeSampler {
    mode: CombineMode,
    parts: Vec<Arc<dyn SamplingFilter>>,
    stats: StatCounters,
}

impl CompositeSampler {
    /// A composite over `parts` with the given combination mode.
    #[must_use]
    pub fn new(mode: CombineMode, parts: Vec<Arc<dyn SamplingFilter>>) -> Self {
        Self {
            mode,
            parts,
            stats: StatCounters::new(),
        }
    }

    /// The wrapped strategies.
    #[must_use]
    pub fn parts(&self) -> &[Arc<dyn SamplingFilter>] {
        &self.parts
    }
}

impl Filter for CompositeSampler {
    fn is_enabled(&self, event: &LogEvent) -> bool {
        let mut accepted_any = false;
        let mut accepted_all = true;
        for part in &self.parts {
            if part.is_enabled(event) {
                accepted_any = true;
            } else {
                accepted_all = false;
            }
        }
        let verdict = match self.mode {
            CombineMode::All => accepted_all,
            CombineMode::Any => accepted_any,
        };
        self.stats.record(verdict)
    }
}

impl SamplingFilter for CompositeSampler {
    fn stats(&self) -> SamplingStats {
        self.stats.snapshot()
    }

    fn reset(&self) {
        self.stats.reset();
        for part in &self.parts {
            part.reset();
        }
    }

    fn describe(&self) -> String {
        let inner: Vec<String> = self.parts.iter().map(|p| p.describe()).collect();
        let op = match self.mode {
            CombineMode::All => " AND ",
            CombineMode::Any => " OR ",
        };
        format!("({})", inner.join(op))
    }
}
