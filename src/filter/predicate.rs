//! Arbitrary-predicate filter.

use super::Filter;
use crate::event::LogEvent;

/// Wraps a caller-supplied predicate over the full event.
pub struct PredicateFilter {
    predicate: Box<dyn Fn(&LogEvent) -> bool + Send + Sync>,
}

impl PredicateFilter {
    /// A filter passing events for which `predicate` returns true.
    #[must_use]
    pub fn new(predicate: impl Fn(&LogEvent) -> bool + Send + Sync + 'static) -> Self {
        Self {
            predicate: Box::new(predicate),
        }
    }
}

impl Filter for PredicateFilter {
    fn is_enabled(&self, event: &LogEvent) -> bool {
        (self.predicate)(event)
    }
}
