//! Property presence/equality filter.

use super::Filter;
use crate::event::LogEvent;
use crate::value::Value;

/// Passes events that carry a named property, optionally requiring an exact
/// value match.
#[derive(Debug, Clone)]
pub struct PropertyMatchFilter {
    name: String,
    expected: Option<Value>,
}

impl PropertyMatchFilter {
    /// Passes events where the property is present, whatever its value.
    #[must_use]
    pub fn present(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            expected: None,
        }
    }

    /// Passes events where the property equals `expected`.
    #[must_use]
    pub fn equals(name: impl Into<String>, expected: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            expected: Some(expected.into()),
        }
    }
}

impl Filter for PropertyMatchFilter {
    fn is_enabled(&self, event: &LogEvent) -> bool {
        match (event.property(&self.name), &self.expected) {
            (Some(actual), Some(expected)) => actual == expected,
            (Some(_), None) => true,
            (None, _) => false,
        }
    }
}
