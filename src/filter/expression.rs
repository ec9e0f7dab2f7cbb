//! Regex-based event matching.

use super::Filter;
use crate::error::Error;
use crate::event::LogEvent;
use regex::Regex;

/// What part of the event the expression runs against.
#[derive(Debug, Clone)]
pub enum MatchTarget {
    /// The fully rendered message.
    Message,
    /// The raw template text.
    Template,
    /// A named property's display form.
    Property(String),
}

/// Passes events whose chosen text matches a compiled regex.
#[derive(Debug, Clone)]
pub struct ExpressionFilter {
    target: MatchTarget,
    pattern: Regex,
}

impl ExpressionFilter {
    /// Compiles `pattern` against the chosen target.
    ///
    /// # Errors
    /// Returns `Error::Config` when the pattern does not compile; expression
    /// mistakes belong at construction time, not on the hot path.
    pub fn new(target: MatchTarget, pattern: &str) -> Result<Self, Error> {
        let pattern = Regex::new(pattern)
            .map_err(|e| Error::Config(format!("invalid filter expression: {e}")))?;
        Ok(Self {
            target,
            pattern,
        })
    }
}

impl Filter for ExpressionFilter {
    fn is_enabled(&self, event: &LogEvent) -> bool {
        match &self.target {
            MatchTarget::Message => self.pattern.is_match(&event.render_message()),
            MatchTarget::Template => self.pattern.is_match(&event.template),
            MatchTarget::Property(name) => event
                .property(name)
                .is_some_and(|v| self.pattern.is_match(&v.to_string())),
        }
    }
}
