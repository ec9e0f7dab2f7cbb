//! Severity-based filters.

use super::Filter;
use crate::event::LogEvent;
use crate::level::{Level, LevelSwitch};
use std::sync::Arc;

/// Rejects events below a fixed minimum.
#[derive(Debug, Clone, Copy)]
pub struct MinimumLevelFilter {
    minimum: Level,
}

impl MinimumLevelFilter {
    /// A filter with the given fixed minimum.
    #[must_use]
    pub const fn new(minimum: Level) -> Self {
        Self {
            minimum,
        }
    }
}

impl Filter for MinimumLevelFilter {
    fn is_enabled(&self, event: &LogEvent) -> bool {
        event.level >= self.minimum
    }
}

/// Rejects events below a shared [`LevelSwitch`]'s current minimum.
#[derive(Debug, Clone)]
pub struct SwitchFilter {
    switch: Arc<LevelSwitch>,
}

impl SwitchFilter {
    /// A filter consulting the given switch on every event.
    #[must_use]
    pub fn new(switch: Arc<LevelSwitch>) -> Self {
        Self {
            switch,
        }
    }
}

impl Filter for SwitchFilter {
    fn is_enabled(&self, event: &LogEvent) -> bool {
        self.switch.is_enabled(event.level)
    }
}
