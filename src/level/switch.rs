//! Atomically mutable minimum level shared between loggers.

use super::Level;
use std::sync::atomic::{AtomicU8, Ordering};

/// Holds the minimum level in an atomic so every derived logger sees a
/// `set_level` immediately. Readers never block writers; loggers consult the
/// switch on every call, so both sides use relaxed ordering.
#[derive(Debug)]
pub struct LevelSwitch {
    level: AtomicU8,
}

impl LevelSwitch {
    /// A switch starting at the given minimum level.
    #[must_use]
    pub fn new(level: Level) -> Self {
        Self {
            level: AtomicU8::new(level as u8),
        }
    }

    /// Current minimum level.
    #[must_use]
    pub fn level(&self) -> Level {
        Level::from_index(self.level.load(Ordering::Relaxed))
    }

    /// Updates the minimum level for every logger sharing this switch.
    pub fn set_level(&self, level: Level) {
        self.level.store(level as u8, Ordering::Relaxed);
    }

    /// Whether an event at `level` passes this switch.
    #[must_use]
    pub fn is_enabled(&self, level: Level) -> bool {
        level >= self.level()
    }
}

impl Default for LevelSwitch {
    fn default() -> Self {
        Self::new(Level::Information)
    }
}
