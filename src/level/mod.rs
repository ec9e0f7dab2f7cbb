//! Severity levels, the shared atomic level switch, and the remote level
//! controller that keeps a switch in sync with an external authority.

mod control;
mod switch;

pub use control::{ControllerOptions, LevelAuthority, LevelController};
pub use switch::LevelSwitch;

use crate::error::Error;
use std::fmt;
use std::str::FromStr;

/// Derives `Ord` so the logger can compare an event's level against the
/// configured minimum. The discriminants are stable; [`LevelSwitch`] stores
/// them in an atomic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Level {
    /// High-volume instrumentation that would be too noisy outside of development.
    Verbose = 0,
    /// Startup, teardown, and state-change details useful for diagnosing issues.
    Debug = 1,
    /// Normal operational milestones.
    #[default]
    Information = 2,
    /// Non-fatal anomalies that may need attention.
    Warning = 3,
    /// Failures that prevent an operation from completing.
    Error = 4,
    /// Failures that bring the whole application down.
    Fatal = 5,
}

impl Level {
    /// Canonical lowercase name, as accepted by config files.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Verbose => "verbose",
            Self::Debug => "debug",
            Self::Information => "information",
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Fatal => "fatal",
        }
    }

    /// Three-letter tag used by the console sink and selflog.
    #[must_use]
    pub const fn short(self) -> &'static str {
        match self {
            Self::Verbose => "VRB",
            Self::Debug => "DBG",
            Self::Information => "INF",
            Self::Warning => "WRN",
            Self::Error => "ERR",
            Self::Fatal => "FTL",
        }
    }

    /// All levels in ascending severity order.
    #[must_use]
    pub const fn all() -> [Self; 6] {
        [
            Self::Verbose,
            Self::Debug,
            Self::Information,
            Self::Warning,
            Self::Error,
            Self::Fatal,
        ]
    }

    /// Reverse of `level as u8`. Out-of-range values saturate to `Fatal` so a
    /// torn store can never widen the switch.
    pub(crate) const fn from_index(index: u8) -> Self {
        match index {
            0 => Self::Verbose,
            1 => Self::Debug,
            2 => Self::Information,
            3 => Self::Warning,
            4 => Self::Error,
            _ => Self::Fatal,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "verbose" | "trace" => Ok(Self::Verbose),
            "debug" => Ok(Self::Debug),
            "information" | "info" => Ok(Self::Information),
            "warning" | "warn" => Ok(Self::Warning),
            "error" | "err" => Ok(Self::Error),
            "fatal" => Ok(Self::Fatal),
            _ => Err(Error::InvalidLevel(s.to_string())),
        }
    }
}
