//! Unified error type for all mtlog operations.

/// Error type for mtlog operations.
///
/// The logging hot path never returns errors; everything here surfaces either
/// at construction time or through explicit maintenance calls.
#[derive(Debug)]
pub enum Error {
    /// Message template failed to parse.
    Template {
        /// The raw template text.
        raw: String,
        /// Byte offset of the offending character.
        position: usize,
        /// What went wrong at that position.
        reason: String,
    },
    /// Invalid log level string.
    InvalidLevel(String),
    /// Invalid logger or pipeline configuration.
    Config(String),
    /// TOML config parsing error.
    ConfigParse(toml::de::Error),
    /// Sampling profile registry misuse.
    Registry(String),
    /// The profile registry was frozen and refuses mutation.
    RegistryFrozen,
    /// Value formatting or serialization error.
    Format(String),
    /// I/O error.
    Io(std::io::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Template {
                raw,
                position,
                reason,
            } => {
                write!(f, "template error at byte {position} in {raw:?}: {reason}")
            }
            Self::InvalidLevel(level) => write!(f, "unknown log level: '{level}'"),
            Self::Config(msg) => write!(f, "configuration error: {msg}"),
            Self::ConfigParse(e) => write!(f, "parse error: {e}"),
            Self::Registry(msg) => write!(f, "sampling profile registry: {msg}"),
            Self::RegistryFrozen => write!(f, "sampling profile registry is frozen"),
            Self::Format(msg) => write!(f, "format error: {msg}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::ConfigParse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        Self::ConfigParse(e)
    }
}
