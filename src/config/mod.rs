//! Declarative logger configuration.
//!
//! Deployments that prefer a document over builder calls describe the
//! logger in TOML; every section falls back to its defaults, so a partial
//! document configures only what it names. Locating and loading documents
//! from disk stays with the embedding application.

use crate::capture::CaptureLimits;
use crate::error::Error;
use crate::level::Level;
use crate::logger::{Logger, LoggerBuilder};
use crate::selflog;
use serde::Deserialize;
use std::str::FromStr;

/// General configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Minimum log level.
    pub level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            level: "information".to_string(),
        }
    }
}

/// Console sink configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    /// Enable the console sink.
    pub enabled: bool,
    /// Write to stdout instead of stderr.
    pub stdout: bool,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            stdout: false,
        }
    }
}

/// Selflog configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SelflogConfig {
    /// `"stderr"`, `"stdout"`, or a file path; empty leaves selflog off.
    pub target: String,
}

/// Structural capture bounds.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CaptureConfig {
    /// Maximum nesting depth.
    pub max_depth: usize,
    /// Maximum captured string length.
    pub max_string_len: usize,
    /// Maximum sequence/mapping length.
    pub max_collection_len: usize,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        let limits = CaptureLimits::default();
        Self {
            max_depth: limits.max_depth,
            max_string_len: limits.max_string_len,
            max_collection_len: limits.max_collection_len,
        }
    }
}

/// Type-name cache sizing.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TypeNameConfig {
    /// Entry bound for the shared type-name cache; `0` disables caching.
    /// Absent leaves the environment-seeded size in place.
    pub cache_size: Option<usize>,
}

/// Built-in enricher toggles.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EnrichConfig {
    /// Attach `MachineName`.
    pub machine_name: bool,
    /// Attach `ProcessId`/`ProcessName`.
    pub process_info: bool,
    /// Attach `Caller`.
    pub caller: bool,
    /// Attach a minted `CorrelationId`.
    pub correlation_id: bool,
}

/// Root configuration document.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General settings.
    pub general: GeneralConfig,
    /// Console sink settings.
    pub console: ConsoleConfig,
    /// Selflog settings.
    pub selflog: SelflogConfig,
    /// Capture bounds.
    pub capture: CaptureConfig,
    /// Type-name cache sizing.
    pub type_name: TypeNameConfig,
    /// Enricher toggles.
    pub enrich: EnrichConfig,
}

impl Config {
    /// Parses a TOML document.
    ///
    /// # Errors
    /// Propagates TOML syntax and shape errors.
    pub fn from_toml(document: &str) -> Result<Self, Error> {
        Ok(toml::from_str(document)?)
    }

    /// The configured minimum level.
    ///
    /// # Errors
    /// Fails when the level string is unknown.
    pub fn parse_level(&self) -> Result<Level, Error> {
        Level::from_str(&self.general.level)
    }

    /// A builder mirroring this document.
    ///
    /// # Errors
    /// Fails on an unknown level or an unopenable selflog file target.
    pub fn to_builder(&self) -> Result<LoggerBuilder, Error> {
        match self.selflog.target.as_str() {
            "" => {}
            "stderr" => selflog::enable(std::io::stderr()),
            "stdout" => selflog::enable(std::io::stdout()),
            path => {
                let expanded = shellexpand::tilde(path).into_owned();
                let file = std::fs::OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(&expanded)?;
                selflog::enable(file);
            }
        }

        if let Some(size) = self.type_name.cache_size {
            crate::typename::configure_type_name_cache(size);
        }

        let mut builder = Logger::builder()
            .minimum_level(self.parse_level()?)
            .capture_limits(CaptureLimits {
                max_depth: self.capture.max_depth,
                max_string_len: self.capture.max_string_len,
                max_collection_len: self.capture.max_collection_len,
            });

        if self.enrich.machine_name {
            builder = builder.with_machine_name();
        }
        if self.enrich.process_info {
            builder = builder.with_process_info();
        }
        if self.enrich.caller {
            builder = builder.with_caller_info();
        }
        if self.enrich.correlation_id {
            builder = builder.with_correlation_id();
        }

        if self.console.enabled {
            builder = if self.console.stdout {
                builder.console_stdout()
            } else {
                builder.console()
            };
        }
        Ok(builder)
    }

    /// Builds a logger directly from this document.
    ///
    /// # Errors
    /// Same failures as [`to_builder`](Self::to_builder) plus builder
    /// validation.
    pub fn build_logger(&self) -> Result<Logger, Error> {
        self.to_builder()?.try_build()
    }
}
