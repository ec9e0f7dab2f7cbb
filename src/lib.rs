#![forbid(unsafe_code)]

//! `mtlog` is a structured logging library built around *message templates*:
//! the template string `"User {UserId} logged in"` is preserved verbatim on
//! every event it produces, so the backend can group all renditions of one
//! call site while each event still carries `UserId` as a first-class
//! property.
//!
//! Key design choices:
//! - One immutable pipeline (enrich, filter, capture, sink) shared by every
//!   derived logger, so scoping and sampling never take a lock
//! - `{@Name}` structural capture with bounded depth and size, plus a
//!   safe-value hook for redacting secrets before they reach a sink
//! - Per-logger sampling strategies (every-Nth, rate, window, first-N,
//!   group, conditional, backoff, adaptive) that compose by cascade or
//!   explicit AND/OR
//! - An atomic level switch shared across loggers, optionally steered by a
//!   background controller polling an external authority
//! - A request-scoped property carrier with an immutable stack, so child
//!   scopes never mutate their parents
//! - Opt-in selflog diagnostics for every failure the hot path swallows
//!
//! # Example
//!
//! ```
//! use mtlog::{Level, Logger, MemorySink, Value};
//!
//! let sink = MemorySink::shared();
//! let log = Logger::builder()
//!     .minimum_level(Level::Debug)
//!     .sink_shared(sink.clone())
//!     .build();
//!
//! log.information("User {UserId} logged in", &[Value::from(42)]);
//!
//! let events = sink.events();
//! assert_eq!(events[0].template, "User {UserId} logged in");
//! assert_eq!(events[0].property("UserId"), Some(&Value::from(42)));
//! ```

pub mod capture;
pub mod config;
pub mod context;
pub mod enrich;
pub mod error;
pub mod event;
pub mod filter;
pub mod level;
pub mod logger;
pub mod pipeline;
pub mod sampling;
pub mod selflog;
pub mod sink;
pub mod template;
pub mod typename;
pub mod value;

// Flatten the most-used types to the crate root so callers can
// `use mtlog::Logger` instead of `use mtlog::logger::Logger`.
pub use capture::{CaptureLimits, Capturer, DefaultCapturer};
pub use config::Config;
pub use context::Context;
pub use error::Error;
pub use event::LogEvent;
pub use level::{ControllerOptions, Level, LevelAuthority, LevelController, LevelSwitch};
pub use logger::{Logger, LoggerBuilder};
pub use sampling::{
    AdaptiveOptions, MigrationPolicy, ProfileRegistry, SamplingConfigBuilder, SamplingStats,
    SummaryGuard,
};
pub use sink::{ConsoleSink, MemorySink, Sink};
pub use template::MessageTemplate;
pub use typename::{TypeNameOptions, extract_type_name};
pub use value::{ObjectValue, Value};
