//! The log event: one captured occurrence, ready for enrichment, filtering,
//! and sink fan-out.

use crate::level::Level;
use crate::selflog;
use crate::template;
use crate::value::Value;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;

/// A single structured log event.
///
/// Events are heap-allocated and may outlive the emitting call; sinks are
/// free to retain clones. The raw template travels with the event so the
/// backend can group renditions of the same call site.
#[derive(Debug, Clone)]
pub struct LogEvent {
    /// When the event was captured.
    pub timestamp: DateTime<Utc>,
    /// Severity.
    pub level: Level,
    /// The raw message template, verbatim.
    pub template: String,
    /// Named property values.
    pub properties: HashMap<String, Value>,
    /// Optional associated error.
    pub exception: Option<Arc<dyn std::error::Error + Send + Sync>>,
    /// Call-site location, populated by the logger's `#[track_caller]` entry
    /// points and materialized as a property by the caller enricher.
    pub caller: Option<&'static std::panic::Location<'static>>,
}

impl LogEvent {
    /// An event stamped now, with no properties.
    #[must_use]
    pub fn new(level: Level, template: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            level,
            template: template.into(),
            properties: HashMap::new(),
            exception: None,
            caller: None,
        }
    }

    /// Sets a property, replacing any existing value of the same name.
    pub fn add_property(&mut self, name: impl Into<String>, value: Value) {
        self.properties.insert(name.into(), value);
    }

    /// Sets a property only when absent.
    ///
    /// This is the operation enrichers use, so event-literal and scoped
    /// values always outrank anything added later in the pipeline.
    pub fn add_property_if_absent(&mut self, name: &str, value: Value) {
        if !self.properties.contains_key(name) {
            self.properties.insert(name.to_string(), value);
        }
    }

    /// Looks up a property by name.
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&Value> {
        self.properties.get(name)
    }

    /// Renders the message by substituting properties into the template.
    ///
    /// A template that fails to parse renders as its raw text; the failure is
    /// reported through selflog.
    #[must_use]
    pub fn render_message(&self) -> String {
        match template::parse_cached(&self.template) {
            Ok(parsed) => parsed.render(&self.properties),
            Err(e) => {
                if selflog::is_enabled() {
                    selflog::report("render", &format!("template fell back to literal: {e}"));
                }
                self.template.clone()
            }
        }
    }
}
