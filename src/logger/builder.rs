//! Stepwise logger construction.
//!
//! The builder owns the stage lists until `try_build`/`build` freezes them
//! into a shared pipeline; after that nothing about a logger can change
//! except through derivation.

use super::Logger;
use crate::capture::{CaptureLimits, Capturer, DefaultCapturer};
use crate::enrich::{
    CallerEnricher, CorrelationEnricher, Enricher, EnvironmentEnricher, MachineNameEnricher,
    ProcessEnricher, SourceContextEnricher, TimestampEnricher,
};
use crate::error::Error;
use crate::filter::Filter;
use crate::level::{Level, LevelSwitch};
use crate::pipeline::Pipeline;
use crate::selflog;
use crate::sink::{ConsoleSink, Sink};
use std::sync::{Arc, Once};

/// Accumulates enrichers, filters, a capturer, and sinks for a [`Logger`].
#[derive(Default)]
pub struct LoggerBuilder {
    minimum: Level,
    switch: Option<Arc<LevelSwitch>>,
    enrichers: Vec<Arc<dyn Enricher>>,
    filters: Vec<Arc<dyn Filter>>,
    capturer: Option<Arc<dyn Capturer>>,
    capture_limits: Option<CaptureLimits>,
    sinks: Vec<Arc<dyn Sink>>,
}

impl LoggerBuilder {
    /// A builder with an `Information` minimum and nothing configured.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the static minimum level; ignored while a level switch is
    /// attached.
    #[must_use]
    pub const fn minimum_level(mut self, level: Level) -> Self {
        self.minimum = level;
        self
    }

    /// Attaches a shared level switch; it takes over level gating.
    #[must_use]
    pub fn level_switch(mut self, switch: Arc<LevelSwitch>) -> Self {
        self.switch = Some(switch);
        self
    }

    /// Appends an enricher.
    #[must_use]
    pub fn enrich(mut self, enricher: impl Enricher + 'static) -> Self {
        self.enrichers.push(Arc::new(enricher));
        self
    }

    /// Adds timestamp backfill for events synthesized without one.
    #[must_use]
    pub fn with_timestamp(self) -> Self {
        self.enrich(TimestampEnricher)
    }

    /// Adds `MachineName` from the host name.
    #[must_use]
    pub fn with_machine_name(self) -> Self {
        self.enrich(MachineNameEnricher::new())
    }

    /// Adds `ProcessId` and `ProcessName`.
    #[must_use]
    pub fn with_process_info(self) -> Self {
        self.enrich(ProcessEnricher::new())
    }

    /// Adds `Caller` with the call-site file and line.
    #[must_use]
    pub fn with_caller_info(self) -> Self {
        self.enrich(CallerEnricher)
    }

    /// Adds a property from an environment variable, read once now.
    #[must_use]
    pub fn with_env_var(self, var: &str, property: impl Into<String>) -> Self {
        self.enrich(EnvironmentEnricher::new(var, property))
    }

    /// Ensures every event carries a `CorrelationId`, minting ULIDs as
    /// needed.
    #[must_use]
    pub fn with_correlation_id(self) -> Self {
        self.enrich(CorrelationEnricher::new())
    }

    /// Adds a default `SourceContext` for events no `for_type` scoped.
    #[must_use]
    pub fn with_default_source_context(self, name: impl Into<String>) -> Self {
        self.enrich(SourceContextEnricher::new(name))
    }

    /// Appends a filter.
    #[must_use]
    pub fn filter(mut self, filter: impl Filter + 'static) -> Self {
        self.filters.push(Arc::new(filter));
        self
    }

    /// Replaces the capturer used for `{@Name}` arguments.
    #[must_use]
    pub fn capturer(mut self, capturer: impl Capturer + 'static) -> Self {
        self.capturer = Some(Arc::new(capturer));
        self
    }

    /// Uses the default capturer with explicit bounds.
    #[must_use]
    pub fn capture_limits(mut self, limits: CaptureLimits) -> Self {
        self.capture_limits = Some(limits);
        self
    }

    /// Appends a sink.
    #[must_use]
    pub fn sink(mut self, sink: impl Sink + 'static) -> Self {
        self.sinks.push(Arc::new(sink));
        self
    }

    /// Appends an already shared sink; how tests attach a
    /// [`MemorySink`](crate::sink::MemorySink) they keep a handle to.
    #[must_use]
    pub fn sink_shared(mut self, sink: Arc<dyn Sink>) -> Self {
        self.sinks.push(sink);
        self
    }

    /// Appends a stderr console sink.
    #[must_use]
    pub fn console(self) -> Self {
        self.sink(ConsoleSink::new())
    }

    /// Appends a stdout console sink.
    #[must_use]
    pub fn console_stdout(self) -> Self {
        self.sink(ConsoleSink::stdout())
    }

    /// Builds the logger, surfacing configuration mistakes.
    ///
    /// # Errors
    /// Fails on contradictory configuration, such as zero-depth capture
    /// limits or both a capturer and capture limits.
    pub fn try_build(self) -> Result<Logger, Error> {
        static ENV_INIT: Once = Once::new();
        ENV_INIT.call_once(|| {
            if let Err(e) = selflog::init_from_env() {
                eprintln!("mtlog: {SELF_LOG_ENV} ignored: {e}", SELF_LOG_ENV = selflog::SELFLOG_ENV);
            }
        });

        if self.capturer.is_some() && self.capture_limits.is_some() {
            return Err(Error::Config(
                "capture_limits has no effect alongside a custom capturer".to_string(),
            ));
        }
        if let Some(limits) = &self.capture_limits {
            if limits.max_depth == 0 {
                return Err(Error::Config("capture max_depth must be at least 1".to_string()));
            }
            if limits.max_collection_len == 0 {
                return Err(Error::Config(
                    "capture max_collection_len must be at least 1".to_string(),
                ));
            }
        }
        if self.sinks.is_empty() && selflog::is_enabled() {
            selflog::report("builder", "logger built with no sinks; events will be dropped");
        }

        let capturer = match (self.capturer, self.capture_limits) {
            (Some(capturer), _) => Some(capturer),
            (None, Some(limits)) => Some(Arc::new(DefaultCapturer::new(limits)) as Arc<dyn Capturer>),
            (None, None) => None,
        };

        let pipeline = Arc::new(Pipeline::new(
            self.enrichers,
            self.filters,
            capturer,
            self.sinks,
        ));
        Ok(Logger::from_parts(pipeline, self.minimum, self.switch))
    }

    /// Builds the logger.
    ///
    /// # Panics
    /// Panics on the configuration errors `try_build` would report.
    #[must_use]
    pub fn build(self) -> Logger {
        match self.try_build() {
            Ok(logger) => logger,
            Err(e) => panic!("mtlog: invalid logger configuration: {e}"),
        }
    }
}
