//! Immutable composition of enrichers, filters, a capturer, and sinks.
//!
//! Built once by the logger builder and shared by every derived logger
//! through an `Arc`, so no lock guards event processing. Stages run
//! strictly in order: enrich, filter (short-circuiting on the first
//! rejection), then fan out to every sink.

use crate::capture::{Capturer, DefaultCapturer};
use crate::enrich::Enricher;
use crate::event::LogEvent;
use crate::filter::Filter;
use crate::selflog;
use crate::sink::Sink;
use std::sync::Arc;

/// The frozen stage composition behind a logger.
pub struct Pipeline {
    enrichers: Vec<Arc<dyn Enricher>>,
    filters: Vec<Arc<dyn Filter>>,
    capturer: Arc<dyn Capturer>,
    sinks: Vec<Arc<dyn Sink>>,
}

impl Pipeline {
    pub(crate) fn new(
        enrichers: Vec<Arc<dyn Enricher>>,
        filters: Vec<Arc<dyn Filter>>,
        capturer: Option<Arc<dyn Capturer>>,
        sinks: Vec<Arc<dyn Sink>>,
    ) -> Self {
        Self {
            enrichers,
            filters,
            capturer: capturer.unwrap_or_else(|| Arc::new(DefaultCapturer::default())),
            sinks,
        }
    }

    /// The capturer applied to `{@Name}` arguments during binding.
    #[must_use]
    pub fn capturer(&self) -> &dyn Capturer {
        self.capturer.as_ref()
    }

    /// The configured sinks.
    #[must_use]
    pub fn sinks(&self) -> &[Arc<dyn Sink>] {
        &self.sinks
    }

    /// Whether the fast path may skip this pipeline's stages.
    #[must_use]
    pub fn is_trivial(&self) -> bool {
        self.enrichers.is_empty() && self.filters.is_empty()
    }

    /// Runs the configured enrichers in order.
    pub fn enrich(&self, event: &mut LogEvent) {
        for enricher in &self.enrichers {
            enricher.enrich(event);
        }
    }

    /// Runs the configured filters; false as soon as one rejects.
    #[must_use]
    pub fn is_enabled(&self, event: &LogEvent) -> bool {
        self.filters.iter().all(|f| f.is_enabled(event))
    }

    /// Fans the event out to every sink. Failures are swallowed and
    /// reported through selflog with the failing sink's name.
    pub fn emit(&self, event: &LogEvent) {
        for sink in &self.sinks {
            if let Err(e) = sink.emit(event)
                && selflog::is_enabled()
            {
                selflog::report("pipeline", &format!("sink '{}' failed: {e}", sink.name()));
            }
        }
    }

    /// Full processing: enrich, filter, emit.
    pub fn process(&self, event: &mut LogEvent) {
        self.enrich(event);
        if self.is_enabled(event) {
            self.emit(event);
        }
    }

    /// Closes every sink, returning the first error.
    ///
    /// # Errors
    /// The first sink close failure, after all sinks were attempted.
    pub fn close(&self) -> Result<(), crate::error::Error> {
        let mut first_err = None;
        for sink in &self.sinks {
            if let Err(e) = sink.close()
                && first_err.is_none()
            {
                first_err = Some(e);
            }
        }
        first_err.map_or(Ok(()), Err)
    }
}
