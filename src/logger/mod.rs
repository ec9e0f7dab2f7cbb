//! The public logging surface.
//!
//! A `Logger` is a thin immutable handle: an `Arc` to the frozen pipeline
//! plus this logger's own scoped properties, context enrichers, and sampling
//! strategies. Deriving (`for_context`, `with`, `with_context`, the
//! `sample_*` family) clones the handle and grows those lists; the pipeline
//! is never touched, so derivation is cheap and loggers are freely shared
//! across threads.

mod builder;

pub use builder::LoggerBuilder;

use crate::context::Context;
use crate::enrich::{CarrierEnricher, ContextStackEnricher, Enricher};
use crate::error::Error;
use crate::event::LogEvent;
use crate::level::{Level, LevelSwitch};
use crate::pipeline::Pipeline;
use crate::sampling::{
    self, AdaptiveOptions, AdaptiveSampler, BackoffSampler, ConditionalSampler, CounterSampler,
    DurationSampler, FirstNSampler, GroupSampler, ProfileRegistry, RateSampler, SamplingFilter,
    SamplingStats, SummaryGuard,
};
use crate::selflog;
use crate::template;
use crate::typename::{self, TypeNameOptions};
use crate::value::Value;
use chrono::Utc;
use std::collections::HashMap;
use std::panic::Location;
use std::sync::Arc;
use std::time::Duration;

/// Property names the logger itself gives meaning to. Scoping may shadow
/// them, but doing so is usually a mistake, so it is reported via selflog.
const RESERVED_NAMES: [&str; 6] = [
    "Timestamp",
    "Level",
    "Message",
    "MessageTemplate",
    "Exception",
    "SourceContext",
];

/// Fields scoped onto a derived logger. Small sets stay in a flat slice;
/// past [`FLAT_FIELD_LIMIT`] lookup cost matters more than locality and the
/// storage switches to a map.
#[derive(Clone, Default)]
enum ScopedFields {
    #[default]
    Empty,
    Flat(Arc<Vec<(String, Value)>>),
    Map(Arc<HashMap<String, Value>>),
}

const FLAT_FIELD_LIMIT: usize = 64;

impl ScopedFields {
    fn pairs(&self) -> Vec<(String, Value)> {
        match self {
            Self::Empty => Vec::new(),
            Self::Flat(fields) => fields.as_ref().clone(),
            Self::Map(fields) => fields.iter().map(|(k, v)| (k.clone(), v.clone())).collect(),
        }
    }

    fn from_pairs(pairs: Vec<(String, Value)>) -> Self {
        if pairs.is_empty() {
            Self::Empty
        } else if pairs.len() <= FLAT_FIELD_LIMIT {
            Self::Flat(Arc::new(pairs))
        } else {
            Self::Map(Arc::new(pairs.into_iter().collect()))
        }
    }

    fn apply(&self, event: &mut LogEvent) {
        match self {
            Self::Empty => {}
            Self::Flat(fields) => {
                for (name, value) in fields.iter() {
                    event.add_property_if_absent(name, value.clone());
                }
            }
            Self::Map(fields) => {
                for (name, value) in fields.iter() {
                    event.add_property_if_absent(name, value.clone());
                }
            }
        }
    }

    fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

/// A structured logger bound to a pipeline.
#[derive(Clone)]
pub struct Logger {
    pipeline: Arc<Pipeline>,
    minimum: Level,
    switch: Option<Arc<LevelSwitch>>,
    scoped: ScopedFields,
    context_enrichers: Vec<Arc<dyn Enricher>>,
    samplers: Vec<Arc<dyn SamplingFilter>>,
}

impl Logger {
    /// Starts a builder.
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    pub(crate) fn from_parts(
        pipeline: Arc<Pipeline>,
        minimum: Level,
        switch: Option<Arc<LevelSwitch>>,
    ) -> Self {
        Self {
            pipeline,
            minimum,
            switch,
            scoped: ScopedFields::Empty,
            context_enrichers: Vec::new(),
            samplers: Vec::new(),
        }
    }

    // Level introspection ---------------------------------------------------

    /// The effective minimum level: the switch if one is attached, else the
    /// static minimum from construction.
    #[must_use]
    pub fn minimum_level(&self) -> Level {
        self.switch
            .as_ref()
            .map_or(self.minimum, |s| s.level())
    }

    /// The attached level switch, if any.
    #[must_use]
    pub fn level_switch(&self) -> Option<Arc<LevelSwitch>> {
        self.switch.clone()
    }

    /// Whether an event at `level` would pass the level gate.
    #[must_use]
    pub fn is_enabled(&self, level: Level) -> bool {
        level >= self.minimum_level()
    }

    // Level-named emission --------------------------------------------------

    /// Emits at `Verbose`.
    #[track_caller]
    pub fn verbose(&self, template: &str, args: &[Value]) {
        self.log(Level::Verbose, template, args);
    }

    /// Emits at `Debug`.
    #[track_caller]
    pub fn debug(&self, template: &str, args: &[Value]) {
        self.log(Level::Debug, template, args);
    }

    /// Emits at `Information`.
    #[track_caller]
    pub fn information(&self, template: &str, args: &[Value]) {
        self.log(Level::Information, template, args);
    }

    /// Alias for [`information`](Self::information).
    #[track_caller]
    pub fn info(&self, template: &str, args: &[Value]) {
        self.log(Level::Information, template, args);
    }

    /// Emits at `Warning`.
    #[track_caller]
    pub fn warning(&self, template: &str, args: &[Value]) {
        self.log(Level::Warning, template, args);
    }

    /// Alias for [`warning`](Self::warning).
    #[track_caller]
    pub fn warn(&self, template: &str, args: &[Value]) {
        self.log(Level::Warning, template, args);
    }

    /// Emits at `Error`.
    #[track_caller]
    pub fn error(&self, template: &str, args: &[Value]) {
        self.log(Level::Error, template, args);
    }

    /// Emits at `Fatal`.
    #[track_caller]
    pub fn fatal(&self, template: &str, args: &[Value]) {
        self.log(Level::Fatal, template, args);
    }

    /// Emits at an explicit level.
    #[track_caller]
    pub fn log(&self, level: Level, template: &str, args: &[Value]) {
        if !self.is_enabled(level) {
            return;
        }
        self.dispatch(level, template, args, None, Location::caller());
    }

    // Carrier-aware emission ------------------------------------------------

    /// Emits at `Verbose` with the carrier's properties layered in.
    #[track_caller]
    pub fn verbose_ctx(&self, ctx: &Context, template: &str, args: &[Value]) {
        self.log_ctx(Level::Verbose, ctx, template, args);
    }

    /// Emits at `Debug` with the carrier's properties layered in.
    #[track_caller]
    pub fn debug_ctx(&self, ctx: &Context, template: &str, args: &[Value]) {
        self.log_ctx(Level::Debug, ctx, template, args);
    }

    /// Emits at `Information` with the carrier's properties layered in.
    #[track_caller]
    pub fn information_ctx(&self, ctx: &Context, template: &str, args: &[Value]) {
        self.log_ctx(Level::Information, ctx, template, args);
    }

    /// Alias for [`information_ctx`](Self::information_ctx).
    #[track_caller]
    pub fn info_ctx(&self, ctx: &Context, template: &str, args: &[Value]) {
        self.log_ctx(Level::Information, ctx, template, args);
    }

    /// Emits at `Warning` with the carrier's properties layered in.
    #[track_caller]
    pub fn warning_ctx(&self, ctx: &Context, template: &str, args: &[Value]) {
        self.log_ctx(Level::Warning, ctx, template, args);
    }

    /// Alias for [`warning_ctx`](Self::warning_ctx).
    #[track_caller]
    pub fn warn_ctx(&self, ctx: &Context, template: &str, args: &[Value]) {
        self.log_ctx(Level::Warning, ctx, template, args);
    }

    /// Emits at `Error` with the carrier's properties layered in.
    #[track_caller]
    pub fn error_ctx(&self, ctx: &Context, template: &str, args: &[Value]) {
        self.log_ctx(Level::Error, ctx, template, args);
    }

    /// Emits at `Fatal` with the carrier's properties layered in.
    #[track_caller]
    pub fn fatal_ctx(&self, ctx: &Context, template: &str, args: &[Value]) {
        self.log_ctx(Level::Fatal, ctx, template, args);
    }

    /// Emits at an explicit level with the carrier's properties layered in.
    #[track_caller]
    pub fn log_ctx(&self, level: Level, ctx: &Context, template: &str, args: &[Value]) {
        if !self.is_enabled(level) {
            return;
        }
        self.dispatch(level, template, args, Some(ctx), Location::caller());
    }

    // Scoping ---------------------------------------------------------------

    /// A derived logger with one more scoped property.
    #[must_use]
    pub fn for_context(&self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        let name = name.into();
        self.with(&[(name.as_str(), value.into())])
    }

    /// A derived logger with `SourceContext` set to a fixed component name.
    #[must_use]
    pub fn for_source_context(&self, name: impl Into<String>) -> Self {
        self.for_context("SourceContext", Value::Str(name.into()))
    }

    /// A derived logger with `SourceContext` derived from `T`.
    ///
    /// `&T` and `T` produce the same context; derivation is cached globally.
    #[must_use]
    pub fn for_type<T: ?Sized>(&self) -> Self {
        self.for_context("SourceContext", typename::source_context_value::<T>())
    }

    /// Like [`for_type`](Self::for_type) with a tenant-keyed cache partition.
    #[must_use]
    pub fn for_type_with_cache_key<T: ?Sized>(&self, tenant: &str) -> Self {
        self.for_context(
            "SourceContext",
            Value::Str(typename::extract_type_name_with_cache_key::<T>(
                &TypeNameOptions::default(),
                tenant,
            )),
        )
    }

    /// A derived logger with several scoped fields at once.
    ///
    /// Empty keys are dropped, later duplicates in the same call override
    /// earlier ones, and shadowing a reserved name is allowed but reported
    /// through selflog. Both drops and shadows are diagnosed, never errors.
    #[must_use]
    pub fn with(&self, fields: &[(&str, Value)]) -> Self {
        let mut merged = self.scoped.pairs();
        for (key, value) in fields {
            if key.is_empty() {
                if selflog::is_enabled() {
                    selflog::report("logger", "with() dropped a field with an empty key");
                }
                continue;
            }
            if RESERVED_NAMES.contains(key) && selflog::is_enabled() {
                selflog::report("logger", &format!("with() shadows reserved name '{key}'"));
            }
            match merged.iter_mut().find(|(k, _)| k.as_str() == *key) {
                Some(slot) => slot.1 = value.clone(),
                None => merged.push(((*key).to_string(), value.clone())),
            }
        }
        let mut derived = self.clone();
        derived.scoped = ScopedFields::from_pairs(merged);
        derived
    }

    /// A derived logger that layers the carrier's property stack and
    /// well-known values onto every event.
    ///
    /// The stack enricher runs before the carrier enricher and both add only
    /// absent properties, so precedence is event-literal, then scoped, then
    /// stack, then carrier.
    #[must_use]
    pub fn with_context(&self, ctx: &Context) -> Self {
        let mut derived = self.clone();
        derived
            .context_enrichers
            .push(Arc::new(ContextStackEnricher::new(ctx.clone())));
        derived
            .context_enrichers
            .push(Arc::new(CarrierEnricher::new(ctx.clone())));
        derived
    }

    // Sampling --------------------------------------------------------------

    fn sampled(&self, sampler: Arc<dyn SamplingFilter>) -> Self {
        let mut derived = self.clone();
        derived.samplers.push(sampler);
        derived
    }

    /// A derived logger passing one event in every `n`.
    #[must_use]
    pub fn sample(&self, n: u64) -> Self {
        self.sampled(Arc::new(CounterSampler::every(n)))
    }

    /// A derived logger passing approximately the given proportion.
    #[must_use]
    pub fn sample_rate(&self, rate: f64) -> Self {
        self.sampled(Arc::new(RateSampler::proportion(rate)))
    }

    /// A derived logger passing at most one event per window.
    #[must_use]
    pub fn sample_duration(&self, window: Duration) -> Self {
        self.sampled(Arc::new(DurationSampler::new(window)))
    }

    /// A derived logger passing only the first `n` events.
    #[must_use]
    pub fn sample_first(&self, n: u64) -> Self {
        self.sampled(Arc::new(FirstNSampler::new(n)))
    }

    /// A derived logger sharing an every-Nth counter under a group name.
    #[must_use]
    pub fn sample_group(&self, name: impl Into<String>, n: u64) -> Self {
        self.sampled(Arc::new(GroupSampler::new(name, n)))
    }

    /// A derived logger sampling every `n`-th event while the predicate
    /// holds and rejecting otherwise.
    #[must_use]
    pub fn sample_when(&self, predicate: impl Fn() -> bool + Send + Sync + 'static, n: u64) -> Self {
        self.sampled(Arc::new(ConditionalSampler::new(predicate, n)))
    }

    /// A derived logger backing off geometrically per occurrence key.
    #[must_use]
    pub fn sample_backoff(&self, key: impl Into<String>, factor: f64) -> Self {
        self.sampled(Arc::new(BackoffSampler::new(key, factor)))
    }

    /// A derived logger steering toward a target events-per-second.
    #[must_use]
    pub fn sample_adaptive(&self, target_events_per_second: f64) -> Self {
        self.sampled(Arc::new(AdaptiveSampler::new(target_events_per_second)))
    }

    /// Adaptive sampling with explicit tuning.
    #[must_use]
    pub fn sample_adaptive_with_options(&self, options: AdaptiveOptions) -> Self {
        self.sampled(Arc::new(AdaptiveSampler::with_options(options)))
    }

    /// A derived logger using an explicit strategy, such as a composite
    /// built by [`SamplingConfigBuilder`](crate::sampling::SamplingConfigBuilder).
    #[must_use]
    pub fn sample_with(&self, strategy: Arc<dyn SamplingFilter>) -> Self {
        self.sampled(strategy)
    }

    /// A derived logger sampling per a registered profile.
    ///
    /// # Errors
    /// Fails when the profile is unknown or version migration is refused.
    pub fn sample_profile(&self, name: &str, version: Option<u32>) -> Result<Self, Error> {
        Ok(self.sampled(ProfileRegistry::global().resolve(name, version)?))
    }

    /// Resets every sampling strategy attached to this logger.
    pub fn reset_sampling(&self) {
        for sampler in &self.samplers {
            sampler.reset();
        }
    }

    /// Resets a named group's shared counter.
    pub fn reset_sampling_group(&self, name: &str) {
        sampling::reset_group(name);
    }

    /// Aggregated `(sampled, skipped)` over this logger's strategies.
    #[must_use]
    pub fn sampling_stats(&self) -> SamplingStats {
        self.samplers
            .iter()
            .fold(SamplingStats::default(), |acc, s| acc.merged(s.stats()))
    }

    /// Starts the periodic sampling summary; the returned guard stops and
    /// joins the task when cancelled or dropped.
    #[must_use]
    pub fn enable_sampling_summary(&self, interval: Duration) -> SummaryGuard {
        sampling::start_summary(self.clone(), interval)
    }

    /// A clone with no sampling attached; summary emission uses this so its
    /// own events are never sampled away.
    pub(crate) fn unsampled(&self) -> Self {
        let mut cleared = self.clone();
        cleared.samplers.clear();
        cleared
    }

    // Lifecycle -------------------------------------------------------------

    /// Closes every sink advertising a close capability.
    ///
    /// # Errors
    /// The first sink close failure; all sinks are attempted regardless.
    pub fn close(&self) -> Result<(), Error> {
        self.pipeline.close()
    }

    // Dispatch --------------------------------------------------------------

    fn dispatch(
        &self,
        level: Level,
        raw_template: &str,
        args: &[Value],
        ctx: Option<&Context>,
        caller: &'static Location<'static>,
    ) {
        // Fast path: nothing to bind, scope, enrich, filter, or sample, and
        // the template cannot contain a property token.
        if args.is_empty()
            && ctx.is_none()
            && self.scoped.is_empty()
            && self.context_enrichers.is_empty()
            && self.samplers.is_empty()
            && self.pipeline.is_trivial()
            && !raw_template.contains('{')
        {
            let timestamp = Utc::now();
            let mut fallback = None;
            for sink in self.pipeline.sinks() {
                if !sink.emit_simple(timestamp, level, raw_template) {
                    let event = fallback.get_or_insert_with(|| {
                        let mut event = LogEvent::new(level, raw_template);
                        event.timestamp = timestamp;
                        event.caller = Some(caller);
                        event
                    });
                    if let Err(e) = sink.emit(event)
                        && selflog::is_enabled()
                    {
                        selflog::report(
                            "pipeline",
                            &format!("sink '{}' failed: {e}", sink.name()),
                        );
                    }
                }
            }
            return;
        }

        let parsed = match template::parse_cached(raw_template) {
            Ok(parsed) => parsed,
            Err(e) => {
                if selflog::is_enabled() {
                    selflog::report("logger", &format!("template fell back to literal: {e}"));
                }
                Arc::new(crate::template::MessageTemplate::literal(raw_template))
            }
        };

        let mut event = LogEvent::new(level, raw_template);
        event.caller = Some(caller);
        event.properties = template::bind_properties(&parsed, args, self.pipeline.capturer());

        self.scoped.apply(&mut event);
        if let Some(ctx) = ctx {
            ContextStackEnricher::new(ctx.clone()).enrich(&mut event);
            CarrierEnricher::new(ctx.clone()).enrich(&mut event);
        }
        for enricher in &self.context_enrichers {
            enricher.enrich(&mut event);
        }
        self.pipeline.enrich(&mut event);

        if !self.pipeline.is_enabled(&event) {
            return;
        }
        // Cascade semantics: a later sampler only sees events earlier ones
        // accepted, which `all` gives us by short-circuiting.
        if !self.samplers.iter().all(|s| s.is_enabled(&event)) {
            return;
        }
        self.pipeline.emit(&event);
    }
}
