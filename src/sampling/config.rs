//! Builder accumulating sampling strategies.

use super::{
    AdaptiveOptions, AdaptiveSampler, BackoffSampler, CombineMode, CompositeSampler,
    ConditionalSampler, CounterSampler, DurationSampler, FirstNSampler, GroupSampler, RateSampler,
    SamplingFilter,
};
use std::sync::Arc;
use std::time::Duration;

/// Accumulates strategies; `build` yields them in insertion order for a
/// cascade (AND by short-circuit), while `combine_and`/`combine_or` wrap
/// them in a single composite evaluated against every event.
#[derive(Default)]
pub struct SamplingConfigBuilder {
    strategies: Vec<Arc<dyn SamplingFilter>>,
}

impl SamplingConfigBuilder {
    /// An empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds every-Nth sampling.
    #[must_use]
    pub fn every(mut self, n: u64) -> Self {
        self.strategies.push(Arc::new(CounterSampler::every(n)));
        self
    }

    /// Adds proportional sampling.
    #[must_use]
    pub fn rate(mut self, rate: f64) -> Self {
        self.strategies.push(Arc::new(RateSampler::proportion(rate)));
        self
    }

    /// Adds at-most-one-per-window sampling.
    #[must_use]
    pub fn duration(mut self, window: Duration) -> Self {
        self.strategies.push(Arc::new(DurationSampler::new(window)));
        self
    }

    /// Adds first-N sampling.
    #[must_use]
    pub fn first(mut self, n: u64) -> Self {
        self.strategies.push(Arc::new(FirstNSampler::new(n)));
        self
    }

    /// Adds group-shared every-Nth sampling.
    #[must_use]
    pub fn group(mut self, name: impl Into<String>, n: u64) -> Self {
        self.strategies.push(Arc::new(GroupSampler::new(name, n)));
        self
    }

    /// Adds predicate-gated every-Nth sampling.
    #[must_use]
    pub fn when(mut self, predicate: impl Fn() -> bool + Send + Sync + 'static, n: u64) -> Self {
        self.strategies
            .push(Arc::new(ConditionalSampler::new(predicate, n)));
        self
    }

    /// Adds keyed exponential backoff sampling.
    #[must_use]
    pub fn backoff(mut self, key: impl Into<String>, factor: f64) -> Self {
        self.strategies.push(Arc::new(BackoffSampler::new(key, factor)));
        self
    }

    /// Adds adaptive sampling toward a target throughput.
    #[must_use]
    pub fn adaptive(mut self, target_events_per_second: f64) -> Self {
        self.strategies
            .push(Arc::new(AdaptiveSampler::new(target_events_per_second)));
        self
    }

    /// Adds adaptive sampling with explicit tuning.
    #[must_use]
    pub fn adaptive_with(mut self, options: AdaptiveOptions) -> Self {
        self.strategies
            .push(Arc::new(AdaptiveSampler::with_options(options)));
        self
    }

    /// Adds a caller-supplied strategy.
    #[must_use]
    pub fn strategy(mut self, strategy: impl SamplingFilter + 'static) -> Self {
        self.strategies.push(Arc::new(strategy));
        self
    }

    /// The accumulated strategies, in pipeline (cascade) order.
    #[must_use]
    pub fn build(self) -> Vec<Arc<dyn SamplingFilter>> {
        self.strategies
    }

    /// Wraps the accumulated strategies so all must accept the same event.
    #[must_use]
    pub fn combine_and(self) -> Arc<CompositeSampler> {
        Arc::new(CompositeSampler::new(CombineMode::All, self.strategies))
    }

    /// Wraps the accumulated strategies so any acceptance passes the event.
    #[must_use]
    pub fn combine_or(self) -> Arc<CompositeSampler> {
        Arc::new(CompositeSampler::new(CombineMode::Any, self.strategies))
    }
}
