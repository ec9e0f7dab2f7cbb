//! Adaptive sampling toward a target event throughput.
//!
//! The sampler tracks an exponentially smoothed events-per-second estimate
//! and periodically steers its pass rate toward `target / observed`. The
//! adjustment loop applies hysteresis (small errors are ignored),
//! aggressiveness and dampening factors, a ±50%-per-step clamp, and an
//! oscillation detector: when the last three adjustments alternate in sign,
//! the effective dampening is halved until the loop settles.

use super::{SamplingFilter, SamplingStats, StatCounters};
use crate::event::LogEvent;
use crate::filter::Filter;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

const HISTORY_LIMIT: usize = 16;
const MAX_STEP: f64 = 0.5;
const MIN_DAMPENING: f64 = 0.05;

/// Tuning knobs for [`AdaptiveSampler`].
#[derive(Debug, Clone)]
pub struct AdaptiveOptions {
    /// Desired accepted-events-per-second.
    pub target_events_per_second: f64,
    /// How often the pass rate is recomputed.
    pub interval: Duration,
    /// Lower clamp on the pass rate.
    pub min_rate: f64,
    /// Upper clamp on the pass rate.
    pub max_rate: f64,
    /// Multiplier on the raw error before dampening.
    pub aggressiveness: f64,
    /// Relative error below which no adjustment is made.
    pub hysteresis: f64,
    /// Fraction of the computed correction actually applied.
    pub dampening: f64,
    /// Smoothing factor for the events-per-second estimate.
    pub ewma_alpha: f64,
}

impl Default for AdaptiveOptions {
    fn default() -> Self {
        Self {
            target_events_per_second: 100.0,
            interval: Duration::from_secs(1),
            min_rate: 0.001,
            max_rate: 1.0,
            aggressiveness: 1.0,
            hysteresis: 0.05,
            dampening: 0.7,
            ewma_alpha: 0.3,
        }
    }
}

#[derive(Debug)]
struct AdaptiveState {
    window_count: u64,
    window_start: Instant,
    ewma_eps: Option<f64>,
    history: VecDeque<f64>,
    dampening: f64,
    credit: f64,
}

/// Self-tuning proportional sampler.
#[derive(Debug)]
pub struct AdaptiveSampler {
    options: AdaptiveOptions,
    rate_bits: AtomicU64,
    state: Mutex<AdaptiveState>,
    stats: StatCounters,
}

impl AdaptiveSampler {
    /// A sampler steering toward `target` accepted events per second, with
    /// default tuning.
    #[must_use]
    pub fn new(target: f64) -> Self {
        Self::with_options(AdaptiveOptions {
            target_events_per_second: target,
            ..AdaptiveOptions::default()
        })
    }

    /// A sampler with explicit tuning. Rates are clamped into `(0, 1]` and
    /// the interval floored at one millisecond.
    #[must_use]
    pub fn with_options(mut options: AdaptiveOptions) -> Self {
        options.min_rate = options.min_rate.clamp(1e-6, 1.0);
        options.max_rate = options.max_rate.clamp(options.min_rate, 1.0);
        options.interval = options.interval.max(Duration::from_millis(1));
        options.dampening = options.dampening.clamp(MIN_DAMPENING, 1.0);
        let dampening = options.dampening;
        Self {
            options,
            rate_bits: AtomicU64::new(1.0_f64.to_bits()),
            state: Mutex::new(AdaptiveState {
                window_count: 0,
                window_start: Instant::now(),
                ewma_eps: None,
                history: VecDeque::new(),
                dampening,
                credit: 0.0,
            }),
            stats: StatCounters::new(),
        }
    }

    /// The current pass rate in `[min_rate, max_rate]`.
    #[must_use]
    pub fn current_rate(&self) -> f64 {
        f64::from_bits(self.rate_bits.load(Ordering::Relaxed))
    }

    fn maybe_adjust(&self, state: &mut AdaptiveState) {
        let elapsed = state.window_start.elapsed();
        if elapsed < self.options.interval {
            return;
        }
        let eps = state.window_count as f64 / elapsed.as_secs_f64().max(1e-9);
        let smoothed = match state.ewma_eps {
            Some(prev) => {
                self.options.ewma_alpha * eps + (1.0 - self.options.ewma_alpha) * prev
            }
            None => eps,
        };
        state.ewma_eps = Some(smoothed);
        state.window_count = 0;
        state.window_start = Instant::now();

        let current = self.current_rate();
        let desired = (self.options.target_events_per_second / smoothed.max(1e-9))
            .clamp(self.options.min_rate, self.options.max_rate);
        let error = (desired - current) / current.max(1e-9);
        if error.abs() <= self.options.hysteresis {
            return;
        }

        if oscillating(&state.history) {
            state.dampening = (state.dampening / 2.0).max(MIN_DAMPENING);
        } else {
            state.dampening = (state.dampening * 1.25).min(self.options.dampening);
        }

        let step = (error * self.options.aggressiveness * state.dampening)
            .clamp(-MAX_STEP, MAX_STEP);
        state.history.push_back(step);
        if state.history.len() > HISTORY_LIMIT {
            state.history.pop_front();
        }

        let next = (current * (1.0 + step)).clamp(self.options.min_rate, self.options.max_rate);
        self.rate_bits.store(next.to_bits(), Ordering::Relaxed);
    }
}

fn oscillating(history: &VecDeque<f64>) -> bool {
    if history.len() < 3 {
        return false;
    }
    let last3: Vec<f64> = history.iter().rev().take(3).copied().collect();
    last3[0].signum() != last3[1].signum() && last3[1].signum() != last3[2].signum()
}

impl Filter for AdaptiveSampler {
    fn is_enabled(&self, _event: &LogEvent) -> bool {
        let mut state = self.state.lock().expect("adaptive state poisoned");
        state.window_count += 1;
        self.maybe_adjust(&mut state);
        state.credit += self.current_rate();
        let accepted = state.credit >= 1.0;
        if accepted {
            state.credit -= 1.0;
        }
        drop(state);
        self.stats.record(accepted)
    }
}

impl SamplingFilter for AdaptiveSampler {
    fn stats(&self) -> SamplingStats {
        self.stats.snapshot()
    }

    fn reset(&self) {
        let mut state = self.state.lock().expect("adaptive state poisoned");
        state.window_count = 0;
        state.window_start = Instant::now();
        state.ewma_eps = None;
        state.history.clear();
        state.dampening = self.options.dampening;
        state.credit = 0.0;
        drop(state);
        self.rate_bits.store(1.0_f64.to_bits(), Ordering::Relaxed);
        self.stats.reset();
    }

    fn describe(&self) -> String {
        format!(
            "adaptive {}/s at rate {:.4}",
            self.options.target_events_per_second,
            self.current_rate()
        )
    }
}
