//! Periodic emission of sampling totals.

use super::SamplingStats;
use crate::logger::Logger;
use crate::value::Value;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Owns the summary thread; dropping (or calling [`cancel`](Self::cancel))
/// stops and joins it. There is deliberately no fire-and-forget variant.
pub struct SummaryGuard {
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl SummaryGuard {
    /// Stops the summary thread and waits for it to exit.
    pub fn cancel(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for SummaryGuard {
    fn drop(&mut self) {
        self.shutdown();
    }
}

pub(crate) fn start_summary(logger: Logger, interval: Duration) -> SummaryGuard {
    const TICK: Duration = Duration::from_millis(20);
    let stop = Arc::new(AtomicBool::new(false));
    let thread_stop = Arc::clone(&stop);
    // The summary event must not be eaten by the very samplers it reports
    // on, so it goes out through an unsampled clone.
    let emitter = logger.unsampled();

    let handle = thread::Builder::new()
        .name("mtlog-sampling-summary".to_string())
        .spawn(move || {
            let mut last = SamplingStats::default();
            let mut last_emit = Instant::now();
            while !thread_stop.load(Ordering::Relaxed) {
                thread::sleep(TICK.min(interval));
                if thread_stop.load(Ordering::Relaxed) {
                    return;
                }
                if last_emit.elapsed() < interval {
                    continue;
                }
                let current = logger.sampling_stats();
                let sampled = current.sampled.saturating_sub(last.sampled);
                let skipped = current.skipped.saturating_sub(last.skipped);
                last = current;
                last_emit = Instant::now();
                if sampled == 0 && skipped == 0 {
                    continue;
                }
                emitter.information(
                    "Sampling summary: {Sampled} events sampled, {Skipped} skipped in the last {IntervalSeconds}s",
                    &[
                        Value::Uint(sampled),
                        Value::Uint(skipped),
                        Value::Uint(interval.as_secs()),
                    ],
                );
            }
        })
        .ok();

    SummaryGuard {
        stop,
        handle,
    }
}
