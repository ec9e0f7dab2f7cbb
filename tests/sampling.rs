//! Tests for the sampling strategies and their composition.

use mtlog::sampling::{SamplingConfigBuilder, SamplingFilter};
use mtlog::{Level, Logger, MemorySink, Value};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

fn capture() -> (Logger, Arc<MemorySink>) {
    let sink = MemorySink::shared();
    let logger = Logger::builder()
        .minimum_level(Level::Verbose)
        .sink_shared(sink.clone())
        .build();
    (logger, sink)
}

fn emit_numbered(log: &Logger, count: i32) {
    for i in 1..=count {
        log.information("event {N}", &[Value::from(i)]);
    }
}

fn numbers(sink: &MemorySink) -> Vec<i64> {
    sink.events()
        .iter()
        .filter_map(|e| match e.property("N") {
            Some(Value::Int(i)) => Some(*i),
            _ => None,
        })
        .collect()
}

#[test]
fn sample_every_third_takes_one_four_seven_ten() {
    let (log, sink) = capture();
    let sampled = log.sample(3);
    emit_numbered(&sampled, 10);
    assert_eq!(numbers(&sink), vec![1, 4, 7, 10]);
}

#[test]
fn sample_every_n_accepts_exactly_k_of_kn() {
    let (log, sink) = capture();
    let sampled = log.sample(5);
    emit_numbered(&sampled, 35);
    assert_eq!(sink.len(), 7);
}

#[test]
fn sample_one_passes_everything() {
    let (log, sink) = capture();
    emit_numbered(&log.sample(1), 4);
    assert_eq!(sink.len(), 4);
}

#[test]
fn sample_first_five_takes_one_through_five() {
    let (log, sink) = capture();
    let sampled = log.sample_first(5);
    emit_numbered(&sampled, 10);
    assert_eq!(numbers(&sink), vec![1, 2, 3, 4, 5]);
}

#[test]
fn sample_first_shorter_stream_takes_all() {
    let (log, sink) = capture();
    emit_numbered(&log.sample_first(10), 4);
    assert_eq!(sink.len(), 4);
}

#[test]
fn sample_first_zero_passes_none() {
    let (log, sink) = capture();
    emit_numbered(&log.sample_first(0), 5);
    assert_eq!(sink.len(), 0);
}

#[test]
fn sample_rate_half_accepts_half() {
    let (log, sink) = capture();
    emit_numbered(&log.sample_rate(0.5), 100);
    assert_eq!(sink.len(), 50);
}

#[test]
fn sample_rate_one_accepts_all_and_zero_none() {
    let (log, sink) = capture();
    emit_numbered(&log.sample_rate(1.0), 10);
    assert_eq!(sink.len(), 10);
    sink.clear();
    emit_numbered(&log.sample_rate(0.0), 10);
    assert_eq!(sink.len(), 0);
}

#[test]
fn sample_duration_accepts_once_per_window() {
    let (log, sink) = capture();
    let sampled = log.sample_duration(Duration::from_millis(80));
    emit_numbered(&sampled, 3);
    assert_eq!(sink.len(), 1);
    std::thread::sleep(Duration::from_millis(120));
    emit_numbered(&sampled, 3);
    assert_eq!(sink.len(), 2);
}

#[test]
fn sample_group_shares_counter_across_loggers() {
    let (log, sink) = capture();
    let a = log.sample_group("shared-counter-test", 4);
    let b = log.sample_group("shared-counter-test", 4);
    log.reset_sampling_group("shared-counter-test");
    emit_numbered(&a, 2);
    emit_numbered(&b, 2);
    // One shared counter: only the 1st of the 4 interleaved events passes.
    assert_eq!(sink.len(), 1);
}

#[test]
fn sample_when_counts_only_while_predicate_holds() {
    let (log, sink) = capture();
    let gate = Arc::new(AtomicBool::new(false));
    let observed = Arc::clone(&gate);
    let sampled = log.sample_when(move || observed.load(Ordering::Relaxed), 1);

    emit_numbered(&sampled, 3);
    assert_eq!(sink.len(), 0);
    gate.store(true, Ordering::Relaxed);
    emit_numbered(&sampled, 3);
    assert_eq!(sink.len(), 3);
}

#[test]
fn sample_backoff_accepts_geometrically() {
    let (log, sink) = capture();
    let sampled = log.sample_backoff("backoff-occurrence-test", 3.0);
    emit_numbered(&sampled, 10);
    // Occurrences 1, 2, ⌈3⌉, ⌈9⌉ pass within the first ten.
    assert_eq!(numbers(&sink), vec![1, 2, 3, 9]);
}

#[test]
fn sample_backoff_factor_below_one_is_corrected() {
    let (log, sink) = capture();
    let sampled = log.sample_backoff("backoff-clamped-test", 0.5);
    emit_numbered(&sampled, 8);
    // Clamped to factor 2: occurrences 1, 2, ⌈2⌉ (skipped, already passed),
    // ⌈4⌉, ⌈8⌉ pass.
    assert_eq!(numbers(&sink), vec![1, 2, 4, 8]);
}

#[test]
fn cascaded_samplers_have_and_semantics() {
    let (log, sink) = capture();
    // first(6) sees all events; every-2nd only sees the six survivors.
    let sampled = log.sample_first(6).sample(2);
    emit_numbered(&sampled, 10);
    assert_eq!(numbers(&sink), vec![1, 3, 5]);
}

#[test]
fn sampling_stats_count_both_outcomes() {
    let (log, _sink) = capture();
    let sampled = log.sample(3);
    emit_numbered(&sampled, 9);
    let stats = sampled.sampling_stats();
    assert_eq!(stats.sampled, 3);
    assert_eq!(stats.skipped, 6);
}

#[test]
fn reset_sampling_restarts_counters() {
    let (log, sink) = capture();
    let sampled = log.sample(3);
    emit_numbered(&sampled, 2);
    sampled.reset_sampling();
    sink.clear();
    emit_numbered(&sampled, 3);
    // After reset the next event is occurrence 1 again.
    assert_eq!(numbers(&sink), vec![1]);
    assert_eq!(sampled.sampling_stats().sampled, 1);
}

#[test]
fn composite_and_requires_every_strategy() {
    let composite = SamplingConfigBuilder::new().every(2).first(3).combine_and();
    let (log, sink) = capture();
    let derived = log.sample_with(composite);
    emit_numbered(&derived, 6);
    // every(2) passes 1,3,5; first(3) passes 1,2,3; AND leaves 1 and 3.
    assert_eq!(numbers(&sink), vec![1, 3]);
}

#[test]
fn composite_or_passes_when_any_accepts() {
    let composite = SamplingConfigBuilder::new().every(3).first(2).combine_or();
    let (log, sink) = capture();
    let derived = log.sample_with(composite);
    emit_numbered(&derived, 6);
    // every(3) passes 1,4; first(2) passes 1,2; OR yields 1,2,4.
    assert_eq!(numbers(&sink), vec![1, 2, 4]);
}

#[test]
fn builder_cascade_order_is_insertion_order() {
    let strategies = SamplingConfigBuilder::new().first(4).every(2).build();
    assert_eq!(strategies.len(), 2);
    assert!(strategies[0].describe().starts_with("first"));
    assert!(strategies[1].describe().starts_with("every"));
}

#[test]
fn adaptive_sampler_starts_wide_open() {
    let (log, sink) = capture();
    let sampled = log.sample_adaptive(1_000_000.0);
    emit_numbered(&sampled, 5);
    // Until the first adjustment interval elapses the rate stays at 1.0.
    assert_eq!(sink.len(), 5);
}

#[test]
fn sampling_summary_emits_and_cancels() {
    let (log, sink) = capture();
    let sampled = log.sample(2);
    emit_numbered(&sampled, 6);
    let guard = sampled.enable_sampling_summary(Duration::from_millis(50));
    std::thread::sleep(Duration::from_millis(200));
    guard.cancel();
    let summaries: Vec<_> = sink
        .events()
        .into_iter()
        .filter(|e| e.template.starts_with("Sampling summary"))
        .collect();
    assert!(!summaries.is_empty());
    assert_eq!(summaries[0].level, Level::Information);
    assert_eq!(summaries[0].property("Sampled"), Some(&Value::from(3u64)));
}
