//! Tests for logger construction, level gating, and scoping.

use mtlog::{Level, LevelSwitch, Logger, MemorySink, Value};
use std::sync::Arc;

fn capture(min: Level) -> (Logger, Arc<MemorySink>) {
    let sink = MemorySink::shared();
    let logger = Logger::builder()
        .minimum_level(min)
        .sink_shared(sink.clone())
        .build();
    (logger, sink)
}

#[test]
fn builder_default_minimum_is_information() {
    let logger = Logger::builder().build();
    assert_eq!(logger.minimum_level(), Level::Information);
}

#[test]
fn below_minimum_calls_produce_no_events() {
    let (log, sink) = capture(Level::Information);
    log.debug("x", &[]);
    log.information("User {UserId} in", &[Value::from(42)]);
    let events = sink.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].level, Level::Information);
    assert_eq!(events[0].template, "User {UserId} in");
    assert_eq!(events[0].property("UserId"), Some(&Value::from(42)));
}

#[test]
fn is_enabled_reflects_minimum() {
    let (log, _sink) = capture(Level::Warning);
    assert!(!log.is_enabled(Level::Information));
    assert!(log.is_enabled(Level::Warning));
    assert!(log.is_enabled(Level::Fatal));
}

#[test]
fn level_switch_changes_take_effect_immediately() {
    let sink = MemorySink::shared();
    let switch = Arc::new(LevelSwitch::new(Level::Warning));
    let log = Logger::builder()
        .level_switch(switch.clone())
        .sink_shared(sink.clone())
        .build();

    log.info("a", &[]);
    switch.set_level(Level::Debug);
    log.debug("b", &[]);

    let events = sink.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].template, "b");
}

#[test]
fn level_switch_is_shared_between_derived_loggers() {
    let switch = Arc::new(LevelSwitch::new(Level::Error));
    let log = Logger::builder().level_switch(switch.clone()).build();
    let derived = log.for_context("A", 1);
    assert_eq!(derived.minimum_level(), Level::Error);
    switch.set_level(Level::Verbose);
    assert_eq!(derived.minimum_level(), Level::Verbose);
    assert!(Arc::ptr_eq(&switch, &derived.level_switch().unwrap()));
}

#[test]
fn info_and_warn_aliases() {
    let (log, sink) = capture(Level::Verbose);
    log.info("i", &[]);
    log.warn("w", &[]);
    let events = sink.events();
    assert_eq!(events[0].level, Level::Information);
    assert_eq!(events[1].level, Level::Warning);
}

#[test]
fn for_context_adds_scoped_property() {
    let (log, sink) = capture(Level::Verbose);
    log.for_context("Component", "billing")
        .information("ok", &[]);
    assert_eq!(
        sink.events()[0].property("Component"),
        Some(&Value::from("billing"))
    );
}

#[test]
fn for_context_does_not_affect_parent() {
    let (log, sink) = capture(Level::Verbose);
    let _derived = log.for_context("Component", "billing");
    log.information("plain", &[]);
    assert_eq!(sink.events()[0].property("Component"), None);
}

#[test]
fn event_literal_beats_scoped_property() {
    let (log, sink) = capture(Level::Verbose);
    log.for_context("Name", "scoped")
        .information("hi {Name}", &[Value::from("literal")]);
    assert_eq!(
        sink.events()[0].property("Name"),
        Some(&Value::from("literal"))
    );
}

#[test]
fn with_adds_multiple_fields() {
    let (log, sink) = capture(Level::Verbose);
    log.with(&[("A", Value::from(1)), ("B", Value::from(2))])
        .information("ok", &[]);
    let event = &sink.events()[0];
    assert_eq!(event.property("A"), Some(&Value::from(1)));
    assert_eq!(event.property("B"), Some(&Value::from(2)));
}

#[test]
fn with_later_duplicate_overrides_earlier() {
    let (log, sink) = capture(Level::Verbose);
    log.with(&[("K", Value::from(1)), ("K", Value::from(2))])
        .information("ok", &[]);
    assert_eq!(sink.events()[0].property("K"), Some(&Value::from(2)));
}

#[test]
fn with_drops_empty_keys() {
    let (log, sink) = capture(Level::Verbose);
    log.with(&[("", Value::from(1)), ("K", Value::from(2))])
        .information("ok", &[]);
    let event = &sink.events()[0];
    assert_eq!(event.property(""), None);
    assert_eq!(event.property("K"), Some(&Value::from(2)));
}

#[test]
fn with_beyond_flat_limit_still_resolves() {
    let (log, sink) = capture(Level::Verbose);
    let names: Vec<String> = (0..80).map(|i| format!("F{i}")).collect();
    let fields: Vec<(&str, Value)> = names
        .iter()
        .map(|n| (n.as_str(), Value::from(1)))
        .collect();
    log.with(&fields).information("ok", &[]);
    let event = &sink.events()[0];
    assert_eq!(event.property("F0"), Some(&Value::from(1)));
    assert_eq!(event.property("F79"), Some(&Value::from(1)));
}

#[test]
fn for_source_context_sets_property() {
    let (log, sink) = capture(Level::Verbose);
    log.for_source_context("Billing").information("ok", &[]);
    assert_eq!(
        sink.events()[0].property("SourceContext"),
        Some(&Value::from("Billing"))
    );
}

#[test]
fn close_propagates_first_sink_error() {
    struct FailingClose;
    impl mtlog::Sink for FailingClose {
        fn emit(&self, _event: &mtlog::LogEvent) -> Result<(), mtlog::Error> {
            Ok(())
        }
        fn close(&self) -> Result<(), mtlog::Error> {
            Err(mtlog::Error::Format("close failed".to_string()))
        }
    }
    let log = Logger::builder().sink(FailingClose).build();
    assert!(log.close().is_err());
}

#[test]
fn try_build_rejects_zero_capture_depth() {
    let result = Logger::builder()
        .capture_limits(mtlog::CaptureLimits {
            max_depth: 0,
            max_string_len: 10,
            max_collection_len: 10,
        })
        .try_build();
    assert!(result.is_err());
}
