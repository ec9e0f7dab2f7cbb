//! Tests for the argument-binding rule, via a logger and memory sink.

use mtlog::{Level, Logger, MemorySink, Value};

fn capture() -> (Logger, std::sync::Arc<MemorySink>) {
    let sink = MemorySink::shared();
    let logger = Logger::builder()
        .minimum_level(Level::Verbose)
        .sink_shared(sink.clone())
        .build();
    (logger, sink)
}

#[test]
fn binds_by_position_for_named_properties() {
    let (log, sink) = capture();
    log.information(
        "{First} then {Second}",
        &[Value::from("a"), Value::from("b")],
    );
    let event = &sink.events()[0];
    assert_eq!(event.property("First"), Some(&Value::from("a")));
    assert_eq!(event.property("Second"), Some(&Value::from("b")));
}

#[test]
fn missing_arguments_leave_properties_unset() {
    let (log, sink) = capture();
    log.information("{First} then {Second}", &[Value::from("a")]);
    let event = &sink.events()[0];
    assert_eq!(event.property("First"), Some(&Value::from("a")));
    assert_eq!(event.property("Second"), None);
    assert_eq!(event.render_message(), "a then {Second}");
}

#[test]
fn excess_arguments_bind_to_positional_keys() {
    let (log, sink) = capture();
    log.information(
        "only {Name}",
        &[Value::from("x"), Value::from(10), Value::from(20)],
    );
    let event = &sink.events()[0];
    assert_eq!(event.property("Name"), Some(&Value::from("x")));
    assert_eq!(event.property("1"), Some(&Value::from(10)));
    assert_eq!(event.property("2"), Some(&Value::from(20)));
}

#[test]
fn integer_names_bind_by_index() {
    let (log, sink) = capture();
    log.information(
        "The {0} {1} fox",
        &[Value::from("quick"), Value::from("brown")],
    );
    let event = &sink.events()[0];
    assert_eq!(event.render_message(), "The quick brown fox");
    assert_eq!(event.property("0"), Some(&Value::from("quick")));
    assert_eq!(event.property("1"), Some(&Value::from("brown")));
}

#[test]
fn integer_names_select_by_value_not_order() {
    let (log, sink) = capture();
    log.information("{1} before {0}", &[Value::from("zero"), Value::from("one")]);
    let event = &sink.events()[0];
    assert_eq!(event.render_message(), "one before zero");
}

#[test]
fn integer_names_out_of_range_stay_unset() {
    let (log, sink) = capture();
    log.information("{0} and {5}", &[Value::from("only")]);
    let event = &sink.events()[0];
    assert_eq!(event.property("0"), Some(&Value::from("only")));
    assert_eq!(event.property("5"), None);
    assert_eq!(event.render_message(), "only and {5}");
}

#[test]
fn repeated_name_consumes_one_argument() {
    let (log, sink) = capture();
    log.information(
        "{Name} and {Name} again, then {Other}",
        &[Value::from("a"), Value::from("b")],
    );
    let event = &sink.events()[0];
    assert_eq!(event.property("Name"), Some(&Value::from("a")));
    assert_eq!(event.property("Other"), Some(&Value::from("b")));
    assert_eq!(event.render_message(), "a and a again, then b");
}

#[test]
fn malformed_template_still_emits_literal() {
    let (log, sink) = capture();
    log.information("oops {unclosed", &[]);
    let events = sink.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].template, "oops {unclosed");
    assert_eq!(events[0].render_message(), "oops {unclosed");
}
