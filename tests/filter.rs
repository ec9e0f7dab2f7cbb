//! Tests for the standalone filter set.

use mtlog::filter::{
    ExpressionFilter, Filter, HashFilter, MatchTarget, MinimumLevelFilter, PredicateFilter,
    PropertyMatchFilter, RateFilter, SwitchFilter,
};
use mtlog::{Level, LevelSwitch, LogEvent, Value};
use std::sync::Arc;

fn event(level: Level, template: &str) -> LogEvent {
    LogEvent::new(level, template)
}

#[test]
fn minimum_level_filter_gates_by_severity() {
    let filter = MinimumLevelFilter::new(Level::Warning);
    assert!(!filter.is_enabled(&event(Level::Information, "x")));
    assert!(filter.is_enabled(&event(Level::Warning, "x")));
}

#[test]
fn switch_filter_follows_the_switch() {
    let switch = Arc::new(LevelSwitch::new(Level::Error));
    let filter = SwitchFilter::new(switch.clone());
    assert!(!filter.is_enabled(&event(Level::Warning, "x")));
    switch.set_level(Level::Verbose);
    assert!(filter.is_enabled(&event(Level::Warning, "x")));
}

#[test]
fn predicate_filter_sees_the_event() {
    let filter = PredicateFilter::new(|e| e.template.contains("keep"));
    assert!(filter.is_enabled(&event(Level::Information, "keep me")));
    assert!(!filter.is_enabled(&event(Level::Information, "drop me")));
}

#[test]
fn property_match_presence_and_equality() {
    let mut with_prop = event(Level::Information, "x");
    with_prop.add_property("Region", Value::from("eu"));

    assert!(PropertyMatchFilter::present("Region").is_enabled(&with_prop));
    assert!(!PropertyMatchFilter::present("Region").is_enabled(&event(Level::Information, "x")));
    assert!(PropertyMatchFilter::equals("Region", "eu").is_enabled(&with_prop));
    assert!(!PropertyMatchFilter::equals("Region", "us").is_enabled(&with_prop));
}

#[test]
fn rate_filter_passes_every_nth() {
    let filter = RateFilter::every(3);
    let e = event(Level::Information, "x");
    let decisions: Vec<bool> = (0..6).map(|_| filter.is_enabled(&e)).collect();
    assert_eq!(decisions, vec![true, false, false, true, false, false]);
}

#[test]
fn hash_filter_is_deterministic_per_template() {
    let filter = HashFilter::proportion(0.5);
    let e = event(Level::Information, "stable template {X}");
    let first = filter.is_enabled(&e);
    for _ in 0..10 {
        assert_eq!(filter.is_enabled(&e), first);
    }
}

#[test]
fn hash_filter_extremes() {
    let all = HashFilter::proportion(1.0);
    let none = HashFilter::proportion(0.0);
    let e = event(Level::Information, "whatever {X}");
    assert!(all.is_enabled(&e));
    assert!(!none.is_enabled(&e));
}

#[test]
fn expression_filter_matches_rendered_message() {
    let filter = ExpressionFilter::new(MatchTarget::Message, r"user \d+").unwrap();
    let mut e = event(Level::Information, "hello user {Id}");
    e.add_property("Id", Value::from(42));
    assert!(filter.is_enabled(&e));
}

#[test]
fn expression_filter_matches_named_property() {
    let filter = ExpressionFilter::new(MatchTarget::Property("Path".to_string()), r"^/api/").unwrap();
    let mut e = event(Level::Information, "req {Path}");
    e.add_property("Path", Value::from("/api/users"));
    assert!(filter.is_enabled(&e));
    let mut other = event(Level::Information, "req {Path}");
    other.add_property("Path", Value::from("/health"));
    assert!(!filter.is_enabled(&other));
}

#[test]
fn expression_filter_rejects_bad_patterns_at_construction() {
    assert!(ExpressionFilter::new(MatchTarget::Template, "(unclosed").is_err());
}
