//! Tests for message template parsing.

use mtlog::template::{CaptureHint, MessageTemplate, Token};

#[test]
fn parses_literal_only() {
    let t = MessageTemplate::parse("no placeholders here").unwrap();
    assert_eq!(
        t.tokens(),
        &[Token::Text("no placeholders here".to_string())]
    );
    assert!(t.property_names().is_empty());
}

#[test]
fn parses_single_property() {
    let t = MessageTemplate::parse("User {UserId} logged in").unwrap();
    assert_eq!(t.property_names(), vec!["UserId"]);
    let Token::Property(p) = &t.tokens()[1] else {
        panic!("expected property token");
    };
    assert_eq!(p.name, "UserId");
    assert_eq!(p.hint, CaptureHint::Default);
    assert_eq!(p.format, None);
    assert_eq!(p.alignment, None);
}

#[test]
fn parses_capture_and_stringify_hints() {
    let t = MessageTemplate::parse("{@Order} and {$Error}").unwrap();
    let props: Vec<_> = t
        .tokens()
        .iter()
        .filter_map(|tok| match tok {
            Token::Property(p) => Some(p),
            Token::Text(_) => None,
        })
        .collect();
    assert_eq!(props[0].hint, CaptureHint::Capture);
    assert_eq!(props[1].hint, CaptureHint::Stringify);
}

#[test]
fn parses_alignment_and_format() {
    let t = MessageTemplate::parse("{Name,-10:X8}").unwrap();
    let Token::Property(p) = &t.tokens()[0] else {
        panic!("expected property token");
    };
    assert_eq!(p.alignment, Some(-10));
    assert_eq!(p.format.as_deref(), Some("X8"));
}

#[test]
fn doubled_braces_are_literal() {
    let t = MessageTemplate::parse("a {{literal}} b").unwrap();
    assert_eq!(t.tokens(), &[Token::Text("a {literal} b".to_string())]);
}

#[test]
fn dotted_and_underscored_names_parse() {
    let t = MessageTemplate::parse("{http.status_code} {_private}").unwrap();
    assert_eq!(t.property_names(), vec!["http.status_code", "_private"]);
}

#[test]
fn repeated_name_keeps_first_occurrence_order() {
    let t = MessageTemplate::parse("{B} {A} {B}").unwrap();
    assert_eq!(t.property_names(), vec!["B", "A"]);
}

#[test]
fn all_positional_detection() {
    assert!(MessageTemplate::parse("The {0} {1} fox").unwrap().all_positional());
    assert!(!MessageTemplate::parse("The {0} {Name} fox").unwrap().all_positional());
    assert!(!MessageTemplate::parse("no properties").unwrap().all_positional());
}

#[test]
fn unclosed_brace_is_an_error() {
    assert!(MessageTemplate::parse("User {UserId logged in").is_err());
}

#[test]
fn empty_property_name_is_an_error() {
    assert!(MessageTemplate::parse("User {} logged in").is_err());
}

#[test]
fn invalid_property_name_is_an_error() {
    assert!(MessageTemplate::parse("{bad-name}").is_err());
    assert!(MessageTemplate::parse("{1abc}").is_err());
}

#[test]
fn malformed_alignment_is_an_error() {
    assert!(MessageTemplate::parse("{Name,abc}").is_err());
}

#[test]
fn empty_format_specifier_is_an_error() {
    assert!(MessageTemplate::parse("{Name:}").is_err());
}

#[test]
fn parse_is_idempotent() {
    let raw = "User {UserId,8:000} did {{that}} at {Ts:HH:mm}";
    let once = MessageTemplate::parse(raw).unwrap();
    let twice = MessageTemplate::parse(once.raw()).unwrap();
    assert_eq!(once, twice);
}

#[test]
fn cached_parse_returns_shared_template() {
    let a = mtlog::template::parse_cached("cache me {X}").unwrap();
    let b = mtlog::template::parse_cached("cache me {X}").unwrap();
    assert!(std::sync::Arc::ptr_eq(&a, &b));
}
