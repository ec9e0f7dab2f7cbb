//! Tests for the dynamic value model.

use chrono::{TimeZone, Utc};
use mtlog::Value;

#[test]
fn scalar_conversions() {
    assert_eq!(Value::from(true), Value::Bool(true));
    assert_eq!(Value::from(-3i32), Value::Int(-3));
    assert_eq!(Value::from(3u32), Value::Uint(3));
    assert_eq!(Value::from(1.5f64), Value::Float(1.5));
    assert_eq!(Value::from("s"), Value::Str("s".to_string()));
    assert_eq!(Value::from(String::from("s")), Value::Str("s".to_string()));
}

#[test]
fn option_and_vec_conversions() {
    assert_eq!(Value::from(None::<i32>), Value::Null);
    assert_eq!(Value::from(Some(5)), Value::Int(5));
    assert_eq!(
        Value::from(vec![1, 2]),
        Value::Seq(vec![Value::Int(1), Value::Int(2)])
    );
}

#[test]
fn display_forms() {
    assert_eq!(Value::Null.to_string(), "null");
    assert_eq!(Value::from("bare").to_string(), "bare");
    assert_eq!(Value::from(vec![1, 2]).to_string(), "[1, 2]");
    let s = Value::Struct {
        name: "User".to_string(),
        fields: vec![("id".to_string(), Value::from(1))],
    };
    assert_eq!(s.to_string(), "User { id: 1 }");
}

#[test]
fn time_displays_rfc3339() {
    let ts = Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap();
    assert_eq!(Value::Time(ts).to_string(), "2026-01-02T03:04:05Z");
}

#[test]
fn json_projection() {
    let v = Value::Map(vec![
        ("n".to_string(), Value::from(1)),
        ("s".to_string(), Value::from("x")),
    ]);
    assert_eq!(
        serde_json::to_string(&v.to_json()).unwrap(),
        r#"{"n":1,"s":"x"}"#
    );
}
