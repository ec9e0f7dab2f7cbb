//! Format specifier handling for property tokens.
//!
//! Numbers support zero-padding (`000`), fixed precision (`F2`), percentage
//! (`P1`), and hex (`X8`/`x8`). Any value supports `j` (JSON), `q` (quoted),
//! and `l` (literal). Time values take `r` for RFC 3339 or a
//! `yyyy-MM-dd HH:mm:ss.fff`-family layout, translated to chrono specifiers.

use crate::value::Value;

pub(super) fn format_value(value: &Value, format: Option<&str>) -> String {
    let Some(spec) = format else {
        return value.to_string();
    };

    match spec {
        "l" => return value.to_string(),
        "q" => {
            return match value {
                Value::Str(s) => format!("\"{s}\""),
                other => format!("\"{other}\""),
            };
        }
        "j" => {
            return serde_json::to_string(&value.to_json())
                .unwrap_or_else(|_| value.to_string());
        }
        _ => {}
    }

    if let Value::Time(t) = value {
        if spec == "r" {
            return t.to_rfc3339_opts(chrono::SecondsFormat::Secs, true);
        }
        return t.format(&translate_time_layout(spec)).to_string();
    }

    if let Some(formatted) = format_numeric(value, spec) {
        return formatted;
    }
    value.to_string()
}

fn format_numeric(value: &Value, spec: &str) -> Option<String> {
    let first = spec.chars().next()?;

    // All-zero specifiers pad the integer form to the specifier's width.
    if spec.bytes().all(|b| b == b'0') {
        let width = spec.len();
        return match value {
            Value::Int(i) => Some(format!("{i:0width$}")),
            Value::Uint(u) => Some(format!("{u:0width$}")),
            Value::Float(x) => Some(format!("{x:0width$}")),
            _ => None,
        };
    }

    let digits = |default| {
        spec[1..]
            .parse::<usize>()
            .ok()
            .filter(|_| !spec[1..].is_empty())
            .unwrap_or(default)
    };

    match first {
        'P' | 'p' => {
            let x = as_f64(value)?;
            let d = digits(2);
            Some(format!("{:.d$}%", x * 100.0, d = d))
        }
        'F' | 'f' => {
            let x = as_f64(value)?;
            let d = digits(2);
            Some(format!("{x:.d$}", d = d))
        }
        'X' => {
            let width = digits(0);
            match value {
                Value::Int(i) => Some(format!("{i:0width$X}")),
                Value::Uint(u) => Some(format!("{u:0width$X}")),
                _ => None,
            }
        }
        'x' => {
            let width = digits(0);
            match value {
                Value::Int(i) => Some(format!("{i:0width$x}")),
                Value::Uint(u) => Some(format!("{u:0width$x}")),
                _ => None,
            }
        }
        _ => None,
    }
}

fn as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Int(i) => Some(*i as f64),
        Value::Uint(u) => Some(*u as f64),
        Value::Float(x) => Some(*x),
        _ => None,
    }
}

/// Translates a dotnet-style date layout into chrono's strftime dialect.
///
/// Unrecognized characters pass through as literals, so separators like `-`,
/// `:`, `.`, and spaces survive untouched.
fn translate_time_layout(layout: &str) -> String {
    let mut out = String::with_capacity(layout.len() * 2);
    let chars: Vec<char> = layout.chars().collect();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        let run = chars[i..].iter().take_while(|&&x| x == c).count();
        let (spec, consumed): (&str, usize) = match (c, run) {
            ('y', 4..) => ("%Y", 4),
            ('y', _) => ("%y", run.min(2)),
            ('M', 4..) => ("%B", 4),
            ('M', 3) => ("%b", 3),
            ('M', 2) => ("%m", 2),
            ('M', _) => ("%-m", 1),
            ('d', 4..) => ("%A", 4),
            ('d', 3) => ("%a", 3),
            ('d', 2) => ("%d", 2),
            ('d', _) => ("%-d", 1),
            ('H', 2..) => ("%H", 2),
            ('H', _) => ("%-H", 1),
            ('h', 2..) => ("%I", 2),
            ('h', _) => ("%-I", 1),
            ('m', 2..) => ("%M", 2),
            ('m', _) => ("%-M", 1),
            ('s', 2..) => ("%S", 2),
            ('s', _) => ("%-S", 1),
            ('f', 1..=3) => ("%3f", run),
            ('f', 4..=6) => ("%6f", run),
            ('f', _) => ("%9f", run),
            ('t', 2..) => ("%p", 2),
            ('z', 3..) => ("%:z", 3),
            ('z', _) => ("%z", run),
            _ => {
                // `%` must be escaped so a literal percent survives strftime.
                if c == '%' {
                    out.push_str("%%");
                } else {
                    out.push(c);
                }
                i += 1;
                continue;
            }
        };
        out.push_str(spec);
        i += consumed;
    }
    out
}
