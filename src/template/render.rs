//! Token-stream rendering: substitutes formatted values into the pre-parsed
//! segments. The hot path for every emitted message.

use super::format::format_value;
use super::{CaptureHint, Token};
use crate::value::Value;
use std::collections::HashMap;

pub(super) fn render_tokens(tokens: &[Token], properties: &HashMap<String, Value>) -> String {
    let mut out = String::new();
    for token in tokens {
        match token {
            Token::Text(text) => out.push_str(text),
            Token::Property(prop) => match properties.get(&prop.name) {
                None => out.push_str(&prop.raw),
                Some(value) => {
                    let rendered = if prop.hint == CaptureHint::Stringify {
                        value.to_string()
                    } else {
                        format_value(value, prop.format.as_deref())
                    };
                    push_aligned(&mut out, &rendered, prop.alignment);
                }
            },
        }
    }
    out
}

/// `,N` right-justifies (pads on the left), `,-N` left-justifies, both to at
/// least N display characters.
fn push_aligned(out: &mut String, rendered: &str, alignment: Option<i32>) {
    let Some(width) = alignment else {
        out.push_str(rendered);
        return;
    };
    let target = width.unsigned_abs() as usize;
    let len = rendered.chars().count();
    if len >= target {
        out.push_str(rendered);
        return;
    }
    let pad = target - len;
    if width > 0 {
        for _ in 0..pad {
            out.push(' ');
        }
        out.push_str(rendered);
    } else {
        out.push_str(rendered);
        for _ in 0..pad {
            out.push(' ');
        }
    }
}
