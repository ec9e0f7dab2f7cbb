//! Template tokenizer.
//!
//! One-time parse turns `"User {UserId} in"` into a token list for fast
//! repeated rendering; the cache in this module's sibling keeps parses from
//! recurring at all.

use super::{CaptureHint, PropertyToken, Token};
use crate::error::Error;

pub(super) fn tokenize(raw: &str) -> Result<Vec<Token>, Error> {
    let mut tokens = Vec::new();
    let mut text = String::new();
    let mut chars = raw.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        match c {
            '{' => {
                // `{{` is a literal brace.
                if matches!(chars.peek(), Some((_, '{'))) {
                    chars.next();
                    text.push('{');
                    continue;
                }
                let mut inner = String::new();
                let mut closed = false;
                for (_, pc) in chars.by_ref() {
                    if pc == '}' {
                        closed = true;
                        break;
                    }
                    inner.push(pc);
                }
                if !closed {
                    return Err(Error::Template {
                        raw: raw.to_string(),
                        position: i,
                        reason: "unclosed property token".to_string(),
                    });
                }
                if !text.is_empty() {
                    tokens.push(Token::Text(std::mem::take(&mut text)));
                }
                tokens.push(Token::Property(parse_property(&inner, i, raw)?));
            }
            '}' => {
                // `}}` is a literal brace; a lone `}` passes through as text.
                if matches!(chars.peek(), Some((_, '}'))) {
                    chars.next();
                }
                text.push('}');
            }
            _ => text.push(c),
        }
    }

    if !text.is_empty() {
        tokens.push(Token::Text(text));
    }
    Ok(tokens)
}

fn parse_property(inner: &str, position: usize, raw: &str) -> Result<PropertyToken, Error> {
    let err = |reason: &str| Error::Template {
        raw: raw.to_string(),
        position,
        reason: reason.to_string(),
    };

    let (hint, rest) = match inner.chars().next() {
        Some('@') => (CaptureHint::Capture, &inner[1..]),
        Some('$') => (CaptureHint::Stringify, &inner[1..]),
        _ => (CaptureHint::Default, inner),
    };

    // The format specifier begins at the first `:`; the alignment, if any,
    // sits between the name and that colon.
    let (head, format) = match rest.find(':') {
        Some(colon) => {
            let spec = &rest[colon + 1..];
            if spec.is_empty() {
                return Err(err("empty format specifier"));
            }
            (&rest[..colon], Some(spec.to_string()))
        }
        None => (rest, None),
    };

    let (name, alignment) = match head.find(',') {
        Some(comma) => {
            let width = &head[comma + 1..];
            let parsed: i32 = width
                .parse()
                .map_err(|_| err("malformed alignment width"))?;
            (&head[..comma], Some(parsed))
        }
        None => (head, None),
    };

    if name.is_empty() {
        return Err(err("empty property name"));
    }
    if !valid_name(name) {
        return Err(err("invalid property name"));
    }

    Ok(PropertyToken {
        name: name.to_string(),
        hint,
        format,
        alignment,
        raw: format!("{{{inner}}}"),
    })
}

/// `[A-Za-z_][A-Za-z0-9_.]*` or an unsigned integer.
fn valid_name(name: &str) -> bool {
    if name.bytes().all(|b| b.is_ascii_digit()) {
        return true;
    }
    let mut bytes = name.bytes();
    match bytes.next() {
        Some(b) if b.is_ascii_alphabetic() || b == b'_' => {}
        _ => return false,
    }
    bytes.all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'.')
}
