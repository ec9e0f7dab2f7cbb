//! Message templates: parsing, rendering, caching, and argument binding.
//!
//! A template like `"User {UserId} logged in from {@Device}"` is parsed once
//! into tokens, kept verbatim on every event it produces, and rendered on
//! demand. The raw string doubles as the event type: the same template with
//! different argument values is one analysable class at the backend.

mod cache;
mod format;
mod parser;
mod render;

pub use cache::{clear_template_cache, parse_cached};

use crate::capture::Capturer;
use crate::error::Error;
use crate::value::Value;
use std::collections::HashMap;

/// How a property token wants its argument treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaptureHint {
    /// `{Name}`: scalar; complex values render via their display form.
    #[default]
    Default,
    /// `{@Name}`: structural capture into a property tree.
    Capture,
    /// `{$Name}`: forced stringification.
    Stringify,
}

/// A single parsed template token.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Literal text; `{{`/`}}` arrive here already unescaped.
    Text(String),
    /// A `{...}` placeholder.
    Property(PropertyToken),
}

/// A parsed `{hint Name,alignment:format}` placeholder.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyToken {
    /// Property name; all-digit names denote positional indices.
    pub name: String,
    /// Capture hint prefix.
    pub hint: CaptureHint,
    /// Format specifier after `:`, if any.
    pub format: Option<String>,
    /// Alignment width after `,`; negative left-aligns.
    pub alignment: Option<i32>,
    /// Original source text, emitted verbatim when the property is unset.
    pub raw: String,
}

/// A parsed message template: the raw string plus its token stream.
#[derive(Debug, Clone, PartialEq)]
pub struct MessageTemplate {
    raw: String,
    tokens: Vec<Token>,
}

impl MessageTemplate {
    /// Parses a raw template.
    ///
    /// # Errors
    /// Reports unclosed braces, empty or invalid property names, malformed
    /// alignments, and empty format specifiers.
    pub fn parse(raw: &str) -> Result<Self, Error> {
        Ok(Self {
            raw: raw.to_string(),
            tokens: parser::tokenize(raw)?,
        })
    }

    /// A template consisting of a single literal token.
    ///
    /// Used as the fallback when parsing fails at log time, so the raw string
    /// is still emitted.
    #[must_use]
    pub fn literal(raw: &str) -> Self {
        Self {
            raw: raw.to_string(),
            tokens: vec![Token::Text(raw.to_string())],
        }
    }

    /// The raw template text.
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The parsed token stream.
    #[must_use]
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Ordered property names; repeats keep the position of first occurrence.
    #[must_use]
    pub fn property_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for token in &self.tokens {
            if let Token::Property(p) = token
                && !names.contains(&p.name.as_str())
            {
                names.push(&p.name);
            }
        }
        names
    }

    /// Distinct property tokens in first-occurrence order.
    fn distinct_properties(&self) -> Vec<&PropertyToken> {
        let mut seen: Vec<&PropertyToken> = Vec::new();
        for token in &self.tokens {
            if let Token::Property(p) = token
                && !seen.iter().any(|q| q.name == p.name)
            {
                seen.push(p);
            }
        }
        seen
    }

    /// Whether every property name is an unsigned integer (positional mode).
    #[must_use]
    pub fn all_positional(&self) -> bool {
        let props = self.distinct_properties();
        !props.is_empty()
            && props
                .iter()
                .all(|p| !p.name.is_empty() && p.name.bytes().all(|b| b.is_ascii_digit()))
    }

    /// Substitutes property values into the token stream.
    ///
    /// Unknown property names render as their original `{name}` text.
    #[must_use]
    pub fn render(&self, properties: &HashMap<String, Value>) -> String {
        render::render_tokens(&self.tokens, properties)
    }
}

/// Binds call arguments to template properties.
///
/// All-integer names select arguments by index; otherwise the i-th distinct
/// name receives the i-th argument, and surplus arguments are stored under
/// their positional index as a key. `@` tokens run through the capturer and
/// `$` tokens are stringified here, before any enricher sees the event.
#[must_use]
pub(crate) fn bind_properties(
    template: &MessageTemplate,
    args: &[Value],
    capturer: &dyn Capturer,
) -> HashMap<String, Value> {
    let props = template.distinct_properties();
    let mut bound = HashMap::with_capacity(args.len().max(props.len()));

    if template.all_positional() {
        for prop in &props {
            if let Ok(index) = prop.name.parse::<usize>()
                && let Some(arg) = args.get(index)
            {
                bound.insert(prop.name.clone(), apply_hint(prop.hint, arg, capturer));
            }
        }
        return bound;
    }

    for (prop, arg) in props.iter().zip(args.iter()) {
        bound.insert(prop.name.clone(), apply_hint(prop.hint, arg, capturer));
    }
    for (index, arg) in args.iter().enumerate().skip(props.len()) {
        bound.insert(index.to_string(), arg.clone());
    }
    bound
}

fn apply_hint(hint: CaptureHint, arg: &Value, capturer: &dyn Capturer) -> Value {
    match hint {
        CaptureHint::Capture => capturer.try_capture(arg).unwrap_or_else(|| arg.clone()),
        CaptureHint::Stringify => Value::Str(arg.to_string()),
        CaptureHint::Default => match arg {
            Value::Object(o) => o
                .log_value()
                .unwrap_or_else(|| Value::Str(arg.to_string())),
            _ => arg.clone(),
        },
    }
}
