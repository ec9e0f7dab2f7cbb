//! Structural capture of complex values.
//!
//! A `{@Name}` token asks for the argument as a property tree rather than a
//! string. The capturer honours the safe-value hook first, short-circuits
//! registered scalar-like types to their string form, and bounds recursion
//! depth, string length, and collection length. The structural form comes
//! from serde, which is acyclic by construction, so the depth bound doubles
//! as cycle protection.

use crate::value::Value;

/// Bounds applied during structural capture.
#[derive(Debug, Clone)]
pub struct CaptureLimits {
    /// Maximum nesting depth; deeper levels collapse to a string summary.
    pub max_depth: usize,
    /// Maximum captured string length; longer strings truncate with `…`.
    pub max_string_len: usize,
    /// Maximum sequence/mapping length; the remainder is dropped.
    pub max_collection_len: usize,
}

impl Default for CaptureLimits {
    fn default() -> Self {
        Self {
            max_depth: 5,
            max_string_len: 1024,
            max_collection_len: 100,
        }
    }
}

/// Converts complex values into bounded property trees.
///
/// `try_capture` returns `Some(replacement)` to restructure the value, or
/// `None` to leave it as-is (the capture-failure contract: the value stays
/// untouched rather than erroring).
pub trait Capturer: Send + Sync {
    /// Attempts to restructure `value` for logging.
    fn try_capture(&self, value: &Value) -> Option<Value>;
}

/// The built-in capturer.
#[derive(Debug, Clone)]
pub struct DefaultCapturer {
    limits: CaptureLimits,
    scalar_types: Vec<String>,
}

impl Default for DefaultCapturer {
    fn default() -> Self {
        Self {
            limits: CaptureLimits::default(),
            // Types whose structural form is noise; their display form is the
            // useful one. Matched as path-segment suffixes of the type name.
            scalar_types: ["Uuid", "Ulid", "DateTime", "NaiveDateTime", "Duration", "IpAddr", "SocketAddr", "PathBuf"]
                .into_iter()
                .map(str::to_string)
                .collect(),
        }
    }
}

impl DefaultCapturer {
    /// A capturer with the given bounds.
    #[must_use]
    pub fn new(limits: CaptureLimits) -> Self {
        Self {
            limits,
            ..Self::default()
        }
    }

    /// Registers an additional scalar-like type by (suffix of its) name.
    #[must_use]
    pub fn with_scalar_type(mut self, type_name: impl Into<String>) -> Self {
        self.scalar_types.push(type_name.into());
        self
    }

    fn is_registered_scalar(&self, type_name: &str) -> bool {
        let tail = type_name
            .rsplit("::")
            .next()
            .unwrap_or(type_name);
        let bare = tail.split('<').next().unwrap_or(tail);
        self.scalar_types.iter().any(|s| s == bare)
    }

    fn bound_string(&self, s: &str) -> String {
        if s.chars().count() <= self.limits.max_string_len {
            return s.to_string();
        }
        let mut out: String = s.chars().take(self.limits.max_string_len).collect();
        out.push('…');
        out
    }

    fn bound_value(&self, value: &Value, depth: usize) -> Value {
        if depth == 0 {
            return Value::Str(self.bound_string(&value.to_string()));
        }
        match value {
            Value::Str(s) => Value::Str(self.bound_string(s)),
            Value::Seq(items) => Value::Seq(
                items
                    .iter()
                    .take(self.limits.max_collection_len)
                    .map(|v| self.bound_value(v, depth - 1))
                    .collect(),
            ),
            Value::Map(pairs) => Value::Map(
                pairs
                    .iter()
                    .take(self.limits.max_collection_len)
                    .map(|(k, v)| (k.clone(), self.bound_value(v, depth - 1)))
                    .collect(),
            ),
            Value::Struct { name, fields } => Value::Struct {
                name: name.clone(),
                fields: fields
                    .iter()
                    .take(self.limits.max_collection_len)
                    .map(|(k, v)| (k.clone(), self.bound_value(v, depth - 1)))
                    .collect(),
            },
            Value::Object(o) => self.capture_object(o.as_ref(), depth),
            scalar => scalar.clone(),
        }
    }

    fn capture_object(&self, object: &dyn crate::value::ObjectValue, depth: usize) -> Value {
        if self.is_registered_scalar(object.type_name()) {
            return Value::Str(self.bound_string(&object_display(object)));
        }
        if let Some(substitute) = object.log_value() {
            return self.bound_value(&substitute, depth);
        }
        let name = short_type_name(object.type_name());
        self.from_json(&object.to_structured(), depth, Some(name))
    }

    fn from_json(
        &self,
        json: &serde_json::Value,
        depth: usize,
        struct_name: Option<String>,
    ) -> Value {
        if depth == 0 {
            return Value::Str(self.bound_string(&json.to_string()));
        }
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(*b),
            serde_json::Value::Number(n) => n.as_i64().map_or_else(
                || {
                    n.as_u64()
                        .map_or_else(|| Value::Float(n.as_f64().unwrap_or(0.0)), Value::Uint)
                },
                Value::Int,
            ),
            serde_json::Value::String(s) => Value::Str(self.bound_string(s)),
            serde_json::Value::Array(items) => Value::Seq(
                items
                    .iter()
                    .take(self.limits.max_collection_len)
                    .map(|v| self.from_json(v, depth - 1, None))
                    .collect(),
            ),
            serde_json::Value::Object(map) => {
                let fields: Vec<(String, Value)> = map
                    .iter()
                    .take(self.limits.max_collection_len)
                    .map(|(k, v)| (k.clone(), self.from_json(v, depth - 1, None)))
                    .collect();
                match struct_name {
                    Some(name) => Value::Struct {
                        name,
                        fields,
                    },
                    None => Value::Map(fields),
                }
            }
        }
    }
}

impl Capturer for DefaultCapturer {
    fn try_capture(&self, value: &Value) -> Option<Value> {
        match value {
            Value::Object(o) => Some(self.capture_object(o.as_ref(), self.limits.max_depth)),
            Value::Seq(_) | Value::Map(_) | Value::Struct { .. } => {
                Some(self.bound_value(value, self.limits.max_depth))
            }
            Value::Str(s) if s.chars().count() > self.limits.max_string_len => {
                Some(Value::Str(self.bound_string(s)))
            }
            // Scalars pass through untouched.
            _ => None,
        }
    }
}

fn object_display(object: &dyn crate::value::ObjectValue) -> String {
    match object.to_structured() {
        serde_json::Value::String(s) => s,
        other => other.to_string(),
    }
}

fn short_type_name(type_name: &str) -> String {
    let base = type_name.split('<').next().unwrap_or(type_name);
    base.rsplit("::").next().unwrap_or(base).to_string()
}
