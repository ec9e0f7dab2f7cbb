//! Dynamic property values.
//!
//! Every property attached to an event is a [`Value`]: scalars, ordered
//! sequences, keyed mappings, named structures, or an opaque [`ObjectValue`]
//! awaiting structural capture. Mappings use ordered pairs rather than a hash
//! map so captured field order survives to the sink.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

/// A dynamically typed property value.
#[derive(Debug, Clone)]
pub enum Value {
    /// Absent or unset.
    Null,
    /// Boolean scalar.
    Bool(bool),
    /// Signed integer scalar.
    Int(i64),
    /// Unsigned integer scalar.
    Uint(u64),
    /// Floating-point scalar.
    Float(f64),
    /// String scalar.
    Str(String),
    /// A point in time; accepts the time format specifiers.
    Time(DateTime<Utc>),
    /// Ordered sequence.
    Seq(Vec<Value>),
    /// Keyed mapping with stable order.
    Map(Vec<(String, Value)>),
    /// Named structure with ordered fields.
    Struct {
        /// The structure's type name.
        name: String,
        /// Field name/value pairs in declaration order.
        fields: Vec<(String, Value)>,
    },
    /// Opaque value captured lazily; see [`ObjectValue`].
    Object(Arc<dyn ObjectValue>),
}

/// The capture seam for user-defined types.
///
/// Implement this directly to control the logged form of a type, or wrap any
/// `Serialize` type via [`Value::object`]. A `Some` from [`log_value`]
/// replaces the value before structural capture runs, which is the mechanism
/// for keeping secrets out of logs.
///
/// [`log_value`]: ObjectValue::log_value
pub trait ObjectValue: fmt::Debug + Send + Sync {
    /// Substitute value used instead of structural capture, if any.
    fn log_value(&self) -> Option<Value> {
        None
    }

    /// Structural form the capturer traverses.
    fn to_structured(&self) -> serde_json::Value;

    /// Type name consulted by the capturer's scalar registry.
    fn type_name(&self) -> &'static str {
        "object"
    }
}

/// Adapter making any `Serialize` type an [`ObjectValue`].
struct SerializeObject<T>(T);

impl<T> fmt::Debug for SerializeObject<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(std::any::type_name::<T>())
    }
}

impl<T> ObjectValue for SerializeObject<T>
where
    T: Serialize + Send + Sync + 'static,
{
    fn to_structured(&self) -> serde_json::Value {
        serde_json::to_value(&self.0).unwrap_or(serde_json::Value::Null)
    }

    fn type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }
}

impl Value {
    /// Wraps a serializable value for structural capture (`{@Name}` tokens).
    #[must_use]
    pub fn object<T>(value: T) -> Self
    where
        T: Serialize + Send + Sync + 'static,
    {
        Self::Object(Arc::new(SerializeObject(value)))
    }

    /// Wraps a hand-implemented [`ObjectValue`].
    #[must_use]
    pub fn from_object(object: Arc<dyn ObjectValue>) -> Self {
        Self::Object(object)
    }

    /// String contents, when this is a string scalar.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Whether this value is a scalar (no structure to capture).
    #[must_use]
    pub const fn is_scalar(&self) -> bool {
        matches!(
            self,
            Self::Null
                | Self::Bool(_)
                | Self::Int(_)
                | Self::Uint(_)
                | Self::Float(_)
                | Self::Str(_)
                | Self::Time(_)
        )
    }

    /// JSON form used by the `:j` format specifier and the JSON-leaning sinks.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Self::Null => serde_json::Value::Null,
            Self::Bool(b) => serde_json::Value::Bool(*b),
            Self::Int(i) => serde_json::Value::from(*i),
            Self::Uint(u) => serde_json::Value::from(*u),
            Self::Float(x) => serde_json::Value::from(*x),
            Self::Str(s) => serde_json::Value::String(s.clone()),
            Self::Time(t) => {
                serde_json::Value::String(t.to_rfc3339_opts(SecondsFormat::AutoSi, true))
            }
            Self::Seq(items) => serde_json::Value::Array(items.iter().map(Self::to_json).collect()),
            Self::Map(pairs) => serde_json::Value::Object(
                pairs
                    .iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect(),
            ),
            Self::Struct { fields, .. } => serde_json::Value::Object(
                fields
                    .iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect(),
            ),
            Self::Object(o) => o
                .log_value()
                .map_or_else(|| o.to_structured(), |v| v.to_json()),
        }
    }
}

/// Default rendering: strings appear bare (the `:q` specifier opts into
/// quoting), times as RFC 3339, structures in a compact debug-ish form.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Uint(u) => write!(f, "{u}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Str(s) => f.write_str(s),
            Self::Time(t) => f.write_str(&t.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
            Self::Seq(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Self::Map(pairs) => {
                f.write_str("{")?;
                for (i, (k, v)) in pairs.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{k}: {v}")?;
                }
                f.write_str("}")
            }
            Self::Struct { name, fields } => {
                write!(f, "{name} {{")?;
                for (i, (k, v)) in fields.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, " {k}: {v}")?;
                }
                f.write_str(" }")
            }
            Self::Object(o) => match o.log_value() {
                Some(v) => write!(f, "{v}"),
                None => f.write_str(&o.to_structured().to_string()),
            },
        }
    }
}

/// Structural equality; opaque objects compare by pointer identity.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Uint(a), Self::Uint(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a == b,
            (Self::Str(a), Self::Str(b)) => a == b,
            (Self::Time(a), Self::Time(b)) => a == b,
            (Self::Seq(a), Self::Seq(b)) => a == b,
            (Self::Map(a), Self::Map(b)) => a == b,
            (
                Self::Struct {
                    name: an,
                    fields: af,
                },
                Self::Struct {
                    name: bn,
                    fields: bf,
                },
            ) => an == bn && af == bf,
            (Self::Object(a), Self::Object(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i8> for Value {
    fn from(v: i8) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<i16> for Value {
    fn from(v: i16) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<u8> for Value {
    fn from(v: u8) -> Self {
        Self::Uint(u64::from(v))
    }
}

impl From<u16> for Value {
    fn from(v: u16) -> Self {
        Self::Uint(u64::from(v))
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Self::Uint(u64::from(v))
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Self::Uint(v)
    }
}

impl From<usize> for Value {
    fn from(v: usize) -> Self {
        Self::Uint(v as u64)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Self::Float(f64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(v: DateTime<Utc>) -> Self {
        Self::Time(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Self::Seq(v.into_iter().map(Into::into).collect())
    }
}
