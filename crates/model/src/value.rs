//! Dynamic field values.
//!
//! Models expose their fields as [`Value`]s so the validators can inspect
//! them without knowing the concrete Rust type. The coercion helpers follow
//! loose scripting-language semantics on purpose: validators compare a
//! numeric-looking string against bounds, and test a pattern against the
//! textual form of whatever value is present.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use serde::{Serialize, Serializer};

use crate::model::Model;

/// A dynamically typed field value.
#[derive(Clone, Default)]
pub enum Value {
    /// Absent or explicitly empty value.
    #[default]
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Array(Vec<Value>),
    Object(IndexMap<String, Value>),
    /// A nested model instance.
    Model(Arc<dyn Model>),
}

impl Value {
    /// Builds an object value from key/value pairs.
    pub fn object<K, V, I>(entries: I) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self::Object(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub fn is_string(&self) -> bool {
        matches!(self, Self::String(_))
    }

    #[must_use]
    pub fn is_number(&self) -> bool {
        matches!(self, Self::Number(_))
    }

    #[must_use]
    pub fn is_array(&self) -> bool {
        matches!(self, Self::Array(_))
    }

    /// True for arrays, objects and nested models.
    #[must_use]
    pub fn is_object_like(&self) -> bool {
        matches!(self, Self::Array(_) | Self::Object(_) | Self::Model(_))
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Truthiness: `null`, `false`, `0`, `NaN` and `""` are falsy,
    /// everything else (including empty arrays and objects) is truthy.
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Null => false,
            Self::Bool(b) => *b,
            Self::Number(n) => *n != 0.0 && !n.is_nan(),
            Self::String(s) => !s.is_empty(),
            Self::Array(_) | Self::Object(_) | Self::Model(_) => true,
        }
    }

    /// Short type name used in `expected`/`actual` diagnostics.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Number(_) => "number",
            Self::String(_) => "string",
            Self::Array(_) => "array",
            Self::Object(_) | Self::Model(_) => "object",
        }
    }

    /// Reads a property of an object or model; anything else yields `Null`.
    #[must_use]
    pub fn get(&self, key: &str) -> Value {
        match self {
            Self::Object(map) => map.get(key).cloned().unwrap_or_default(),
            Self::Model(model) => model.field(key),
            _ => Self::Null,
        }
    }

    /// Loose numeric coercion. Non-numeric values become `NaN`, which fails
    /// every comparison.
    #[must_use]
    pub fn to_number(&self) -> f64 {
        match self {
            Self::Null => 0.0,
            Self::Bool(b) => f64::from(u8::from(*b)),
            Self::Number(n) => *n,
            Self::String(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    0.0
                } else {
                    trimmed.parse().unwrap_or(f64::NAN)
                }
            }
            Self::Array(items) => match items.as_slice() {
                [] => 0.0,
                [single] => single.to_number(),
                _ => f64::NAN,
            },
            Self::Object(_) | Self::Model(_) => f64::NAN,
        }
    }

    /// Loose textual coercion used when matching patterns.
    #[must_use]
    pub fn to_text(&self) -> String {
        match self {
            Self::Null => "null".to_owned(),
            Self::Bool(b) => b.to_string(),
            Self::Number(n) => format_number(*n),
            Self::String(s) => s.clone(),
            Self::Array(items) => items
                .iter()
                .map(|item| match item {
                    Self::Null => String::new(),
                    other => other.to_text(),
                })
                .collect::<Vec<_>>()
                .join(","),
            Self::Object(_) | Self::Model(_) => "[object Object]".to_owned(),
        }
    }

    /// Membership equality: like `==`, except `NaN` equals `NaN`.
    #[must_use]
    pub fn same_value_zero(&self, other: &Value) -> bool {
        match (self, other) {
            (Self::Number(a), Self::Number(b)) if a.is_nan() && b.is_nan() => true,
            _ => self == other,
        }
    }

    /// Converts to JSON for diagnostics. Models serialize as an object of
    /// their declared fields.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Self::Null => serde_json::Value::Null,
            Self::Bool(b) => serde_json::Value::Bool(*b),
            Self::Number(n) => number_to_json(*n),
            Self::String(s) => serde_json::Value::String(s.clone()),
            Self::Array(items) => items.iter().map(Value::to_json).collect(),
            Self::Object(map) => map
                .iter()
                .map(|(k, v)| (k.clone(), v.to_json()))
                .collect::<serde_json::Map<_, _>>()
                .into(),
            Self::Model(model) => model
                .field_names()
                .into_iter()
                .map(|name| (name.to_owned(), model.field(name).to_json()))
                .collect::<serde_json::Map<_, _>>()
                .into(),
        }
    }
}

/// Integral numbers render without a fractional part (`15`, not `15.0`).
pub(crate) fn number_to_json(n: f64) -> serde_json::Value {
    const MAX_SAFE: f64 = 9_007_199_254_740_991.0;
    if n.is_finite() && n.fract() == 0.0 && n.abs() <= MAX_SAFE {
        serde_json::Value::from(n as i64)
    } else {
        serde_json::Number::from_f64(n).map_or(serde_json::Value::Null, serde_json::Value::Number)
    }
}

fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_owned()
    } else if n.is_infinite() {
        if n > 0.0 { "Infinity" } else { "-Infinity" }.to_owned()
    } else if n.fract() == 0.0 && n.abs() < 1e21 {
        format!("{n:.0}")
    } else {
        n.to_string()
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Number(a), Self::Number(b)) => a == b,
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Array(a), Self::Array(b)) => a == b,
            (Self::Object(a), Self::Object(b)) => a == b,
            (Self::Model(a), Self::Model(b)) => {
                std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
            }
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("Null"),
            Self::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            Self::Number(n) => f.debug_tuple("Number").field(n).finish(),
            Self::String(s) => f.debug_tuple("String").field(s).finish(),
            Self::Array(items) => f.debug_tuple("Array").field(items).finish(),
            Self::Object(map) => f.debug_tuple("Object").field(map).finish(),
            Self::Model(model) => f
                .debug_tuple("Model")
                .field(&model.model_type().name())
                .finish(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

// ============================================================================
// CONVERSIONS
// ============================================================================

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<f32> for Value {
    fn from(n: f32) -> Self {
        Self::Number(f64::from(n))
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Self::Number(f64::from(n))
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Self::Number(f64::from(n))
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Number(n as f64)
    }
}

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        Self::Number(n as f64)
    }
}

impl From<usize> for Value {
    fn from(n: usize) -> Self {
        Self::Number(n as f64)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Self::Array(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

impl From<IndexMap<String, Value>> for Value {
    fn from(map: IndexMap<String, Value>) -> Self {
        Self::Object(map)
    }
}

impl<M: Model> From<Arc<M>> for Value {
    fn from(model: Arc<M>) -> Self {
        Self::Model(model)
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => Self::Number(n.as_f64().unwrap_or(f64::NAN)),
            serde_json::Value::String(s) => Self::String(s),
            serde_json::Value::Array(items) => {
                Self::Array(items.into_iter().map(Into::into).collect())
            }
            serde_json::Value::Object(map) => {
                Self::Object(map.into_iter().map(|(k, v)| (k, v.into())).collect())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn truthiness() {
        assert!(!Value::Null.is_truthy());
        assert!(!Value::from(false).is_truthy());
        assert!(!Value::from(0).is_truthy());
        assert!(!Value::Number(f64::NAN).is_truthy());
        assert!(!Value::from("").is_truthy());

        assert!(Value::from("0").is_truthy());
        assert!(Value::Array(vec![]).is_truthy());
        assert!(Value::Object(IndexMap::new()).is_truthy());
    }

    #[test]
    fn loose_number_coercion() {
        assert_eq!(Value::from("15").to_number(), 15.0);
        assert_eq!(Value::from("  ").to_number(), 0.0);
        assert_eq!(Value::from(true).to_number(), 1.0);
        assert!(Value::from("abc").to_number().is_nan());
        assert!(Value::object([("a", 1)]).to_number().is_nan());
    }

    #[test]
    fn loose_text_coercion() {
        assert_eq!(Value::from(123).to_text(), "123");
        assert_eq!(Value::from(1.5).to_text(), "1.5");
        assert_eq!(Value::Null.to_text(), "null");
        assert_eq!(Value::from(vec![1, 2]).to_text(), "1,2");
    }

    #[test]
    fn nan_membership() {
        let nan = Value::Number(f64::NAN);
        assert_ne!(nan, nan.clone());
        assert!(nan.same_value_zero(&Value::Number(f64::NAN)));
    }

    #[test]
    fn json_round_trip_keeps_integers() {
        let json = json!({"id": 7, "ratio": 0.5, "tags": ["a"], "gone": null});
        let value = Value::from(json.clone());
        assert_eq!(value.to_json(), json);
        assert_eq!(value.get("id"), Value::from(7));
        assert_eq!(value.get("missing"), Value::Null);
    }

    #[test]
    fn type_names() {
        assert_eq!(Value::from(vec![1]).type_name(), "array");
        assert_eq!(Value::object([("a", 1)]).type_name(), "object");
        assert_eq!(Value::Null.type_name(), "null");
    }
}
