//! Data validation errors.
//!
//! A [`ValidationError`] reports one problem with one field value. Errors
//! are plain data: validators collect them into lists, and nothing in this
//! crate ever raises them.

use std::borrow::Cow;
use std::fmt;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

// ============================================================================
// KIND
// ============================================================================

/// Closed set of validation failure kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationErrorKind {
    Required,
    Pattern,
    Min,
    Max,
    Enum,
    Type,
    Object,
    Array,
    Nested,
    Unique,
    Dependency,
    Custom,
    Unsupported,
}

impl ValidationErrorKind {
    /// Wire name, as used for i18n keys.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::Pattern => "pattern",
            Self::Min => "min",
            Self::Max => "max",
            Self::Enum => "enum",
            Self::Type => "type",
            Self::Object => "object",
            Self::Array => "array",
            Self::Nested => "nested",
            Self::Unique => "unique",
            Self::Dependency => "dependency",
            Self::Custom => "custom",
            Self::Unsupported => "unsupported",
        }
    }

    /// Default English message.
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::Required => "This field is required",
            Self::Pattern => "Value does not match the expected format",
            Self::Min => "Value is below the minimum",
            Self::Max => "Value is above the maximum",
            Self::Enum => "Value is not one of the allowed values",
            Self::Type => "Value has the wrong type",
            Self::Object => "Invalid object",
            Self::Array => "Invalid array",
            Self::Nested => "Nested value is invalid",
            Self::Unique => "Value must be unique",
            Self::Dependency => "Value depends on another field",
            Self::Custom => "Value is invalid",
            Self::Unsupported => "Field type is not supported",
        }
    }
}

impl fmt::Display for ValidationErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// VALIDATION ERROR
// ============================================================================

/// A structured validation error.
///
/// `field` is a path relative to the validated model: `email`,
/// `address.city`, `tags[2].name`.
///
/// # Examples
///
/// ```rust,ignore
/// use vellum_model::{ValidationError, ValidationErrorKind};
///
/// let error = ValidationError::new("age", ValidationErrorKind::Max)
///     .with_param("max", 10);
/// assert_eq!(error.param("max"), Some(&serde_json::json!(10)));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationError {
    pub field: String,

    #[serde(rename = "type")]
    pub kind: ValidationErrorKind,

    /// Diagnostic parameters in insertion order (expected/actual types,
    /// bounds, pattern text, allowed values).
    #[serde(
        skip_serializing_if = "Vec::is_empty",
        serialize_with = "serialize_params"
    )]
    pub params: Vec<(Cow<'static, str>, serde_json::Value)>,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, kind: ValidationErrorKind) -> Self {
        Self {
            field: field.into(),
            kind,
            params: Vec::new(),
        }
    }

    /// Sets the field path.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = field.into();
        self
    }

    /// Adds a diagnostic parameter.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_param(
        mut self,
        key: impl Into<Cow<'static, str>>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    /// Looks up a parameter value by key.
    #[must_use]
    pub fn param(&self, key: &str) -> Option<&serde_json::Value> {
        self.params
            .iter()
            .find(|(k, _)| k.as_ref() == key)
            .map(|(_, v)| v)
    }
}

fn serialize_params<S: Serializer>(
    params: &[(Cow<'static, str>, serde_json::Value)],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(params.len()))?;
    for (key, value) in params {
        map.serialize_entry(key, value)?;
    }
    map.end()
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.field.is_empty() {
            write!(f, "{}: {}", self.kind, self.kind.message())?;
        } else {
            write!(f, "[{}] {}: {}", self.field, self.kind, self.kind.message())?;
        }

        if !self.params.is_empty() {
            write!(f, " (params: [")?;
            for (i, (k, v)) in self.params.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                match v {
                    serde_json::Value::String(s) => write!(f, "{k}={s}")?,
                    other => write!(f, "{k}={other}")?,
                }
            }
            write!(f, "])")?;
        }

        Ok(())
    }
}

impl std::error::Error for ValidationError {}

// ============================================================================
// CONVENIENCE CONSTRUCTORS
// ============================================================================

impl ValidationError {
    /// Creates a "required" error.
    pub fn required(field: impl Into<String>) -> Self {
        Self::new(field, ValidationErrorKind::Required)
    }

    /// Creates a "type" error naming the expected and actual types.
    pub fn type_mismatch(
        field: impl Into<String>,
        expected: impl Into<serde_json::Value>,
        actual: impl Into<serde_json::Value>,
    ) -> Self {
        Self::new(field, ValidationErrorKind::Type)
            .with_param("expected", expected)
            .with_param("actual", actual)
    }

    /// Creates a "custom" error.
    pub fn custom(field: impl Into<String>) -> Self {
        Self::new(field, ValidationErrorKind::Custom)
    }
}
