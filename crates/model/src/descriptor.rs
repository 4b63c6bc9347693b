//! Field descriptors: the per-field validation metadata of a model.

use std::fmt;
use std::sync::{Arc, OnceLock};

use regex::Regex;

use crate::analyzer::AnalyzedModel;
use crate::error::ModelError;
use crate::kind::FieldType;
use crate::model::ModelConstructor;
use crate::validation::ValidationError;
use crate::value::Value;

/// Open map of type-specific constraints, e.g. `allowedExtensions` or
/// `maxSize` for FILE fields.
pub type Rules = serde_json::Map<String, serde_json::Value>;

/// Validation metadata for one field of one model type.
#[derive(Debug, Clone)]
pub struct FieldDescriptor {
    /// Field name. Always set once the descriptor is attached to a type.
    pub key: String,

    /// Display name used when a validator reports a single bare error.
    pub name: Option<String>,

    pub field_type: FieldType,

    /// Fallback value, or the nested model constructor for CLASS/OBJECT.
    pub default_value: DefaultValue,

    pub required: bool,

    pub pattern: Option<Pattern>,

    /// Allowed values, in declaration order.
    pub enum_values: Option<Vec<Value>>,

    pub min: Option<f64>,

    pub max: Option<f64>,

    pub label: Option<String>,

    pub placeholder: Option<String>,

    /// Analyzed nested model. Set only by the analyzer, and only for
    /// CLASS/OBJECT fields with a constructor default.
    pub nested_fields: Option<Arc<AnalyzedModel>>,

    /// Element descriptor for ARRAY fields. Without one, elements are
    /// validated against this descriptor itself.
    pub items: Option<Box<FieldDescriptor>>,

    pub rules: Option<Rules>,

    /// Per-field validation functions, run in declaration order.
    pub custom_validators: Vec<CustomValidator>,
}

impl FieldDescriptor {
    /// Creates a descriptor with every optional constraint unset.
    pub fn new(key: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            key: key.into(),
            name: None,
            field_type,
            default_value: DefaultValue::None,
            required: false,
            pattern: None,
            enum_values: None,
            min: None,
            max: None,
            label: None,
            placeholder: None,
            nested_fields: None,
            items: None,
            rules: None,
            custom_validators: Vec::new(),
        }
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn with_default(mut self, default_value: impl Into<DefaultValue>) -> Self {
        self.default_value = default_value.into();
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(Pattern::new(pattern));
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn with_enum_values<V: Into<Value>>(mut self, values: impl IntoIterator<Item = V>) -> Self {
        self.enum_values = Some(values.into_iter().map(Into::into).collect());
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn with_min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn with_max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn with_items(mut self, items: FieldDescriptor) -> Self {
        self.items = Some(Box::new(items));
        self
    }

    /// Attaches an already analyzed nested model, for tooling that builds
    /// descriptors by hand.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_nested_fields(mut self, nested: impl Into<Arc<AnalyzedModel>>) -> Self {
        self.nested_fields = Some(nested.into());
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn with_rules(mut self, rules: Rules) -> Self {
        self.rules = Some(rules);
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn with_custom_validator(mut self, validator: CustomValidator) -> Self {
        self.custom_validators.push(validator);
        self
    }

    /// The constructor of the nested model, when the default value is one.
    #[must_use]
    pub fn nested_constructor(&self) -> Option<&ModelConstructor> {
        self.default_value.as_constructor()
    }

    /// Reads a rule by name.
    #[must_use]
    pub fn rule(&self, name: &str) -> Option<&serde_json::Value> {
        self.rules.as_ref().and_then(|rules| rules.get(name))
    }
}

// ============================================================================
// DEFAULT VALUE
// ============================================================================

/// The default of a field: nothing, a plain value, or a nested model
/// constructor.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum DefaultValue {
    #[default]
    None,
    Value(Value),
    Model(ModelConstructor),
}

impl DefaultValue {
    #[must_use]
    pub fn as_constructor(&self) -> Option<&ModelConstructor> {
        match self {
            Self::Model(ctor) => Some(ctor),
            _ => None,
        }
    }
}

impl From<ModelConstructor> for DefaultValue {
    fn from(ctor: ModelConstructor) -> Self {
        Self::Model(ctor)
    }
}

impl From<Value> for DefaultValue {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

// ============================================================================
// PATTERN
// ============================================================================

/// A regular expression compiled on first use.
///
/// Declaring a field never fails; an invalid expression surfaces as
/// [`ModelError::InvalidPattern`] the first time it is matched.
#[derive(Clone)]
pub struct Pattern {
    source: String,
    compiled: OnceLock<Result<Regex, regex::Error>>,
}

impl Pattern {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            compiled: OnceLock::new(),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn is_match(&self, text: &str) -> Result<bool, ModelError> {
        match self.compiled.get_or_init(|| Regex::new(&self.source)) {
            Ok(regex) => Ok(regex.is_match(text)),
            Err(err) => Err(ModelError::InvalidPattern {
                pattern: self.source.clone(),
                reason: err.to_string(),
            }),
        }
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Pattern").field(&self.source).finish()
    }
}

impl From<&str> for Pattern {
    fn from(source: &str) -> Self {
        Self::new(source)
    }
}

impl From<String> for Pattern {
    fn from(source: String) -> Self {
        Self::new(source)
    }
}

// ============================================================================
// CUSTOM VALIDATOR
// ============================================================================

type CustomFn = dyn Fn(&Value) -> Vec<ValidationError> + Send + Sync;

/// A per-field validation function run after the type validator.
#[derive(Clone)]
pub struct CustomValidator(Arc<CustomFn>);

impl CustomValidator {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&Value) -> Vec<ValidationError> + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    #[must_use]
    pub fn run(&self, value: &Value) -> Vec<ValidationError> {
        (self.0)(value)
    }
}

impl fmt::Debug for CustomValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CustomValidator(..)")
    }
}

// ============================================================================
// PATCH
// ============================================================================

/// A partial descriptor merged over whatever was declared before.
///
/// Outer `None` means "leave unchanged"; `Some(None)` explicitly clears an
/// optional constraint. Custom validators are appended, never replaced.
#[derive(Debug, Clone, Default)]
pub struct DescriptorPatch {
    pub name: Option<Option<String>>,
    pub field_type: Option<FieldType>,
    pub default_value: Option<DefaultValue>,
    pub required: Option<bool>,
    pub pattern: Option<Option<Pattern>>,
    pub enum_values: Option<Option<Vec<Value>>>,
    pub min: Option<Option<f64>>,
    pub max: Option<Option<f64>>,
    pub label: Option<Option<String>>,
    pub placeholder: Option<Option<String>>,
    pub items: Option<Option<Box<FieldDescriptor>>>,
    pub rules: Option<Option<Rules>>,
    pub custom_validators: Vec<CustomValidator>,
}

impl DescriptorPatch {
    /// Builds a new descriptor for `key` from this patch alone.
    pub(crate) fn into_descriptor(self, key: &str) -> FieldDescriptor {
        let field_type = self
            .field_type
            .clone()
            .unwrap_or_else(|| FieldType::Unrecognized("undefined".to_owned()));
        let mut descriptor = FieldDescriptor::new(key, field_type);
        self.apply(&mut descriptor);
        descriptor
    }

    /// Overrides the keys this patch specifies. A declared field type is
    /// never replaced by a different one.
    pub(crate) fn apply(self, target: &mut FieldDescriptor) {
        if let Some(field_type) = self.field_type {
            if !target.field_type.is_recognized() || target.field_type == field_type {
                target.field_type = field_type;
            } else {
                tracing::warn!(
                    field = %target.key,
                    declared = %target.field_type,
                    rejected = %field_type,
                    "ignoring field type redeclaration"
                );
            }
        }
        if let Some(name) = self.name {
            target.name = name;
        }
        if let Some(default_value) = self.default_value {
            target.default_value = default_value;
        }
        if let Some(required) = self.required {
            target.required = required;
        }
        if let Some(pattern) = self.pattern {
            target.pattern = pattern;
        }
        if let Some(enum_values) = self.enum_values {
            target.enum_values = enum_values;
        }
        if let Some(min) = self.min {
            target.min = min;
        }
        if let Some(max) = self.max {
            target.max = max;
        }
        if let Some(label) = self.label {
            target.label = label;
        }
        if let Some(placeholder) = self.placeholder {
            target.placeholder = placeholder;
        }
        if let Some(items) = self.items {
            target.items = items;
        }
        if let Some(rules) = self.rules {
            target.rules = rules;
        }
        target.custom_validators.extend(self.custom_validators);
    }
}
