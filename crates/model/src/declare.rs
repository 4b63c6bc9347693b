//! Field declaration API.
//!
//! A model type declares its fields once, inside
//! [`Model::declare_fields`](crate::model::Model::declare_fields):
//!
//! ```rust,ignore
//! fn declare_fields(fields: &mut FieldDeclarations<'_>) {
//!     fields
//!         .field("name", FieldOptions::new(FieldType::String).required())
//!         .field("status", FieldOptions::new(FieldType::Enum).enum_values(["available", "sold"]))
//!         .field("owner", FieldOptions::class::<Owner>());
//! }
//! ```
//!
//! Declarations are not checked: an invalid pattern is accepted here and
//! only reported when a value is first matched against it.

use crate::descriptor::{CustomValidator, DefaultValue, DescriptorPatch, FieldDescriptor, Pattern, Rules};
use crate::kind::FieldType;
use crate::model::{Model, ModelConstructor, ModelType};
use crate::store::MetadataStore;
use crate::validation::ValidationError;
use crate::value::Value;

/// The recognized options of a field declaration.
///
/// Options left unset are recorded as empty (`None` / `false`), so a
/// declaration always overrides every recognized key. The element
/// descriptor and the rules are the exception: they are only written when
/// set, and otherwise keep whatever was declared before.
#[derive(Debug, Clone)]
pub struct FieldOptions {
    pub field_type: FieldType,
    pub default_value: DefaultValue,
    pub required: bool,
    pub pattern: Option<Pattern>,
    pub enum_values: Option<Vec<Value>>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub label: Option<String>,
    pub placeholder: Option<String>,
    pub items: Option<FieldDescriptor>,
    pub rules: Option<Rules>,
}

impl FieldOptions {
    #[must_use]
    pub fn new(field_type: FieldType) -> Self {
        Self {
            field_type,
            default_value: DefaultValue::None,
            required: false,
            pattern: None,
            enum_values: None,
            min: None,
            max: None,
            label: None,
            placeholder: None,
            items: None,
            rules: None,
        }
    }

    /// An ARRAY field whose elements are validated against `items`.
    #[must_use]
    pub fn array_of(items: FieldDescriptor) -> Self {
        Self::new(FieldType::Array).items(items)
    }

    /// A CLASS field holding a nested `M`.
    #[must_use]
    pub fn class<M: Model + Default>() -> Self {
        Self::new(FieldType::Class).nested::<M>()
    }

    /// An OBJECT field shaped like a nested `M`.
    #[must_use]
    pub fn object<M: Model + Default>() -> Self {
        Self::new(FieldType::Object).nested::<M>()
    }

    /// Uses `M::default` as the nested model constructor.
    #[must_use]
    pub fn nested<M: Model + Default>(self) -> Self {
        self.nested_with(ModelConstructor::of::<M>())
    }

    #[must_use]
    pub fn nested_with(mut self, constructor: ModelConstructor) -> Self {
        self.default_value = DefaultValue::Model(constructor);
        self
    }

    #[must_use]
    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default_value = DefaultValue::Value(value.into());
        self
    }

    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    #[must_use]
    pub fn pattern(mut self, pattern: impl Into<Pattern>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    #[must_use]
    pub fn enum_values<V: Into<Value>>(mut self, values: impl IntoIterator<Item = V>) -> Self {
        self.enum_values = Some(values.into_iter().map(Into::into).collect());
        self
    }

    #[must_use]
    pub fn min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    #[must_use]
    pub fn max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    /// Inclusive numeric bounds.
    #[must_use]
    pub fn range(self, min: f64, max: f64) -> Self {
        self.min(min).max(max)
    }

    /// Label text or translation key.
    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Placeholder text or translation key.
    #[must_use]
    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    /// Element descriptor for ARRAY fields.
    #[must_use]
    pub fn items(mut self, items: FieldDescriptor) -> Self {
        self.items = Some(items);
        self
    }

    /// Type-specific rules, such as FILE limits.
    #[must_use]
    pub fn rules(mut self, rules: Rules) -> Self {
        self.rules = Some(rules);
        self
    }
}

impl From<FieldOptions> for DescriptorPatch {
    fn from(options: FieldOptions) -> Self {
        Self {
            field_type: Some(options.field_type),
            default_value: Some(options.default_value),
            required: Some(options.required),
            pattern: Some(options.pattern),
            enum_values: Some(options.enum_values),
            min: Some(options.min),
            max: Some(options.max),
            label: Some(options.label),
            placeholder: Some(options.placeholder),
            items: options.items.map(|items| Some(Box::new(items))),
            rules: options.rules.map(Some),
            ..Self::default()
        }
    }
}

// ============================================================================
// DECLARATIONS
// ============================================================================

/// Collects the field declarations of one model type into a store.
pub struct FieldDeclarations<'a> {
    store: &'a MetadataStore,
    model_type: ModelType,
    declared: usize,
}

impl<'a> FieldDeclarations<'a> {
    pub(crate) fn new(store: &'a MetadataStore, model_type: ModelType) -> Self {
        Self {
            store,
            model_type,
            declared: 0,
        }
    }

    /// The type being declared.
    #[must_use]
    pub fn model_type(&self) -> ModelType {
        self.model_type
    }

    /// Number of declarations recorded so far.
    #[must_use]
    pub fn declared(&self) -> usize {
        self.declared
    }

    /// Declares a field with the recognized options.
    pub fn field(&mut self, name: &str, options: FieldOptions) -> &mut Self {
        self.patch(name, options.into())
    }

    /// Merges an arbitrary partial descriptor over the field.
    pub fn patch(&mut self, name: &str, patch: DescriptorPatch) -> &mut Self {
        self.store.declare_field(self.model_type, name, patch);
        self.declared += 1;
        self
    }

    /// Sets the display name reported for bare validator errors.
    pub fn display_name(&mut self, name: &str, display: impl Into<String>) -> &mut Self {
        self.patch(
            name,
            DescriptorPatch {
                name: Some(Some(display.into())),
                ..DescriptorPatch::default()
            },
        )
    }

    /// Attaches type-specific rules (file limits and the like).
    pub fn rules(&mut self, name: &str, rules: Rules) -> &mut Self {
        self.patch(
            name,
            DescriptorPatch {
                rules: Some(Some(rules)),
                ..DescriptorPatch::default()
            },
        )
    }

    /// Sets the element descriptor of an ARRAY field.
    pub fn items(&mut self, name: &str, items: FieldDescriptor) -> &mut Self {
        self.patch(
            name,
            DescriptorPatch {
                items: Some(Some(Box::new(items))),
                ..DescriptorPatch::default()
            },
        )
    }

    /// Adds a per-field validation function. Repeated calls accumulate; the
    /// functions run in the order they were added.
    pub fn custom<F>(&mut self, name: &str, validator: F) -> &mut Self
    where
        F: Fn(&Value) -> Vec<ValidationError> + Send + Sync + 'static,
    {
        self.patch(
            name,
            DescriptorPatch {
                custom_validators: vec![CustomValidator::new(validator)],
                ..DescriptorPatch::default()
            },
        )
    }
}

/// Declares (or re-declares) a field of `M` in the global store, outside of
/// `declare_fields`. The type's own declarations run first.
pub fn declare_field<M: Model>(field: &str, options: FieldOptions) {
    declare_patch::<M>(field, options.into());
}

/// Merges a partial descriptor over a field of `M` in the global store.
pub fn declare_patch<M: Model>(field: &str, patch: DescriptorPatch) {
    let store = MetadataStore::global();
    let model_type = ModelType::of::<M>();
    store.ensure_declared(model_type);
    store.declare_field(model_type, field, patch);
}
