//! The model trait and the handles that identify model types.

use std::any::TypeId;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;

use crate::declare::FieldDeclarations;
use crate::error::ModelError;
use crate::validation::ValidationError;
use crate::value::Value;

/// A type whose fields carry declarative validation metadata.
///
/// Implementors declare their field descriptors once in
/// [`declare_fields`](Model::declare_fields), enumerate their own fields in
/// declaration order, and expose each field as a [`Value`]. The
/// [`model!`](crate::model!) macro generates all of this from a struct
/// definition.
///
/// # Examples
///
/// ```rust,ignore
/// use vellum_model::prelude::*;
///
/// struct Pet { name: String }
///
/// impl Model for Pet {
///     fn model_type(&self) -> ModelType { ModelType::of::<Self>() }
///
///     fn declare_fields(fields: &mut FieldDeclarations<'_>) {
///         fields.field("name", FieldOptions::new(FieldType::String).required());
///     }
///
///     fn field_names(&self) -> Vec<&str> { vec!["name"] }
///
///     fn field(&self, name: &str) -> Value {
///         match name {
///             "name" => self.name.clone().into(),
///             _ => Value::Null,
///         }
///     }
/// }
///
/// let errors = Pet { name: String::new() }.validate().await?;
/// ```
#[async_trait]
pub trait Model: Send + Sync + 'static {
    /// Handle describing the concrete type of this instance.
    fn model_type(&self) -> ModelType;

    /// Registers the field descriptors of this type. Called once per type.
    fn declare_fields(fields: &mut FieldDeclarations<'_>)
    where
        Self: Sized;

    /// The instance's own field names, in declaration order.
    fn field_names(&self) -> Vec<&str>;

    /// Current value of a field; unknown names yield [`Value::Null`].
    fn field(&self, name: &str) -> Value;

    /// Identity for per-instance metadata overrides. Most models have none.
    fn instance_id(&self) -> Option<InstanceId> {
        None
    }

    /// Rules that cannot be expressed as static field metadata, such as
    /// cross-field consistency or a uniqueness lookup.
    async fn validate_custom_rules(&self) -> Result<Vec<ValidationError>, ModelError> {
        Ok(Vec::new())
    }

    /// Validates declared field metadata, then the custom rules.
    async fn validate(&self) -> Result<Vec<ValidationError>, ModelError>
    where
        Self: Sized,
    {
        crate::engine::validate_model(self).await
    }
}

// ============================================================================
// MODEL TYPE
// ============================================================================

/// Identifies a model type and knows how to declare its fields.
#[derive(Clone, Copy)]
pub struct ModelType {
    id: TypeId,
    name: &'static str,
    declare: fn(&mut FieldDeclarations<'_>),
}

impl ModelType {
    #[must_use]
    pub fn of<M: Model>() -> Self {
        Self {
            id: TypeId::of::<M>(),
            name: short_type_name(std::any::type_name::<M>()),
            declare: M::declare_fields,
        }
    }

    #[must_use]
    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Unqualified type name, for logs and error messages.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub(crate) fn declare(&self, fields: &mut FieldDeclarations<'_>) {
        (self.declare)(fields);
    }
}

impl PartialEq for ModelType {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ModelType {}

impl Hash for ModelType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for ModelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ModelType").field(&self.name).finish()
    }
}

fn short_type_name(full: &'static str) -> &'static str {
    let base = full.split('<').next().unwrap_or(full);
    let start = base.rfind("::").map_or(0, |i| i + 2);
    &full[start..]
}

// ============================================================================
// CONSTRUCTOR
// ============================================================================

type ConstructFn = dyn Fn() -> Result<Box<dyn Model>, ModelError> + Send + Sync;

/// A zero-argument constructor for a nested model.
///
/// Used as the default value of CLASS and OBJECT fields: the analyzer builds
/// a fresh instance from it to discover the nested field descriptors.
#[derive(Clone)]
pub struct ModelConstructor {
    model_type: ModelType,
    construct: Arc<ConstructFn>,
}

impl ModelConstructor {
    /// Constructor backed by `M::default()`.
    #[must_use]
    pub fn of<M: Model + Default>() -> Self {
        Self {
            model_type: ModelType::of::<M>(),
            construct: Arc::new(|| Ok(Box::new(M::default()) as Box<dyn Model>)),
        }
    }

    /// Constructor backed by a fallible factory.
    pub fn with<M, F>(factory: F) -> Self
    where
        M: Model,
        F: Fn() -> Result<M, ModelError> + Send + Sync + 'static,
    {
        Self {
            model_type: ModelType::of::<M>(),
            construct: Arc::new(move || factory().map(|m| Box::new(m) as Box<dyn Model>)),
        }
    }

    #[must_use]
    pub fn model_type(&self) -> ModelType {
        self.model_type
    }

    /// Builds a fresh instance. Failures are returned, never swallowed.
    pub fn construct(&self) -> Result<Box<dyn Model>, ModelError> {
        (self.construct)()
    }
}

impl PartialEq for ModelConstructor {
    fn eq(&self, other: &Self) -> bool {
        self.model_type == other.model_type
    }
}

impl fmt::Debug for ModelConstructor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ModelConstructor")
            .field(&self.model_type.name)
            .finish()
    }
}

// ============================================================================
// INSTANCE IDENTITY
// ============================================================================

/// Process-unique identity of a model instance.
///
/// Only needed by models that carry per-instance metadata overrides; the
/// id is a plain number and does not keep the instance alive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InstanceId(u64);

impl InstanceId {
    /// Allocates the next unused id.
    #[must_use]
    pub fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }

    #[must_use]
    pub fn get(self) -> u64 {
        self.0
    }
}
