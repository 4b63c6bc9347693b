//! # vellum-model
//!
//! Declarative field metadata and recursive validation for data models.
//!
//! Model types declare a descriptor per field (type tag, constraints,
//! default value, optional nested model). At validation time the model is
//! analyzed into an ordered field → descriptor map, every field value is
//! dispatched to the validator for its type tag, and the resulting errors
//! are collected with dotted and bracketed paths (`address.city`,
//! `tags[2].name`).
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use vellum_model::prelude::*;
//!
//! model! {
//!     #[derive(Default)]
//!     pub struct Pet {
//!         #[field(FieldOptions::new(FieldType::String).required())]
//!         pub name: String,
//!
//!         #[field(FieldOptions::new(FieldType::Enum).enum_values(["available", "pending", "sold"]))]
//!         pub status: String,
//!     }
//! }
//!
//! let pet = Pet { name: "Rex".into(), status: "lost".into() };
//! let errors = pet.validate().await?;
//! assert_eq!(errors[0].field, "status");
//! ```
//!
//! ## Layers
//!
//! - [`store`]: process-wide descriptor registry
//! - [`declare`]: the declaration API used by [`Model::declare_fields`]
//! - [`analyzer`]: model → [`AnalyzedModel`], cached per model identity
//! - [`validation`]: type-tag dispatch and field-level validation
//! - [`validators`]: one validator per tag family
//! - [`engine`]: whole-model validation, nested recursion and custom rules
//!
//! Data problems are reported as [`ValidationError`] values. Structural
//! problems (recursion limit, failing nested constructor, invalid pattern,
//! failing custom-rule hook) are [`ModelError`]s.

pub mod analyzer;
pub mod config;
pub mod declare;
pub mod descriptor;
pub mod engine;
pub mod error;
pub mod kind;
mod macros;
pub mod model;
pub mod prelude;
pub mod store;
pub mod validation;
pub mod validators;
pub mod value;

pub use analyzer::{AnalyzeTarget, AnalyzedModel, Analyzer, analyze_model};
pub use config::AnalyzerConfig;
pub use declare::{FieldDeclarations, FieldOptions, declare_field, declare_patch};
pub use descriptor::{CustomValidator, DefaultValue, DescriptorPatch, FieldDescriptor, Pattern, Rules};
pub use engine::{validate_dynamic_rules, validate_model};
pub use error::ModelError;
pub use kind::FieldType;
pub use model::{InstanceId, Model, ModelConstructor, ModelType};
pub use store::MetadataStore;
pub use validation::{Outcome, ValidationError, ValidationErrorKind, validate_field};
pub use value::Value;

#[doc(hidden)]
pub mod __private {
    pub use async_trait::async_trait;
}
