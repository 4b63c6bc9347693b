//! Prelude module for convenient imports.
//!
//! ```rust,ignore
//! use vellum_model::prelude::*;
//! ```

pub use crate::analyzer::{AnalyzedModel, analyze_model};
pub use crate::declare::{FieldDeclarations, FieldOptions};
pub use crate::descriptor::FieldDescriptor;
pub use crate::error::ModelError;
pub use crate::kind::FieldType;
pub use crate::model::{Model, ModelConstructor, ModelType};
pub use crate::model;
pub use crate::validation::{ValidationError, ValidationErrorKind};
pub use crate::value::Value;
