//! Field-level validation.
//!
//! [`validate_field`] looks up the validator for a descriptor's type tag
//! through [`dispatch`], runs it, normalises its [`Outcome`] into a list,
//! and finally appends the output of the descriptor's custom validator.

mod dispatch;
mod error;

pub use dispatch::{FieldValidator, dispatch};
pub use error::{ValidationError, ValidationErrorKind};

use crate::descriptor::FieldDescriptor;
use crate::error::ModelError;
use crate::value::Value;

/// Raw result of a single validator.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Valid,
    /// One error without a meaningful path; its field is replaced by the
    /// descriptor's display name.
    Single(ValidationError),
    Errors(Vec<ValidationError>),
}

impl Outcome {
    /// Flattens into a list, naming a single error after `descriptor.name`
    /// (or `"unknown"`).
    #[must_use]
    pub fn into_errors(self, descriptor: &FieldDescriptor) -> Vec<ValidationError> {
        match self {
            Self::Valid => Vec::new(),
            Self::Errors(errors) => errors,
            Self::Single(error) => {
                let field = descriptor.name.as_deref().unwrap_or("unknown");
                vec![error.with_field(field)]
            }
        }
    }
}

impl From<Vec<ValidationError>> for Outcome {
    fn from(errors: Vec<ValidationError>) -> Self {
        Self::Errors(errors)
    }
}

impl From<ValidationError> for Outcome {
    fn from(error: ValidationError) -> Self {
        Self::Single(error)
    }
}

impl From<Option<ValidationError>> for Outcome {
    fn from(error: Option<ValidationError>) -> Self {
        error.map_or(Self::Valid, Self::Single)
    }
}

/// Validates one value against one descriptor.
///
/// # Errors
///
/// Only structural failures are returned as `Err` (an invalid pattern, a
/// failing nested constructor, a nested chain that is too deep).
pub fn validate_field(
    value: &Value,
    descriptor: &FieldDescriptor,
) -> Result<Vec<ValidationError>, ModelError> {
    validate_with(dispatch(&descriptor.field_type), value, descriptor)
}

/// Like [`validate_field`], with an explicit validator in place of the
/// dispatched one.
pub fn validate_with(
    validator: FieldValidator,
    value: &Value,
    descriptor: &FieldDescriptor,
) -> Result<Vec<ValidationError>, ModelError> {
    tracing::trace!(
        field = %descriptor.key,
        field_type = %descriptor.field_type,
        "validating field"
    );

    let mut errors = validator(value, descriptor)?.into_errors(descriptor);

    for custom in &descriptor.custom_validators {
        errors.extend(custom.run(value).into_iter().map(|error| {
            if error.field.is_empty() {
                error.with_field(descriptor.key.as_str())
            } else {
                error
            }
        }));
    }

    Ok(errors)
}

// ============================================================================
// PATHS
// ============================================================================

/// Re-paths an error raised for `child_key` so that it sits under `head`.
///
/// `head` replaces the child key; any deeper suffix the error already
/// carries (`child.sub` or `child[3]`) is kept.
pub(crate) fn rebase(mut error: ValidationError, head: String, child_key: &str) -> ValidationError {
    let suffix = error
        .field
        .strip_prefix(child_key)
        .filter(|rest| rest.starts_with('.') || rest.starts_with('['))
        .map(str::to_owned);

    error.field = match suffix {
        Some(rest) => head + &rest,
        None => head,
    };
    error
}

/// Prefixes an error path produced by validating a nested model.
pub(crate) fn prefix(mut error: ValidationError, parent: &str) -> ValidationError {
    error.field = if error.field.is_empty() {
        parent.to_owned()
    } else {
        format!("{parent}.{}", error.field)
    };
    error
}
