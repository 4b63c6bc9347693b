//! File validators (FILE)
//!
//! A file value is an object with `extension`, `type` and `size` members.
//! Limits come from the descriptor's rules:
//!
//! | Rule | Error |
//! |---|---|
//! | `allowedExtensions` | `type` when `extension` is absent or not listed |
//! | `allowedTypes` | `type` when `type` is absent or not listed |
//! | `maxSize` | `max` when `size` exceeds it |

use crate::descriptor::FieldDescriptor;
use crate::error::ModelError;
use crate::validation::{Outcome, ValidationError, ValidationErrorKind};
use crate::value::Value;

pub const ALLOWED_EXTENSIONS: &str = "allowedExtensions";
pub const ALLOWED_TYPES: &str = "allowedTypes";
pub const MAX_SIZE: &str = "maxSize";

pub fn validate_file(value: &Value, field: &FieldDescriptor) -> Result<Outcome, ModelError> {
    if !value.is_truthy() || !value.is_object_like() {
        return Ok(vec![ValidationError::type_mismatch(
            field.key.as_str(),
            "object",
            value.type_name(),
        )]
        .into());
    }

    let mut errors = Vec::new();

    for (rule, member) in [(ALLOWED_EXTENSIONS, "extension"), (ALLOWED_TYPES, "type")] {
        if let Some(error) = check_listed(value, field, rule, member) {
            errors.push(error);
        }
    }

    if let Some(limit) = field.rule(MAX_SIZE).map(|max| Value::from(max.clone()))
        && limit.is_truthy()
    {
        let size = value.get("size");
        if size.to_number() > limit.to_number() {
            errors.push(
                ValidationError::new(field.key.as_str(), ValidationErrorKind::Max)
                    .with_param("max", limit.to_json())
                    .with_param("actual", size.to_json()),
            );
        }
    }

    Ok(errors.into())
}

/// Checks `value[member]` against the list stored under `rule`. Rules that
/// are not lists are ignored.
fn check_listed(
    value: &Value,
    field: &FieldDescriptor,
    rule: &str,
    member: &str,
) -> Option<ValidationError> {
    let allowed = field.rule(rule)?.as_array()?;

    let actual = match value.get(member) {
        present if present.is_truthy() => present.to_json(),
        _ => serde_json::Value::from("undefined"),
    };
    if allowed.contains(&actual) {
        return None;
    }

    let expected = allowed
        .iter()
        .map(|entry| Value::from(entry.clone()).to_text())
        .collect::<Vec<_>>()
        .join(", ");
    Some(ValidationError::type_mismatch(field.key.as_str(), expected, actual))
}
