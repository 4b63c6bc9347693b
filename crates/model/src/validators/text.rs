//! Text validators (STRING family, COLOR, HIDDEN)

use std::sync::LazyLock;

use regex::Regex;

use crate::descriptor::FieldDescriptor;
use crate::error::ModelError;
use crate::validation::{Outcome, ValidationError, ValidationErrorKind};
use crate::value::Value;

static COLOR_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^#([0-9a-f]{3}|[0-9a-f]{6})$").expect("color regex is valid")
});

/// STRING, TEXTAREA, EMAIL, PASSWORD, URL, TEL.
///
/// Reports `type` for non-strings and `pattern` for a failed match. The
/// pattern runs against the textual form of the value even after a type
/// failure, so a number can produce both errors.
pub fn validate_string(value: &Value, field: &FieldDescriptor) -> Result<Outcome, ModelError> {
    let mut errors = Vec::new();

    if !value.is_string() {
        errors.push(ValidationError::type_mismatch(
            field.key.as_str(),
            "string",
            value.type_name(),
        ));
    }

    if let Some(pattern) = &field.pattern
        && !pattern.is_match(&value.to_text())?
    {
        errors.push(
            ValidationError::new(field.key.as_str(), ValidationErrorKind::Pattern)
                .with_param("pattern", format!("/{}/", pattern.as_str())),
        );
    }

    Ok(errors.into())
}

/// `#` followed by 3 or 6 hex digits, in any case.
pub fn validate_color(value: &Value, field: &FieldDescriptor) -> Result<Outcome, ModelError> {
    let errors = if COLOR_REGEX.is_match(&value.to_text()) {
        Vec::new()
    } else {
        vec![ValidationError::new(
            field.key.as_str(),
            ValidationErrorKind::Pattern,
        )]
    };
    Ok(errors.into())
}

/// Hidden fields only check presence, and only when required.
pub fn validate_hidden(value: &Value, field: &FieldDescriptor) -> Result<Outcome, ModelError> {
    let missing = match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    };
    let errors = if field.required && missing {
        vec![ValidationError::required(field.key.as_str())]
    } else {
        Vec::new()
    };
    Ok(errors.into())
}
