//! Nested model validators (OBJECT, CLASS)

use crate::analyzer::{AnalyzedModel, Analyzer};
use crate::descriptor::FieldDescriptor;
use crate::error::ModelError;
use crate::validation::{Outcome, ValidationError, ValidationErrorKind, rebase, validate_field};
use crate::value::Value;

/// OBJECT fields.
///
/// A falsy value is only an error when the field is required. Without
/// analyzed nested fields the value merely has to be a non-array object;
/// with them, each nested field is validated against `value[nested_key]`
/// and re-pathed as `key.nested_key`.
pub fn validate_object(value: &Value, field: &FieldDescriptor) -> Result<Outcome, ModelError> {
    if !value.is_truthy() {
        return Ok(missing(field));
    }

    let Some(nested) = field.nested_fields.as_deref() else {
        let errors = match value {
            Value::Object(_) | Value::Model(_) => Vec::new(),
            other => vec![ValidationError::type_mismatch(
                field.key.as_str(),
                "object",
                other.type_name(),
            )],
        };
        return Ok(errors.into());
    };

    Ok(validate_members(value, field, nested)?.into())
}

/// CLASS fields.
///
/// A falsy value is only an error when the field is required. Otherwise a
/// fresh instance of the nested model is built from the field's default
/// constructor and analyzed, and each of its fields is validated against the
/// matching member of `value`, re-pathed as `key.nested_key`.
pub fn validate_class(value: &Value, field: &FieldDescriptor) -> Result<Outcome, ModelError> {
    if !value.is_truthy() {
        return Ok(missing(field));
    }

    let Some(ctor) = field.nested_constructor() else {
        return Ok(vec![
            ValidationError::new(field.key.as_str(), ValidationErrorKind::Unsupported)
                .with_param("reason", "defaultValue is not a valid class constructor"),
        ]
        .into());
    };

    let analyzer = Analyzer::global();
    let instance = ctor.construct()?;
    let nested = analyzer.analyze_fresh(instance.as_ref(), 0, analyzer.config().max_depth)?;

    Ok(validate_members(value, field, &nested)?.into())
}

fn missing(field: &FieldDescriptor) -> Outcome {
    if field.required {
        vec![ValidationError::required(field.key.as_str())].into()
    } else {
        Outcome::Valid
    }
}

fn validate_members(
    value: &Value,
    field: &FieldDescriptor,
    nested: &AnalyzedModel,
) -> Result<Vec<ValidationError>, ModelError> {
    let mut errors = Vec::new();
    for (nested_key, meta) in nested.iter() {
        let member = value.get(nested_key);
        for error in validate_field(&member, meta)? {
            errors.push(rebase(error, format!("{}.{nested_key}", field.key), nested_key));
        }
    }
    Ok(errors)
}
