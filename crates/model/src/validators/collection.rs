//! Collection validators (ARRAY)

use crate::descriptor::FieldDescriptor;
use crate::error::ModelError;
use crate::validation::{Outcome, ValidationError, rebase, validate_field};
use crate::value::Value;

/// `type` when the value is absent or not an array. Otherwise every element
/// is validated against the `items` descriptor (or, without one, against the
/// array descriptor itself) and re-pathed as `key[index]`.
pub fn validate_array(value: &Value, field: &FieldDescriptor) -> Result<Outcome, ModelError> {
    let Some(items) = value.as_array() else {
        return Ok(vec![ValidationError::type_mismatch(
            field.key.as_str(),
            "array",
            value.type_name(),
        )]
        .into());
    };

    let element = field.items.as_deref().unwrap_or(field);
    let mut errors = Vec::new();

    for (index, item) in items.iter().enumerate() {
        for error in validate_field(item, element)? {
            errors.push(rebase(error, format!("{}[{index}]", field.key), &element.key));
        }
    }

    Ok(errors.into())
}
