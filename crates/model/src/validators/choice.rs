//! Choice validators (ENUM, SELECT)

use crate::descriptor::FieldDescriptor;
use crate::error::ModelError;
use crate::validation::{Outcome, ValidationError, ValidationErrorKind};
use crate::value::Value;

/// `enum` when allowed values are declared and the value is not among them.
/// Without declared values anything passes.
pub fn validate_enum(value: &Value, field: &FieldDescriptor) -> Result<Outcome, ModelError> {
    let Some(allowed) = &field.enum_values else {
        return Ok(Outcome::Valid);
    };

    if allowed.iter().any(|candidate| candidate.same_value_zero(value)) {
        return Ok(Outcome::Valid);
    }

    let listed: Vec<serde_json::Value> = allowed.iter().map(Value::to_json).collect();
    Ok(vec![
        ValidationError::new(field.key.as_str(), ValidationErrorKind::Enum).with_param("enum", listed),
    ]
    .into())
}
