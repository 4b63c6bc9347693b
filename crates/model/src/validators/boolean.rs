//! Boolean validators (BOOLEAN, CHECKBOX, RADIO)

use crate::descriptor::FieldDescriptor;
use crate::error::ModelError;
use crate::validation::{Outcome, ValidationError};
use crate::value::Value;

/// `type` unless the value is a boolean.
pub fn validate_boolean(value: &Value, field: &FieldDescriptor) -> Result<Outcome, ModelError> {
    let errors = match value {
        Value::Bool(_) => Vec::new(),
        other => vec![ValidationError::type_mismatch(
            field.key.as_str(),
            "boolean",
            other.type_name(),
        )],
    };
    Ok(errors.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kind::FieldType;
    use crate::validation::ValidationErrorKind;

    fn run(value: Value) -> Vec<ValidationError> {
        let field = FieldDescriptor::new("active", FieldType::Checkbox);
        validate_boolean(&value, &field).unwrap().into_errors(&field)
    }

    #[test]
    fn booleans_pass() {
        assert!(run(Value::from(true)).is_empty());
        assert!(run(Value::from(false)).is_empty());
    }

    #[test]
    fn truthy_non_booleans_fail() {
        let errors = run(Value::from("true"));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::Type);
        assert_eq!(errors[0].param("actual"), Some(&serde_json::json!("string")));
        assert_eq!(run(Value::from(1)).len(), 1);
        assert_eq!(run(Value::Null).len(), 1);
    }
}
