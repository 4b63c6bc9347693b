//! Fallback for unrecognized field types

use crate::descriptor::FieldDescriptor;
use crate::error::ModelError;
use crate::validation::{Outcome, ValidationError, ValidationErrorKind};
use crate::value::Value;

/// Translation key carried by every unsupported-type error.
pub const UNSUPPORTED_TYPE_KEY: &str = "validation.unsupportedType";

/// Always exactly one `unsupported` error naming the offending type tag.
pub fn validate_unsupported(_value: &Value, field: &FieldDescriptor) -> Result<Outcome, ModelError> {
    let path = if field.key.is_empty() { "unknown" } else { field.key.as_str() };
    Ok(vec![
        ValidationError::new(path, ValidationErrorKind::Unsupported)
            .with_param("key", UNSUPPORTED_TYPE_KEY)
            .with_param("values", serde_json::json!({ "type": field.field_type.tag() })),
    ]
    .into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kind::FieldType;
    use serde_json::json;

    #[test]
    fn names_the_offending_type() {
        let field = FieldDescriptor::new("location", FieldType::Unrecognized("geo-point".into()));
        let errors = validate_unsupported(&Value::from("52.1,4.3"), &field)
            .unwrap()
            .into_errors(&field);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "location");
        assert_eq!(errors[0].param("key"), Some(&json!("validation.unsupportedType")));
        assert_eq!(errors[0].param("values"), Some(&json!({"type": "geo-point"})));
    }

    #[test]
    fn keyless_descriptor_reports_unknown() {
        let field = FieldDescriptor::new("", FieldType::Unrecognized("x".into()));
        let errors = validate_unsupported(&Value::Null, &field)
            .unwrap()
            .into_errors(&field);
        assert_eq!(errors[0].field, "unknown");
    }
}
