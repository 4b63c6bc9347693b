//! Numeric validators (NUMBER, RANGE)

use crate::descriptor::FieldDescriptor;
use crate::error::ModelError;
use crate::validation::{Outcome, ValidationError, ValidationErrorKind};
use crate::value::{Value, number_to_json};

/// `type` for non-numbers, then the bounds.
///
/// Bounds compare the loosely coerced value and run regardless of the type
/// check, so `"15"` against `max: 10` reports both `type` and `max`. An
/// absent value skips the bounds; a value that coerces to `NaN` passes them.
pub fn validate_number(value: &Value, field: &FieldDescriptor) -> Result<Outcome, ModelError> {
    let mut errors = Vec::new();

    if !value.is_number() {
        errors.push(ValidationError::type_mismatch(
            field.key.as_str(),
            "number",
            value.type_name(),
        ));
    }

    if !value.is_null() {
        let n = value.to_number();

        if let Some(min) = field.min
            && n < min
        {
            errors.push(
                ValidationError::new(field.key.as_str(), ValidationErrorKind::Min)
                    .with_param("min", number_to_json(min)),
            );
        }

        if let Some(max) = field.max
            && n > max
        {
            errors.push(
                ValidationError::new(field.key.as_str(), ValidationErrorKind::Max)
                    .with_param("max", number_to_json(max)),
            );
        }
    }

    Ok(errors.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kind::FieldType;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use rstest::rstest;
    use serde_json::json;

    fn bounded() -> FieldDescriptor {
        FieldDescriptor::new("quantity", FieldType::Number)
            .with_min(1.0)
            .with_max(10.0)
    }

    fn kinds(value: Value) -> Vec<ValidationErrorKind> {
        let field = bounded();
        validate_number(&value, &field)
            .unwrap()
            .into_errors(&field)
            .into_iter()
            .map(|e| e.kind)
            .collect()
    }

    #[test]
    fn above_max_reports_the_bound() {
        let field = bounded();
        let errors = validate_number(&Value::from(15), &field)
            .unwrap()
            .into_errors(&field);
        assert_eq!(
            errors,
            vec![ValidationError::new("quantity", ValidationErrorKind::Max).with_param("max", 10)]
        );
        assert_eq!(errors[0].param("max"), Some(&json!(10)));
    }

    #[rstest]
    #[case::inside(Value::from(5), vec![])]
    #[case::lower_edge(Value::from(1), vec![])]
    #[case::upper_edge(Value::from(10), vec![])]
    #[case::below(Value::from(0), vec![ValidationErrorKind::Min])]
    #[case::numeric_string(Value::from("15"), vec![ValidationErrorKind::Type, ValidationErrorKind::Max])]
    #[case::text(Value::from("abc"), vec![ValidationErrorKind::Type])]
    #[case::absent(Value::Null, vec![ValidationErrorKind::Type])]
    fn bounds(#[case] value: Value, #[case] expected: Vec<ValidationErrorKind>) {
        assert_eq!(kinds(value), expected);
    }

    #[test]
    fn fractional_bounds_keep_fraction() {
        let field = FieldDescriptor::new("ratio", FieldType::Range).with_max(0.5);
        let errors = validate_number(&Value::from(0.75), &field)
            .unwrap()
            .into_errors(&field);
        assert_eq!(errors[0].param("max"), Some(&json!(0.5)));
    }

    proptest! {
        #[test]
        fn in_range_numbers_never_fail(n in 1.0f64..=10.0) {
            prop_assert!(kinds(Value::from(n)).is_empty());
        }

        #[test]
        fn out_of_range_numbers_fail_exactly_once(n in prop_oneof![-1e9f64..1.0, 10.000_001f64..1e9]) {
            prop_assert_eq!(kinds(Value::from(n)).len(), 1);
        }
    }
}
