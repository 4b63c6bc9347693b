//! Date and time validators (DATE, TIME, DATETIME)

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};

use crate::descriptor::FieldDescriptor;
use crate::error::ModelError;
use crate::validation::{Outcome, ValidationError};
use crate::value::Value;

const DATETIME_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"];
const TIME_FORMATS: [&str; 2] = ["%H:%M:%S%.f", "%H:%M"];

/// `type` unless the value is a parseable date.
///
/// Finite numbers count as epoch milliseconds. Strings are accepted in
/// RFC 3339, as local date-times, bare dates, or bare times of day.
pub fn validate_date(value: &Value, field: &FieldDescriptor) -> Result<Outcome, ModelError> {
    let errors = if is_date(value) {
        Vec::new()
    } else {
        vec![ValidationError::type_mismatch(
            field.key.as_str(),
            "date",
            value.type_name(),
        )]
    };
    Ok(errors.into())
}

fn is_date(value: &Value) -> bool {
    match value {
        Value::Number(ms) => ms.is_finite(),
        Value::String(s) => parses_as_date(s.trim()),
        _ => false,
    }
}

fn parses_as_date(s: &str) -> bool {
    DateTime::parse_from_rfc3339(s).is_ok()
        || DATETIME_FORMATS
            .iter()
            .any(|format| NaiveDateTime::parse_from_str(s, format).is_ok())
        || NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok()
        || TIME_FORMATS
            .iter()
            .any(|format| NaiveTime::parse_from_str(s, format).is_ok())
}
