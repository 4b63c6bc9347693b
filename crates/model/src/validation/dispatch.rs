use crate::descriptor::FieldDescriptor;
use crate::error::ModelError;
use crate::kind::FieldType;
use crate::validators;
use crate::value::Value;

use super::Outcome;

/// Signature shared by every per-type validator.
pub type FieldValidator = fn(&Value, &FieldDescriptor) -> Result<Outcome, ModelError>;

/// Returns the validator for a field type tag.
///
/// Total over [`FieldType`]: tags outside the known set go to the
/// unsupported-type validator.
#[must_use]
pub fn dispatch(field_type: &FieldType) -> FieldValidator {
    match field_type {
        FieldType::String
        | FieldType::Textarea
        | FieldType::Email
        | FieldType::Password
        | FieldType::Url
        | FieldType::Tel => validators::text::validate_string,
        FieldType::Number | FieldType::Range => validators::numeric::validate_number,
        FieldType::Boolean | FieldType::Checkbox | FieldType::Radio => {
            validators::boolean::validate_boolean
        }
        FieldType::Date | FieldType::Time | FieldType::DateTime => {
            validators::temporal::validate_date
        }
        FieldType::Select | FieldType::Enum => validators::choice::validate_enum,
        FieldType::Object => validators::nested::validate_object,
        FieldType::Class => validators::nested::validate_class,
        FieldType::Array => validators::collection::validate_array,
        FieldType::File => validators::file::validate_file,
        FieldType::Color => validators::text::validate_color,
        FieldType::Hidden => validators::text::validate_hidden,
        FieldType::Unrecognized(_) => validators::fallback::validate_unsupported,
    }
}
