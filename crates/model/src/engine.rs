//! Whole-model validation.

use crate::analyzer::{AnalyzeTarget, Analyzer};
use crate::error::ModelError;
use crate::model::Model;
use crate::validation::{ValidationError, prefix, validate_field};
use crate::value::Value;

/// Validates every analyzed field of `instance` against its descriptor.
///
/// For fields with analyzed nested fields and a nested model value, the
/// nested model is additionally validated on its own and its errors are
/// re-pathed under the field name. Those errors come before the field's own
/// errors. The OBJECT/CLASS validators walk the same nested fields, so a
/// nested problem can be reported twice; nothing is deduplicated.
///
/// # Errors
///
/// Structural failures only: recursion limit, nested construction failure,
/// invalid pattern.
pub fn validate_dynamic_rules(instance: &dyn Model) -> Result<Vec<ValidationError>, ModelError> {
    let analyzed = Analyzer::global().analyze(AnalyzeTarget::Instance(instance))?;
    let mut errors = Vec::new();

    for (field, descriptor) in analyzed.iter() {
        let value = instance.field(field);
        let field_errors = validate_field(&value, descriptor)?;

        if descriptor.nested_fields.is_some()
            && let Value::Model(nested) = &value
        {
            for error in validate_dynamic_rules(nested.as_ref())? {
                errors.push(prefix(error, field));
            }
        }

        errors.extend(field_errors);
    }

    Ok(errors)
}

/// Field metadata errors followed by the model's custom-rule errors.
pub async fn validate_model(model: &dyn Model) -> Result<Vec<ValidationError>, ModelError> {
    let mut errors = validate_dynamic_rules(model)?;
    errors.extend(model.validate_custom_rules().await?);

    tracing::debug!(
        model = model.model_type().name(),
        errors = errors.len(),
        "validated model"
    );

    Ok(errors)
}
