//! End-to-end validation of declared models.

mod common;

use std::sync::Arc;

use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::json;
use vellum_model::prelude::*;
use vellum_model::{declare_field, validate_dynamic_rules};

use common::{init_tracing, summary};

// ============================================================================
// MODELS
// ============================================================================

model! {
    #[derive(Debug, Clone, Default)]
    pub struct Address {
        #[field(FieldOptions::new(FieldType::String).required())]
        pub city: Value,
    }
}

model! {
    #[derive(Debug, Clone, Default)]
    pub struct Owner {
        #[field(FieldOptions::new(FieldType::String).required().label("Owner name"))]
        pub name: Value,
    }
}

model! {
    #[derive(Debug, Clone)]
    pub struct Pet {
        #[field(FieldOptions::new(FieldType::String).required().pattern("^[A-Za-z ]+$"))]
        pub name: Value,

        #[field(FieldOptions::new(FieldType::Enum).enum_values(["available", "pending", "sold"]))]
        pub status: Value,

        #[field(FieldOptions::new(FieldType::Number).range(1.0, 10.0))]
        pub quantity: Value,

        #[field(FieldOptions::new(FieldType::Color))]
        pub collar: Value,

        #[field(FieldOptions::array_of(FieldDescriptor::new("tag", FieldType::String)))]
        pub tags: Value,

        #[field(FieldOptions::object::<Address>())]
        pub address: Value,

        #[field(FieldOptions::class::<Owner>())]
        pub owner: Option<Arc<Owner>>,
    }
}

fn valid_pet() -> Pet {
    Pet {
        name: "Rex".into(),
        status: "sold".into(),
        quantity: 3.into(),
        collar: "#1a2b3c".into(),
        tags: vec!["friendly"].into(),
        address: Value::object([("city", "Paris")]),
        owner: Some(Arc::new(Owner { name: "Ada".into() })),
    }
}

// ============================================================================
// FIELD RULES
// ============================================================================

#[tokio::test]
async fn valid_pet_has_no_errors() {
    init_tracing();
    let errors = valid_pet().validate().await.unwrap();
    assert_eq!(errors, vec![]);
}

#[test]
fn enum_value_outside_the_list() {
    let pet = Pet {
        status: "lost".into(),
        ..valid_pet()
    };
    let errors = validate_dynamic_rules(&pet).unwrap();

    assert_eq!(summary(&errors), vec![("status".to_owned(), "enum")]);
    assert_eq!(
        errors[0].param("enum"),
        Some(&json!(["available", "pending", "sold"]))
    );
}

#[test]
fn number_above_max() {
    let pet = Pet {
        quantity: 15.into(),
        ..valid_pet()
    };
    let errors = validate_dynamic_rules(&pet).unwrap();

    assert_eq!(summary(&errors), vec![("quantity".to_owned(), "max")]);
    assert_eq!(errors[0].param("max"), Some(&json!(10)));
}

#[rstest]
#[case("#FFF", vec![])]
#[case("#1a2b3c", vec![])]
#[case("blue", vec![("collar".to_owned(), "pattern")])]
fn collar_color(#[case] collar: &str, #[case] expected: Vec<(String, &'static str)>) {
    let pet = Pet {
        collar: collar.into(),
        ..valid_pet()
    };
    assert_eq!(summary(&validate_dynamic_rules(&pet).unwrap()), expected);
}

#[test]
fn name_pattern_and_type() {
    let pet = Pet {
        name: 42.into(),
        ..valid_pet()
    };
    assert_eq!(
        summary(&validate_dynamic_rules(&pet).unwrap()),
        vec![("name".to_owned(), "type"), ("name".to_owned(), "pattern")]
    );
}

// ============================================================================
// NESTED PATHS
// ============================================================================

#[test]
fn nested_object_error_is_pathed() {
    let pet = Pet {
        address: Value::object([("city", 123)]),
        ..valid_pet()
    };
    let errors = validate_dynamic_rules(&pet).unwrap();

    assert_eq!(summary(&errors), vec![("address.city".to_owned(), "type")]);
    assert_eq!(
        serde_json::to_value(&errors).unwrap(),
        json!([{
            "field": "address.city",
            "type": "type",
            "params": {"expected": "string", "actual": "number"}
        }])
    );
}

#[test]
fn array_element_error_is_indexed() {
    let pet = Pet {
        tags: Value::from(vec![Value::from("ok"), Value::from(5)]),
        ..valid_pet()
    };
    assert_eq!(
        summary(&validate_dynamic_rules(&pet).unwrap()),
        vec![("tags[1]".to_owned(), "type")]
    );
}

#[test]
fn missing_optional_nested_values_pass() {
    let pet = Pet {
        address: Value::Null,
        owner: None,
        ..valid_pet()
    };
    assert_eq!(validate_dynamic_rules(&pet).unwrap(), vec![]);
}

#[test]
fn nested_model_errors_are_reported_twice() {
    // The nested model is validated on its own (first) and again by the
    // CLASS validator walking the same fields.
    let pet = Pet {
        owner: Some(Arc::new(Owner { name: 5.into() })),
        ..valid_pet()
    };
    assert_eq!(
        summary(&validate_dynamic_rules(&pet).unwrap()),
        vec![
            ("owner.name".to_owned(), "type"),
            ("owner.name".to_owned(), "type"),
        ]
    );
}

// ============================================================================
// UNSUPPORTED TYPES
// ============================================================================

model! {
    #[derive(Default)]
    struct Gadget {
        #[field(FieldOptions::new(FieldType::from("geo-point".to_owned())))]
        location: Value,
    }
}

#[rstest]
#[case(Value::Null)]
#[case(Value::from("52.37,4.89"))]
#[case(Value::object([("lat", 52.37), ("lng", 4.89)]))]
fn unrecognized_type_reports_unsupported_once(#[case] location: Value) {
    let errors = validate_dynamic_rules(&Gadget { location }).unwrap();
    assert_eq!(summary(&errors), vec![("location".to_owned(), "unsupported")]);
    assert_eq!(errors[0].param("values"), Some(&json!({"type": "geo-point"})));
}

// ============================================================================
// CUSTOM RULES
// ============================================================================

model! {
    #[derive(Default)]
    struct Account {
        #[field(FieldOptions::new(FieldType::String).required().pattern("^[a-z]{5,}$"))]
        username: Value,
    }

    custom_rules(self) {
        match self.username.as_str() {
            Some("boom") => Err(ModelError::custom_rules("Account", "directory unavailable")),
            Some("root") => Ok(vec![ValidationError::new("username", ValidationErrorKind::Unique)]),
            _ => Ok(Vec::new()),
        }
    }
}

#[tokio::test]
async fn custom_errors_follow_field_errors() {
    let account = Account {
        username: "root".into(),
    };
    let errors = account.validate().await.unwrap();
    assert_eq!(
        summary(&errors),
        vec![
            ("username".to_owned(), "pattern"),
            ("username".to_owned(), "unique"),
        ]
    );
}

#[tokio::test]
async fn failing_hook_aborts_validation() {
    let account = Account {
        username: "boom".into(),
    };
    let err = account.validate().await.unwrap_err();
    assert_eq!(err.code(), "MODEL_CUSTOM_RULES");
    assert!(err.is_retryable());
}

// ============================================================================
// STRUCTURAL FAILURES
// ============================================================================

model! {
    #[derive(Default)]
    struct BadPattern {
        #[field(FieldOptions::new(FieldType::String).pattern("([a-z"))]
        code: Value,
    }
}

#[tokio::test]
async fn invalid_pattern_is_reported_on_first_use() {
    let err = BadPattern { code: "abc".into() }.validate().await.unwrap_err();
    assert!(matches!(err, ModelError::InvalidPattern { .. }));
}

// ============================================================================
// DECLARATION API
// ============================================================================

model! {
    #[derive(Default)]
    struct Coupon {
        #[field(FieldOptions::new(FieldType::String))]
        code: Value,
    }
}

#[test]
fn later_declaration_overrides_recognized_options() {
    declare_field::<Coupon>(
        "code",
        FieldOptions::new(FieldType::String).pattern("^[A-Z]{3}$"),
    );

    let errors = validate_dynamic_rules(&Coupon { code: "abc".into() }).unwrap();
    assert_eq!(summary(&errors), vec![("code".to_owned(), "pattern")]);
}

struct Invite {
    email: Value,
}

impl Model for Invite {
    fn model_type(&self) -> ModelType {
        ModelType::of::<Self>()
    }

    fn declare_fields(fields: &mut FieldDeclarations<'_>) {
        fields
            .field("email", FieldOptions::new(FieldType::Email).required())
            .display_name("email", "E-mail")
            .custom("email", |value| match value.as_str() {
                Some(email) if !email.contains('@') => vec![ValidationError::custom("")],
                _ => Vec::new(),
            });
    }

    fn field_names(&self) -> Vec<&str> {
        vec!["email"]
    }

    fn field(&self, name: &str) -> Value {
        match name {
            "email" => self.email.clone(),
            _ => Value::Null,
        }
    }
}

#[tokio::test]
async fn per_field_custom_validator() {
    let invite = Invite {
        email: "nobody".into(),
    };
    let errors = invite.validate().await.unwrap();
    assert_eq!(summary(&errors), vec![("email".to_owned(), "custom")]);

    let invite = Invite {
        email: "a@b.c".into(),
    };
    assert_eq!(invite.validate().await.unwrap(), vec![]);
}

struct Signup {
    email: Value,
}

impl Model for Signup {
    fn model_type(&self) -> ModelType {
        ModelType::of::<Self>()
    }

    fn declare_fields(fields: &mut FieldDeclarations<'_>) {
        fields
            .field("email", FieldOptions::new(FieldType::Email))
            .custom("email", |value| match value.as_str() {
                Some(email) if !email.contains('@') => {
                    vec![ValidationError::new("", ValidationErrorKind::Pattern)]
                }
                _ => Vec::new(),
            })
            .custom("email", |value| {
                if value.to_text().len() < 5 {
                    vec![ValidationError::new("", ValidationErrorKind::Min)]
                } else {
                    Vec::new()
                }
            })
            // Redeclaring recognized options keeps the validators.
            .field("email", FieldOptions::new(FieldType::Email).required());
    }

    fn field_names(&self) -> Vec<&str> {
        vec!["email"]
    }

    fn field(&self, name: &str) -> Value {
        match name {
            "email" => self.email.clone(),
            _ => Value::Null,
        }
    }
}

#[test]
fn custom_validators_accumulate() {
    let errors = validate_dynamic_rules(&Signup { email: "ab".into() }).unwrap();
    assert_eq!(
        summary(&errors),
        vec![("email".to_owned(), "pattern"), ("email".to_owned(), "min")]
    );

    let errors = validate_dynamic_rules(&Signup { email: "a@b.io".into() }).unwrap();
    assert_eq!(errors, vec![]);
}
