//! Macros for declaring models with minimal boilerplate.
//!
//! # Available Macros
//!
//! - [`model!`]: define a model struct together with its field metadata,
//!   field enumeration and field access
//!
//! # Examples
//!
//! ```rust,ignore
//! use vellum_model::prelude::*;
//!
//! model! {
//!     #[derive(Debug, Clone, Default)]
//!     pub struct Pet {
//!         #[field(FieldOptions::new(FieldType::String).required())]
//!         pub name: String,
//!
//!         #[field(FieldOptions::new(FieldType::Enum).enum_values(["available", "pending", "sold"]))]
//!         pub status: String,
//!
//!         #[field(FieldOptions::class::<Owner>())]
//!         pub owner: Option<Arc<Owner>>,
//!     }
//! }
//! ```

// ============================================================================
// MODEL MACRO
// ============================================================================

/// Defines a model struct and implements [`Model`](crate::Model) for it.
///
/// Every field starts with `#[field(options)]`, where `options` is an
/// expression evaluating to [`FieldOptions`](crate::FieldOptions). Other
/// attributes and doc comments follow it. Field types must be `Clone` and
/// convertible into [`Value`](crate::Value).
///
/// # Variants
///
/// **Metadata only**:
/// ```rust,ignore
/// model! {
///     #[derive(Default)]
///     pub struct Tag {
///         #[field(FieldOptions::new(FieldType::String).required())]
///         pub name: String,
///     }
/// }
/// ```
///
/// **With custom rules** (the body may `.await`):
/// ```rust,ignore
/// model! {
///     #[derive(Default)]
///     pub struct Signup {
///         #[field(FieldOptions::new(FieldType::Password).required())]
///         pub password: String,
///         #[field(FieldOptions::new(FieldType::Password).required())]
///         pub confirm: String,
///     }
///
///     custom_rules(self) {
///         if self.password == self.confirm {
///             Ok(vec![])
///         } else {
///             Ok(vec![ValidationError::new("confirm", ValidationErrorKind::Dependency)])
///         }
///     }
/// }
/// ```
#[macro_export]
macro_rules! model {
    // ── Variant 1: fields + custom rules ─────────────────────────────────
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                #[field($opts:expr)]
                $(#[$fmeta:meta])*
                $fvis:vis $field:ident : $fty:ty
            ),* $(,)?
        }

        custom_rules($self_:ident) $rules:block
    ) => {
        $(#[$meta])*
        $vis struct $name {
            $( $(#[$fmeta])* $fvis $field: $fty, )*
        }

        #[$crate::__private::async_trait]
        impl $crate::Model for $name {
            $crate::model!(@body $name { $( $field => $opts ),* });

            async fn validate_custom_rules(
                &$self_,
            ) -> ::core::result::Result<
                ::std::vec::Vec<$crate::ValidationError>,
                $crate::ModelError,
            > $rules
        }
    };

    // ── Variant 2: fields only ───────────────────────────────────────────
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                #[field($opts:expr)]
                $(#[$fmeta:meta])*
                $fvis:vis $field:ident : $fty:ty
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis struct $name {
            $( $(#[$fmeta])* $fvis $field: $fty, )*
        }

        impl $crate::Model for $name {
            $crate::model!(@body $name { $( $field => $opts ),* });
        }
    };

    // ── Internal: the synchronous part of the impl ───────────────────────
    (@body $name:ident { $( $field:ident => $opts:expr ),* }) => {
        fn model_type(&self) -> $crate::ModelType {
            $crate::ModelType::of::<Self>()
        }

        #[allow(unused_variables)]
        fn declare_fields(fields: &mut $crate::FieldDeclarations<'_>) {
            $( fields.field(::core::stringify!($field), $opts); )*
        }

        fn field_names(&self) -> ::std::vec::Vec<&str> {
            ::std::vec![$( ::core::stringify!($field) ),*]
        }

        fn field(&self, name: &str) -> $crate::Value {
            match name {
                $( ::core::stringify!($field) => $crate::Value::from(::core::clone::Clone::clone(&self.$field)), )*
                _ => $crate::Value::Null,
            }
        }
    };
}
