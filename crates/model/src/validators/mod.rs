//! Per-type field validators.
//!
//! Every validator has the [`FieldValidator`](crate::validation::FieldValidator)
//! signature and reports errors against `descriptor.key`. Only structural
//! problems (a bad regex, a failing nested constructor) are returned as `Err`.

pub mod boolean;
pub mod choice;
pub mod collection;
pub mod fallback;
pub mod file;
pub mod nested;
pub mod numeric;
pub mod temporal;
pub mod text;
