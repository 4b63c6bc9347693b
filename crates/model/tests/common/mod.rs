//! Shared helpers for integration tests.

#![allow(dead_code)]

use vellum_model::ValidationError;

/// Installs a test-writer subscriber filtered by `RUST_LOG`. Safe to call
/// from every test.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// `(field, kind)` pairs, for compact assertions.
pub fn summary(errors: &[ValidationError]) -> Vec<(String, &'static str)> {
    errors
        .iter()
        .map(|e| (e.field.clone(), e.kind.as_str()))
        .collect()
}
