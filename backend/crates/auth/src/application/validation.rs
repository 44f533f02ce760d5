//! Field Validation
//!
//! Collects per-field messages so a request reports every problem at once.

use std::fmt::Display;

use kernel::error::app_error::FieldErrors;

use crate::error::{AuthError, AuthResult};

/// Accumulates field errors; the first error per field wins
#[derive(Debug, Default)]
pub struct FieldValidator {
    errors: FieldErrors,
}

impl FieldValidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a failure for `field`
    pub fn reject(&mut self, field: &str, message: impl Into<String>) {
        self.errors
            .entry(field.to_string())
            .or_insert_with(|| message.into());
    }

    /// Keep the value on success, record the error message otherwise
    pub fn check<T, E: Display>(&mut self, field: &str, result: Result<T, E>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                self.reject(field, e.to_string());
                None
            }
        }
    }

    /// Required, non-blank string
    pub fn required(&mut self, field: &str, value: Option<String>, message: &str) -> Option<String> {
        match value {
            Some(v) if !v.trim().is_empty() => Some(v),
            _ => {
                self.reject(field, message);
                None
            }
        }
    }

    /// Optional string bounded in characters
    pub fn max_chars(
        &mut self,
        field: &str,
        value: Option<String>,
        max: usize,
        message: &str,
    ) -> Option<String> {
        match value {
            Some(v) if v.chars().count() > max => {
                self.reject(field, message);
                None
            }
            other => other,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// `Validation` error if anything was rejected
    pub fn finish(self) -> AuthResult<()> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(AuthError::Validation(self.errors))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collects_all_fields() {
        let mut v = FieldValidator::new();
        v.required("name", None, "Name is required");
        v.required("email", Some("   ".into()), "Email is required");
        v.max_chars("phoneNumber", Some("1".repeat(21)), 20, "too long");

        match v.finish() {
            Err(AuthError::Validation(fields)) => {
                assert_eq!(fields.len(), 3);
                assert_eq!(fields["name"], "Name is required");
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_first_error_per_field_wins() {
        let mut v = FieldValidator::new();
        v.reject("email", "Email is required");
        v.reject("email", "Email must be valid");
        match v.finish() {
            Err(AuthError::Validation(fields)) => assert_eq!(fields["email"], "Email is required"),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_passes_values_through() {
        let mut v = FieldValidator::new();
        assert_eq!(v.required("name", Some("Al".into()), "x"), Some("Al".into()));
        assert_eq!(v.max_chars("phone", None, 20, "x"), None);
        assert_eq!(v.check::<_, String>("n", Ok(5)), Some(5));
        assert!(v.is_valid());
        assert!(v.finish().is_ok());
    }
}
