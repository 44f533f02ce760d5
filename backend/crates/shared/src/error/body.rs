//! Error Body - Wire shape of error responses
//!
//! Every error leaving the HTTP boundary is serialized as [`ErrorBody`]:
//!
//! ```json
//! { "status": 409, "error": "Conflict", "message": "Email already exists: a@x.com",
//!   "timestamp": "2025-01-01T00:00:00Z", "path": "/api/auth/register" }
//! ```
//!
//! Validation failures additionally carry `errors` (field → message), and
//! unexpected failures carry `details` (the failing error type).

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::app_error::{AppError, FieldErrors};

/// Serialized error response
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
    pub status: u16,
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<FieldErrors>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    pub timestamp: DateTime<Utc>,
    /// Filled in by the router once the request path is known
    pub path: Option<String>,
}

impl ErrorBody {
    /// Build a body stamped with the current time and no path
    pub fn from_error(err: &AppError) -> Self {
        Self {
            status: err.status_code(),
            error: err.title().to_string(),
            message: err.message().to_string(),
            errors: err.field_errors().cloned(),
            details: err.details().map(str::to_string),
            timestamp: Utc::now(),
            path: None,
        }
    }

    /// Attach the request path
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }
}

impl From<&AppError> for ErrorBody {
    fn from(err: &AppError) -> Self {
        Self::from_error(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_error_shape() {
        let err = AppError::conflict("Email already exists: a@x.com");
        let body = ErrorBody::from_error(&err).with_path("/api/auth/register");
        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(json["status"], 409);
        assert_eq!(json["error"], "Conflict");
        assert_eq!(json["message"], "Email already exists: a@x.com");
        assert_eq!(json["path"], "/api/auth/register");
        assert!(json.get("timestamp").is_some());
        assert!(json.get("errors").is_none());
        assert!(json.get("details").is_none());
    }

    #[test]
    fn test_validation_error_shape() {
        let mut errors = FieldErrors::new();
        errors.insert("email".into(), "Email must be valid".into());
        let body = ErrorBody::from_error(&AppError::validation(errors));
        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(json["status"], 400);
        assert_eq!(json["error"], "Validation Failed");
        assert_eq!(json["message"], "Invalid input data");
        assert_eq!(json["errors"]["email"], "Email must be valid");
    }

    #[test]
    fn test_unexpected_error_shape() {
        let err = AppError::internal("An unexpected error occurred").with_details("sqlx::Error");
        let json = serde_json::to_value(ErrorBody::from(&err)).unwrap();
        assert_eq!(json["details"], "sqlx::Error");
    }
}
