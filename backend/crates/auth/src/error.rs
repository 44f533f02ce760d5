//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{
    app_error::{AppError, FieldErrors},
    kind::ErrorKind,
};
use platform::bearer::BearerError;
use platform::password::PasswordHashError;
use thiserror::Error;

use crate::application::token::TokenError;
use crate::domain::value_object::user_status::UserStatus;

/// Generic message for failures the client cannot act on
const UNEXPECTED_MESSAGE: &str = "An unexpected error occurred";

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Request body failed field validation
    #[error("Invalid input data")]
    Validation(FieldErrors),

    /// Semantically invalid argument (e.g. unknown user type)
    #[error("{0}")]
    InvalidArgument(String),

    /// Email already registered (case-insensitive)
    #[error("Email already exists: {0}")]
    DuplicateEmail(String),

    /// Unknown email or wrong password; indistinguishable on purpose
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Account exists but is not active
    #[error("User account is {0}")]
    AccountNotActive(UserStatus),

    /// Missing or unusable bearer token
    #[error("{0}")]
    Unauthenticated(String),

    /// Authenticated but not allowed
    #[error("Access denied")]
    Forbidden,

    /// User not found
    #[error("User not found with id: {0}")]
    UserNotFound(i64),

    /// Status change out of a terminal state
    #[error("Cannot change user status from {from} to {to}")]
    InvalidStatusTransition { from: UserStatus, to: UserStatus },

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::Validation(_) | AuthError::InvalidArgument(_) => ErrorKind::BadRequest,
            AuthError::DuplicateEmail(_) | AuthError::InvalidStatusTransition { .. } => {
                ErrorKind::Conflict
            }
            AuthError::InvalidCredentials
            | AuthError::AccountNotActive(_)
            | AuthError::Unauthenticated(_) => ErrorKind::Unauthorized,
            AuthError::Forbidden => ErrorKind::Forbidden,
            AuthError::UserNotFound(_) => ErrorKind::NotFound,
            AuthError::Database(_) | AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    ///
    /// Server-side failures get a generic message plus the failing type in
    /// `details`; everything else carries its own message.
    pub fn to_app_error(&self) -> AppError {
        match self {
            AuthError::Validation(fields) => AppError::validation(fields.clone()),
            AuthError::Database(_) => {
                AppError::new(self.kind(), UNEXPECTED_MESSAGE).with_details("sqlx::Error")
            }
            AuthError::Internal(_) => {
                AppError::new(self.kind(), UNEXPECTED_MESSAGE).with_details("auth::Internal")
            }
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            AuthError::AccountNotActive(status) => {
                tracing::warn!(status = %status, "Login attempt on inactive account");
            }
            AuthError::Forbidden => {
                tracing::warn!("Access denied");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<AppError> for AuthError {
    fn from(err: AppError) -> Self {
        match err.field_errors() {
            Some(fields) => AuthError::Validation(fields.clone()),
            None if err.is_client_error() => AuthError::InvalidArgument(err.message().to_string()),
            None => AuthError::Internal(err.to_string()),
        }
    }
}

impl From<JsonRejection> for AuthError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::from(rejection).into()
    }
}

impl From<PathRejection> for AuthError {
    fn from(rejection: PathRejection) -> Self {
        AppError::from(rejection).into()
    }
}

impl From<QueryRejection> for AuthError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::from(rejection).into()
    }
}

impl From<PasswordHashError> for AuthError {
    fn from(err: PasswordHashError) -> Self {
        AuthError::Internal(err.to_string())
    }
}

impl From<TokenError> for AuthError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Encoding(msg) => AuthError::Internal(msg),
            other => AuthError::Unauthenticated(other.to_string()),
        }
    }
}

impl From<BearerError> for AuthError {
    fn from(err: BearerError) -> Self {
        AuthError::Unauthenticated(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            AuthError::Validation(FieldErrors::new()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AuthError::InvalidArgument("Invalid user type: GUEST".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AuthError::DuplicateEmail("a@x.com".into()).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(AuthError::InvalidCredentials.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            AuthError::AccountNotActive(UserStatus::Suspended).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(AuthError::Forbidden.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(AuthError::UserNotFound(7).status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            AuthError::InvalidStatusTransition {
                from: UserStatus::Deleted,
                to: UserStatus::Active
            }
            .status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AuthError::Internal("boom".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            AuthError::DuplicateEmail("a@x.com".into()).to_string(),
            "Email already exists: a@x.com"
        );
        assert_eq!(
            AuthError::AccountNotActive(UserStatus::Suspended).to_string(),
            "User account is SUSPENDED"
        );
        assert_eq!(
            AuthError::UserNotFound(7).to_string(),
            "User not found with id: 7"
        );
        assert_eq!(
            AuthError::InvalidCredentials.to_string(),
            "Invalid email or password"
        );
    }

    #[test]
    fn test_internal_details_are_not_leaked() {
        let app = AuthError::Internal("pool poisoned at 0xdead".into()).to_app_error();
        assert_eq!(app.message(), "An unexpected error occurred");
        assert_eq!(app.details(), Some("auth::Internal"));
    }

    #[test]
    fn test_validation_keeps_fields() {
        let mut fields = FieldErrors::new();
        fields.insert("email".into(), "Email must be valid".into());
        let app = AuthError::Validation(fields).to_app_error();
        assert_eq!(app.title(), "Validation Failed");
        assert!(app.field_errors().is_some_and(|f| f.contains_key("email")));
    }

    #[test]
    fn test_token_errors_are_unauthenticated() {
        let err: AuthError = TokenError::Expired.into();
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
        let err: AuthError = TokenError::Encoding("bad key".into()).into();
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
