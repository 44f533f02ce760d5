//! Login Use Case
//!
//! Authenticates user with email and password, then issues a token.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::token::TokenCodec;
use crate::application::validation::FieldValidator;
use crate::application::AuthOutput;
use crate::domain::entity::audit_log::{NewAuditLog, action};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{email::Email, user_password::RawPassword};
use crate::error::{AuthError, AuthResult};

/// Login input
#[derive(Debug, Default)]
pub struct LoginInput {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Login use case
pub struct LoginUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    tokens: Arc<TokenCodec>,
    config: Arc<AuthConfig>,
}

impl<U> LoginUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, tokens: Arc<TokenCodec>, config: Arc<AuthConfig>) -> Self {
        Self {
            user_repo,
            tokens,
            config,
        }
    }

    pub async fn execute(&self, input: LoginInput) -> AuthResult<AuthOutput> {
        let mut v = FieldValidator::new();
        let email = v.required("email", input.email, "Email is required");
        let password = v.required("password", input.password, "Password is required");
        v.finish()?;

        let (Some(email), Some(password)) = (email, password) else {
            return Err(AuthError::Internal("validated field missing".to_string()));
        };

        // An address that cannot exist is just an unknown account
        let email = Email::new(email).map_err(|_| AuthError::InvalidCredentials)?;

        let mut user = self
            .user_repo
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        // Status is checked before the password is compared
        if !user.can_login() {
            return Err(AuthError::AccountNotActive(user.status));
        }

        let password = RawPassword::for_login(password);
        if !user.password.verify(&password, self.config.pepper()) {
            return Err(AuthError::InvalidCredentials);
        }
        drop(password);

        user.record_login();
        self.user_repo
            .update_with_audit(
                &user,
                NewAuditLog::user_event(
                    user.user_id,
                    action::USER_LOGIN,
                    user.user_id,
                    "User logged in successfully",
                ),
            )
            .await?;

        let token = self
            .tokens
            .issue(user.user_id, user.email.as_str(), user.role())?;

        tracing::info!(user_id = %user.user_id, "User logged in");

        Ok(AuthOutput::new(token, &user, self.tokens.ttl_ms()))
    }
}
