//! Register Use Case
//!
//! Creates a new account, records the event and issues a token.

use std::sync::Arc;

use platform::password::PasswordPolicyError;

use crate::application::config::AuthConfig;
use crate::application::token::TokenCodec;
use crate::application::validation::FieldValidator;
use crate::application::AuthOutput;
use crate::domain::entity::{
    audit_log::{NewAuditLog, action},
    user::{NewUser, UserProfile},
};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    email::Email,
    user_name::UserName,
    user_password::{RawPassword, UserPassword},
    user_role::UserRole,
};
use crate::error::{AuthError, AuthResult};

/// Phone number limit (characters)
pub const PHONE_NUMBER_MAX_LENGTH: usize = 20;

/// Organization name limit (characters)
pub const ORGANIZATION_NAME_MAX_LENGTH: usize = 150;

/// Admin access level limit (characters)
pub const ACCESS_LEVEL_MAX_LENGTH: usize = 50;

/// Register input, as received
#[derive(Debug, Default)]
pub struct RegisterInput {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub user_type: Option<String>,
    pub phone_number: Option<String>,
    pub organization_name: Option<String>,
    pub permissions: Option<String>,
    pub access_level: Option<String>,
}

/// Register use case
pub struct RegisterUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    tokens: Arc<TokenCodec>,
    config: Arc<AuthConfig>,
}

impl<U> RegisterUseCase<U>
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

    pub async fn execute(&self, input: RegisterInput) -> AuthResult<AuthOutput> {
        // Field validation
        let mut v = FieldValidator::new();
        let name = v
            .required("name", input.name, "Name is required")
            .and_then(|n| v.check("name", UserName::new(n)));
        let email = v
            .required("email", input.email, "Email is required")
            .and_then(|e| v.check("email", Email::new(e)));
        let password = v
            .required("password", input.password, "Password is required")
            .and_then(|p| v.check("password", RawPassword::new(p).map_err(password_message)));
        let user_type = v.required("userType", input.user_type, "User type is required");
        let phone_number = v.max_chars(
            "phoneNumber",
            input.phone_number,
            PHONE_NUMBER_MAX_LENGTH,
            "Phone number must not exceed 20 characters",
        );
        let organization_name = v.max_chars(
            "organizationName",
            input.organization_name,
            ORGANIZATION_NAME_MAX_LENGTH,
            "Organization name must not exceed 150 characters",
        );
        let access_level = v.max_chars(
            "accessLevel",
            input.access_level,
            ACCESS_LEVEL_MAX_LENGTH,
            "Access level must not exceed 50 characters",
        );
        v.finish()?;

        let (Some(name), Some(email), Some(password), Some(user_type)) =
            (name, email, password, user_type)
        else {
            return Err(AuthError::Internal("validated field missing".to_string()));
        };

        // Reject duplicates before doing any work
        if self.user_repo.exists_by_email(&email).await? {
            return Err(AuthError::DuplicateEmail(email.as_str().to_string()));
        }

        let role = UserRole::from_user_type(&user_type)
            .ok_or_else(|| AuthError::InvalidArgument(format!("Invalid user type: {}", user_type)))?;

        let password_hash =
            UserPassword::from_raw(&password, self.config.pepper(), self.config.hash_cost)?;
        drop(password);

        let new_user = NewUser {
            name,
            email,
            phone_number,
            password: password_hash,
            profile: UserProfile::for_role(role, organization_name, input.permissions, access_level),
        };

        // Storage uniqueness is authoritative if a concurrent request won the race
        let user = self
            .user_repo
            .create_with_audit(&new_user, |user| {
                NewAuditLog::user_event(
                    user.user_id,
                    action::USER_REGISTER,
                    user.user_id,
                    "User registered successfully",
                )
            })
            .await?;

        let token = self
            .tokens
            .issue(user.user_id, user.email.as_str(), user.role())?;

        tracing::info!(
            user_id = %user.user_id,
            role = %user.role(),
            "User registered"
        );

        Ok(AuthOutput::new(token, &user, self.tokens.ttl_ms()))
    }
}

/// Field message for a password policy violation
fn password_message(err: PasswordPolicyError) -> String {
    match err {
        PasswordPolicyError::TooShort { .. } | PasswordPolicyError::TooLong { .. } => {
            "Password must be between 4 and 128 characters".to_string()
        }
        other => other.to_string(),
    }
}
