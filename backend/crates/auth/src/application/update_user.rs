//! Update User Use Case
//!
//! Partial profile update by the user themselves or an admin.

use std::sync::Arc;

use crate::application::register::{ORGANIZATION_NAME_MAX_LENGTH, PHONE_NUMBER_MAX_LENGTH};
use crate::application::validation::FieldValidator;
use crate::domain::entity::{
    audit_log::{NewAuditLog, action},
    principal::Principal,
    user::User,
};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{email::Email, user_id::UserId, user_name::UserName};
use crate::error::{AuthError, AuthResult};

/// Fields to change; `None` leaves the field as is
#[derive(Debug, Default)]
pub struct UpdateUserInput {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    /// Applied to organizers only
    pub organization_name: Option<String>,
}

/// Update user use case
pub struct UpdateUserUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
}

impl<U> UpdateUserUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>) -> Self {
        Self { user_repo }
    }

    pub async fn execute(
        &self,
        actor: &Principal,
        user_id: UserId,
        input: UpdateUserInput,
    ) -> AuthResult<User> {
        actor.require_self_or_admin(user_id)?;

        let mut v = FieldValidator::new();
        let name = input.name.and_then(|n| v.check("name", UserName::new(n)));
        let email = input.email.and_then(|e| v.check("email", Email::new(e)));
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
        v.finish()?;

        let mut user = self
            .user_repo
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotFound(user_id.as_i64()))?;

        let mut changed: Vec<&str> = Vec::new();

        if let Some(name) = name {
            user.name = name;
            changed.push("name");
        }

        if let Some(email) = email {
            if !email.same_address(&user.email) && self.user_repo.exists_by_email(&email).await? {
                return Err(AuthError::DuplicateEmail(email.as_str().to_string()));
            }
            user.email = email;
            changed.push("email");
        }

        if let Some(phone_number) = phone_number {
            user.phone_number = Some(phone_number);
            changed.push("phoneNumber");
        }

        if let Some(organization_name) = organization_name {
            if user.set_organization_name(organization_name) {
                changed.push("organizationName");
            }
        }

        // Nothing to write or audit
        if changed.is_empty() {
            return Ok(user);
        }

        let entry = NewAuditLog::user_event(
            actor.user_id,
            action::USER_UPDATE,
            user.user_id,
            format!("User updated: {}", changed.join(", ")),
        );
        self.user_repo.update_with_audit(&user, entry).await?;

        tracing::info!(
            user_id = %user.user_id,
            actor_id = %actor.user_id,
            fields = ?changed,
            "User updated"
        );

        Ok(user)
    }
}
