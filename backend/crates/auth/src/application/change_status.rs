//! Change Status Use Cases
//!
//! Admin-only status changes, including soft delete.

use std::sync::Arc;

use crate::application::validation::FieldValidator;
use crate::domain::entity::{
    audit_log::{NewAuditLog, action},
    principal::Principal,
    user::User,
};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{user_id::UserId, user_role::UserRole, user_status::UserStatus};
use crate::error::{AuthError, AuthResult};

/// Change status use case
pub struct ChangeStatusUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
}

impl<U> ChangeStatusUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>) -> Self {
        Self { user_repo }
    }

    /// Parse the requested status and apply it
    pub async fn execute(
        &self,
        actor: &Principal,
        user_id: UserId,
        status: Option<String>,
    ) -> AuthResult<User> {
        actor.require_role(UserRole::Admin)?;

        let mut v = FieldValidator::new();
        let status = v
            .required("status", status, "Status is required")
            .and_then(|s| {
                v.check(
                    "status",
                    UserStatus::from_code(&s)
                        .ok_or("Status must be one of ACTIVE, SUSPENDED, DELETED"),
                )
            });
        v.finish()?;

        let Some(status) = status else {
            return Err(AuthError::Internal("validated field missing".to_string()));
        };

        self.apply(actor, user_id, status, action::USER_STATUS_CHANGE)
            .await
    }

    pub(crate) async fn apply(
        &self,
        actor: &Principal,
        user_id: UserId,
        next: UserStatus,
        audit_action: &str,
    ) -> AuthResult<User> {
        let mut user = self
            .user_repo
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotFound(user_id.as_i64()))?;

        let previous = user.status;
        user.change_status(next)?;

        let entry = NewAuditLog::user_event(
            actor.user_id,
            audit_action,
            user.user_id,
            format!("User status changed from {} to {}", previous, next),
        );
        self.user_repo.update_with_audit(&user, entry).await?;

        tracing::info!(
            user_id = %user.user_id,
            actor_id = %actor.user_id,
            from = %previous,
            to = %next,
            "User status changed"
        );

        Ok(user)
    }
}

/// Delete user use case (soft delete)
pub struct DeleteUserUseCase<U>
where
    U: UserRepository,
{
    inner: ChangeStatusUseCase<U>,
}

impl<U> DeleteUserUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>) -> Self {
        Self {
            inner: ChangeStatusUseCase::new(user_repo),
        }
    }

    /// Mark the user `DELETED`; the row is kept
    pub async fn execute(&self, actor: &Principal, user_id: UserId) -> AuthResult<()> {
        actor.require_role(UserRole::Admin)?;
        self.inner
            .apply(actor, user_id, UserStatus::Deleted, action::USER_DELETE)
            .await?;
        Ok(())
    }
}
