//! Get User Use Case
//!
//! Single-user and list lookups. Soft-deleted users stay visible.

use std::sync::Arc;

use crate::domain::entity::{principal::Principal, user::User};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{user_id::UserId, user_role::UserRole};
use crate::error::{AuthError, AuthResult};

/// Get user use case
pub struct GetUserUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
}

impl<U> GetUserUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>) -> Self {
        Self { user_repo }
    }

    /// Any authenticated user may look up any id
    pub async fn execute(&self, user_id: UserId) -> AuthResult<User> {
        self.user_repo
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotFound(user_id.as_i64()))
    }

    /// The record behind the current principal
    pub async fn current(&self, principal: &Principal) -> AuthResult<User> {
        self.execute(principal.user_id).await
    }
}

/// List users use case (admin only)
pub struct ListUsersUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
}

impl<U> ListUsersUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>) -> Self {
        Self { user_repo }
    }

    /// All users ordered by id
    pub async fn execute(&self, actor: &Principal) -> AuthResult<Vec<User>> {
        actor.require_role(UserRole::Admin)?;
        self.user_repo.find_all().await
    }
}
