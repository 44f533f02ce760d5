//! User Statistics Use Case

use std::sync::Arc;

use crate::domain::entity::principal::Principal;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{user_role::UserRole, user_status::UserStatus};
use crate::error::AuthResult;

/// Account counts; `total` includes deleted users
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserStatistics {
    pub total: i64,
    pub active: i64,
    pub suspended: i64,
}

pub struct UserStatisticsUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
}

impl<U> UserStatisticsUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>) -> Self {
        Self { user_repo }
    }

    pub async fn execute(&self, actor: &Principal) -> AuthResult<UserStatistics> {
        actor.require_role(UserRole::Admin)?;

        Ok(UserStatistics {
            total: self.user_repo.count().await?,
            active: self.user_repo.count_by_status(UserStatus::Active).await?,
            suspended: self.user_repo.count_by_status(UserStatus::Suspended).await?,
        })
    }
}
