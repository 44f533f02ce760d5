//! Application Layer
//!
//! Use cases and application services.

pub mod audit;
pub mod change_status;
pub mod config;
pub mod get_user;
pub mod login;
pub mod register;
pub mod token;
pub mod update_user;
pub mod user_statistics;
pub mod validation;

use crate::domain::entity::user::User;
use crate::domain::value_object::{user_id::UserId, user_role::UserRole};

// Re-exports
pub use audit::{AuditQuery, QueryAuditLogsUseCase};
pub use change_status::{ChangeStatusUseCase, DeleteUserUseCase};
pub use config::AuthConfig;
pub use get_user::{GetUserUseCase, ListUsersUseCase};
pub use login::{LoginInput, LoginUseCase};
pub use register::{RegisterInput, RegisterUseCase};
pub use token::{Claims, TokenCodec, TokenError};
pub use update_user::{UpdateUserInput, UpdateUserUseCase};
pub use user_statistics::{UserStatistics, UserStatisticsUseCase};

/// Result of a successful register or login
#[derive(Debug, Clone)]
pub struct AuthOutput {
    pub token: String,
    pub user_id: UserId,
    pub email: String,
    pub name: String,
    pub role: UserRole,
    /// Token lifetime in milliseconds
    pub expires_in: i64,
}

impl AuthOutput {
    pub fn new(token: String, user: &User, expires_in: i64) -> Self {
        Self {
            token,
            user_id: user.user_id,
            email: user.email.as_str().to_string(),
            name: user.name.as_str().to_string(),
            role: user.role(),
            expires_in,
        }
    }
}
