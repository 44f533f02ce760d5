//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use chrono::{DateTime, Utc};

use crate::domain::entity::{
    audit_log::{AuditLog, NewAuditLog},
    user::{NewUser, User},
};
use crate::domain::value_object::{email::Email, user_id::UserId, user_status::UserStatus};
use crate::error::AuthResult;

/// User repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Create a new user with status `Active`
    ///
    /// Fails with `DuplicateEmail` when the canonical email is taken.
    async fn create(&self, user: &NewUser) -> AuthResult<User>;

    /// Find user by ID
    async fn find_by_id(&self, user_id: UserId) -> AuthResult<Option<User>>;

    /// Find user by email (case-insensitive)
    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>>;

    /// Check if email exists (case-insensitive)
    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool>;

    /// All users, ordered by id
    async fn find_all(&self) -> AuthResult<Vec<User>>;

    /// Persist mutable fields; email conflicts fail with `DuplicateEmail`
    async fn update(&self, user: &User) -> AuthResult<()>;

    /// `create` and the audit entry built from the stored user, as one unit
    ///
    /// Nothing is persisted when either write fails.
    async fn create_with_audit<F>(&self, user: &NewUser, audit: F) -> AuthResult<User>
    where
        F: FnOnce(&User) -> NewAuditLog + Send;

    /// `update` and `entry`, as one unit
    async fn update_with_audit(&self, user: &User, entry: NewAuditLog) -> AuthResult<()>;

    /// Number of users in any status
    async fn count(&self) -> AuthResult<i64>;

    async fn count_by_status(&self, status: UserStatus) -> AuthResult<i64>;
}

/// Audit log repository trait
///
/// Every finder returns newest first (ties broken by id, descending).
#[trait_variant::make(AuditLogRepository: Send)]
pub trait LocalAuditLogRepository {
    /// Append an entry
    async fn append(&self, entry: NewAuditLog) -> AuthResult<AuditLog>;

    async fn find_by_user(&self, user_id: UserId) -> AuthResult<Vec<AuditLog>>;

    async fn find_by_action(&self, action: &str) -> AuthResult<Vec<AuditLog>>;

    /// Entries with `from <= timestamp <= to`
    async fn find_by_date_range(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> AuthResult<Vec<AuditLog>>;

    async fn find_recent(&self, limit: i64) -> AuthResult<Vec<AuditLog>>;
}
