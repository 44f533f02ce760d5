//! In-Memory Repository Implementations
//!
//! Backs tests and local runs without a database. One lock covers users and
//! audit entries so the email check and the insert are a single step.

use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Utc};

use crate::domain::entity::audit_log::{AuditLog, AuditLogId, NewAuditLog};
use crate::domain::entity::user::{NewUser, User};
use crate::domain::repository::{AuditLogRepository, UserRepository};
use crate::domain::value_object::{email::Email, user_id::UserId, user_status::UserStatus};
use crate::error::{AuthError, AuthResult};

#[derive(Debug, Default)]
struct Store {
    users: BTreeMap<i64, User>,
    audit_logs: Vec<AuditLog>,
    next_user_id: i64,
    next_audit_log_id: i64,
    #[cfg(test)]
    fail_audit_appends: bool,
}

impl Store {
    fn email_taken(&self, email: &Email, except: Option<UserId>) -> bool {
        self.users
            .values()
            .any(|u| Some(u.user_id) != except && u.email.same_address(email))
    }

    /// The user `create` would store; nothing is written
    fn stage_user(&self, user: &NewUser) -> AuthResult<User> {
        if self.email_taken(&user.email, None) {
            return Err(AuthError::DuplicateEmail(user.email.as_str().to_string()));
        }

        let user_id = UserId::from_i64(self.next_user_id + 1);
        Ok(User::from_new(user_id, user.clone(), Utc::now()))
    }

    fn check_update(&self, user: &User) -> AuthResult<()> {
        if !self.users.contains_key(&user.user_id.as_i64()) {
            return Err(AuthError::UserNotFound(user.user_id.as_i64()));
        }
        if self.email_taken(&user.email, Some(user.user_id)) {
            return Err(AuthError::DuplicateEmail(user.email.as_str().to_string()));
        }
        Ok(())
    }

    /// The entry `append` would store; nothing is written
    fn stage_audit(&self, entry: NewAuditLog) -> AuthResult<AuditLog> {
        #[cfg(test)]
        if self.fail_audit_appends {
            return Err(AuthError::Internal("audit log unavailable".to_string()));
        }

        Ok(AuditLog::from_new(
            AuditLogId::from_i64(self.next_audit_log_id + 1),
            entry,
            Utc::now(),
        ))
    }

    fn put_user(&mut self, user: User) {
        self.next_user_id = self.next_user_id.max(user.user_id.as_i64());
        self.users.insert(user.user_id.as_i64(), user);
    }

    fn push_audit(&mut self, log: AuditLog) {
        self.next_audit_log_id = log.id.as_i64();
        self.audit_logs.push(log);
    }

    /// Newest first; ties broken by id
    fn newest_first(mut logs: Vec<AuditLog>) -> Vec<AuditLog> {
        logs.sort_by(|a, b| {
            b.timestamp
                .cmp(&a.timestamp)
                .then_with(|| b.id.cmp(&a.id))
        });
        logs
    }
}

/// In-memory auth repository
#[derive(Debug, Default)]
pub struct InMemoryAuthRepository {
    store: RwLock<Store>,
}

impl InMemoryAuthRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> AuthResult<RwLockReadGuard<'_, Store>> {
        self.store
            .read()
            .map_err(|_| AuthError::Internal("lock poisoned".to_string()))
    }

    fn write(&self) -> AuthResult<RwLockWriteGuard<'_, Store>> {
        self.store
            .write()
            .map_err(|_| AuthError::Internal("lock poisoned".to_string()))
    }

    /// Make every following audit write fail
    #[cfg(test)]
    pub(crate) fn set_audit_failure(&self, fail: bool) {
        if let Ok(mut store) = self.store.write() {
            store.fail_audit_appends = fail;
        }
    }
}

// ============================================================================
// User Repository Implementation
// ============================================================================

impl UserRepository for InMemoryAuthRepository {
    async fn create(&self, user: &NewUser) -> AuthResult<User> {
        let mut store = self.write()?;

        let created = store.stage_user(user)?;
        store.put_user(created.clone());

        Ok(created)
    }

    async fn find_by_id(&self, user_id: UserId) -> AuthResult<Option<User>> {
        Ok(self.read()?.users.get(&user_id.as_i64()).cloned())
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        Ok(self
            .read()?
            .users
            .values()
            .find(|u| u.email.same_address(email))
            .cloned())
    }

    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool> {
        Ok(self.read()?.email_taken(email, None))
    }

    async fn find_all(&self) -> AuthResult<Vec<User>> {
        Ok(self.read()?.users.values().cloned().collect())
    }

    async fn update(&self, user: &User) -> AuthResult<()> {
        let mut store = self.write()?;

        store.check_update(user)?;
        store.put_user(user.clone());
        Ok(())
    }

    async fn create_with_audit<F>(&self, user: &NewUser, audit: F) -> AuthResult<User>
    where
        F: FnOnce(&User) -> NewAuditLog + Send,
    {
        let mut store = self.write()?;

        let created = store.stage_user(user)?;
        let log = store.stage_audit(audit(&created))?;
        store.put_user(created.clone());
        store.push_audit(log);

        Ok(created)
    }

    async fn update_with_audit(&self, user: &User, entry: NewAuditLog) -> AuthResult<()> {
        let mut store = self.write()?;

        store.check_update(user)?;
        let log = store.stage_audit(entry)?;
        store.put_user(user.clone());
        store.push_audit(log);

        Ok(())
    }

    async fn count(&self) -> AuthResult<i64> {
        Ok(self.read()?.users.len() as i64)
    }

    async fn count_by_status(&self, status: UserStatus) -> AuthResult<i64> {
        Ok(self
            .read()?
            .users
            .values()
            .filter(|u| u.status == status)
            .count() as i64)
    }
}

// ============================================================================
// Audit Log Repository Implementation
// ============================================================================

impl AuditLogRepository for InMemoryAuthRepository {
    async fn append(&self, entry: NewAuditLog) -> AuthResult<AuditLog> {
        let mut store = self.write()?;

        let log = store.stage_audit(entry)?;
        store.push_audit(log.clone());

        Ok(log)
    }

    async fn find_by_user(&self, user_id: UserId) -> AuthResult<Vec<AuditLog>> {
        let store = self.read()?;
        Ok(Store::newest_first(
            store
                .audit_logs
                .iter()
                .filter(|l| l.user_id == user_id)
                .cloned()
                .collect(),
        ))
    }

    async fn find_by_action(&self, action: &str) -> AuthResult<Vec<AuditLog>> {
        let store = self.read()?;
        Ok(Store::newest_first(
            store
                .audit_logs
                .iter()
                .filter(|l| l.action == action)
                .cloned()
                .collect(),
        ))
    }

    async fn find_by_date_range(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> AuthResult<Vec<AuditLog>> {
        let store = self.read()?;
        Ok(Store::newest_first(
            store
                .audit_logs
                .iter()
                .filter(|l| l.timestamp >= from && l.timestamp <= to)
                .cloned()
                .collect(),
        ))
    }

    async fn find_recent(&self, limit: i64) -> AuthResult<Vec<AuditLog>> {
        let store = self.read()?;
        let mut logs = Store::newest_first(store.audit_logs.clone());
        logs.truncate(usize::try_from(limit).unwrap_or(0));
        Ok(logs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entity::audit_log::action;
    use crate::domain::entity::user::UserProfile;
    use crate::domain::value_object::{
        user_name::UserName,
        user_password::{RawPassword, UserPassword},
    };
    use platform::password::HashCost;

    fn new_user(email: &str) -> NewUser {
        NewUser {
            name: UserName::new("Alice").unwrap(),
            email: Email::new(email).unwrap(),
            phone_number: None,
            password: UserPassword::from_raw(
                &RawPassword::new("Pw1!".to_string()).unwrap(),
                None,
                HashCost::testing(),
            )
            .unwrap(),
            profile: UserProfile::Buyer,
        }
    }

    #[tokio::test]
    async fn test_create_assigns_sequential_ids() {
        let repo = InMemoryAuthRepository::new();
        let a = repo.create(&new_user("a@example.com")).await.unwrap();
        let b = repo.create(&new_user("b@example.com")).await.unwrap();
        assert_eq!(a.user_id.as_i64(), 1);
        assert_eq!(b.user_id.as_i64(), 2);
        assert_eq!(a.status, UserStatus::Active);
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate_email_case_insensitive() {
        let repo = InMemoryAuthRepository::new();
        repo.create(&new_user("a@example.com")).await.unwrap();

        let err = repo.create(&new_user("A@Example.COM")).await.unwrap_err();
        assert!(matches!(err, AuthError::DuplicateEmail(_)));
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_find_by_email_ignores_case() {
        let repo = InMemoryAuthRepository::new();
        repo.create(&new_user("Alice@Example.com")).await.unwrap();

        let found = repo
            .find_by_email(&Email::new("alice@example.com").unwrap())
            .await
            .unwrap();
        assert!(found.is_some());
    }

    #[tokio::test]
    async fn test_update_rejects_email_of_other_user() {
        let repo = InMemoryAuthRepository::new();
        repo.create(&new_user("a@example.com")).await.unwrap();
        let mut b = repo.create(&new_user("b@example.com")).await.unwrap();

        b.email = Email::new("A@example.com").unwrap();
        assert!(matches!(
            repo.update(&b).await,
            Err(AuthError::DuplicateEmail(_))
        ));
    }

    #[tokio::test]
    async fn test_update_missing_user() {
        let repo = InMemoryAuthRepository::new();
        let mut a = repo.create(&new_user("a@example.com")).await.unwrap();
        a.user_id = UserId::from_i64(99);
        assert!(matches!(
            repo.update(&a).await,
            Err(AuthError::UserNotFound(99))
        ));
    }

    #[tokio::test]
    async fn test_count_by_status() {
        let repo = InMemoryAuthRepository::new();
        repo.create(&new_user("a@example.com")).await.unwrap();
        let mut b = repo.create(&new_user("b@example.com")).await.unwrap();
        b.change_status(UserStatus::Suspended).unwrap();
        repo.update(&b).await.unwrap();

        assert_eq!(repo.count().await.unwrap(), 2);
        assert_eq!(repo.count_by_status(UserStatus::Active).await.unwrap(), 1);
        assert_eq!(repo.count_by_status(UserStatus::Suspended).await.unwrap(), 1);
        assert_eq!(repo.count_by_status(UserStatus::Deleted).await.unwrap(), 0);
    }

    fn register_event(user: &User) -> NewAuditLog {
        NewAuditLog::user_event(user.user_id, action::USER_REGISTER, user.user_id, "registered")
    }

    #[tokio::test]
    async fn test_create_with_audit_stores_both() {
        let repo = InMemoryAuthRepository::new();
        let user = repo
            .create_with_audit(&new_user("a@example.com"), register_event)
            .await
            .unwrap();

        let logs = repo.find_by_user(user.user_id).await.unwrap();
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].entity_id, user.user_id.as_i64());
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_create_with_audit_keeps_nothing_when_audit_fails() {
        let repo = InMemoryAuthRepository::new();
        repo.set_audit_failure(true);

        let err = repo
            .create_with_audit(&new_user("a@example.com"), register_event)
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::Internal(_)));
        assert_eq!(repo.count().await.unwrap(), 0);

        // The id was not consumed either
        repo.set_audit_failure(false);
        let user = repo
            .create_with_audit(&new_user("a@example.com"), register_event)
            .await
            .unwrap();
        assert_eq!(user.user_id.as_i64(), 1);
    }

    #[tokio::test]
    async fn test_update_with_audit_keeps_old_row_when_audit_fails() {
        let repo = InMemoryAuthRepository::new();
        let mut user = repo.create(&new_user("a@example.com")).await.unwrap();
        repo.set_audit_failure(true);

        user.change_status(UserStatus::Suspended).unwrap();
        let entry = NewAuditLog::user_event(
            user.user_id,
            action::USER_STATUS_CHANGE,
            user.user_id,
            "x",
        );
        assert!(repo.update_with_audit(&user, entry).await.is_err());

        let stored = repo.find_by_id(user.user_id).await.unwrap().unwrap();
        assert_eq!(stored.status, UserStatus::Active);
        assert!(repo.find_recent(10).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_audit_logs_newest_first() {
        let repo = InMemoryAuthRepository::new();
        let actor = UserId::from_i64(1);
        for a in [action::USER_REGISTER, action::USER_LOGIN, action::USER_LOGIN] {
            repo.append(NewAuditLog::user_event(actor, a, actor, "x"))
                .await
                .unwrap();
        }

        let recent = repo.find_recent(2).await.unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].id.as_i64(), 3);
        assert_eq!(recent[1].id.as_i64(), 2);

        let logins = repo.find_by_action(action::USER_LOGIN).await.unwrap();
        assert_eq!(logins.len(), 2);
        assert!(logins[0].id > logins[1].id);

        assert_eq!(repo.find_by_user(actor).await.unwrap().len(), 3);
        assert!(repo
            .find_by_user(UserId::from_i64(2))
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_audit_date_range_inclusive() {
        let repo = InMemoryAuthRepository::new();
        let actor = UserId::from_i64(1);
        let log = repo
            .append(NewAuditLog::user_event(actor, action::USER_LOGIN, actor, "x"))
            .await
            .unwrap();

        let hits = repo
            .find_by_date_range(log.timestamp, log.timestamp)
            .await
            .unwrap();
        assert_eq!(hits.len(), 1);

        let later = log.timestamp + chrono::Duration::seconds(1);
        assert!(repo
            .find_by_date_range(later, later)
            .await
            .unwrap()
            .is_empty());
    }
}
