//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use sqlx::{PgExecutor, PgPool};

use crate::domain::entity::{
    audit_log::{AuditLog, AuditLogId, NewAuditLog},
    user::{NewUser, User, UserProfile},
};
use crate::domain::repository::{AuditLogRepository, UserRepository};
use crate::domain::value_object::{
    email::Email, user_id::UserId, user_name::UserName, user_password::UserPassword,
    user_role::UserRole, user_status::UserStatus,
};
use crate::error::{AuthError, AuthResult};

const USER_COLUMNS: &str = r#"
    user_id,
    user_type,
    name,
    email,
    email_canonical,
    phone_number,
    password_hash,
    user_status,
    organization_name,
    permissions,
    access_level,
    created_at,
    last_login_at
"#;

const AUDIT_LOG_COLUMNS: &str = r#"
    audit_log_id,
    user_id,
    action,
    entity,
    entity_id,
    details,
    created_at
"#;

/// PostgreSQL-backed auth repository
#[derive(Clone)]
pub struct PgAuthRepository {
    pool: PgPool,
}

impl PgAuthRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// SQLSTATE 23505
fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.code().is_some_and(|code| code.as_ref() == "23505"),
        _ => false,
    }
}

/// Unique violations on `users` can only come from the canonical email
fn map_user_write_error(err: sqlx::Error, email: &Email) -> AuthError {
    if is_unique_violation(&err) {
        tracing::debug!(email = %email, "Email uniqueness violated at insert/update");
        AuthError::DuplicateEmail(email.as_str().to_string())
    } else {
        AuthError::Database(err)
    }
}

// ============================================================================
// User Repository Implementation
// ============================================================================

impl UserRepository for PgAuthRepository {
    async fn create(&self, user: &NewUser) -> AuthResult<User> {
        insert_user(&self.pool, user).await
    }

    async fn find_by_id(&self, user_id: UserId) -> AuthResult<Option<User>> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE user_id = $1");

        let row = sqlx::query_as::<_, UserRow>(&query)
            .bind(user_id.as_i64())
            .fetch_optional(&self.pool)
            .await?;

        row.map(|r| r.into_user()).transpose()
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE email_canonical = $1");

        let row = sqlx::query_as::<_, UserRow>(&query)
            .bind(email.canonical())
            .fetch_optional(&self.pool)
            .await?;

        row.map(|r| r.into_user()).transpose()
    }

    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM users WHERE email_canonical = $1)",
        )
        .bind(email.canonical())
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn find_all(&self) -> AuthResult<Vec<User>> {
        let query = format!("SELECT {USER_COLUMNS} FROM users ORDER BY user_id");

        let rows = sqlx::query_as::<_, UserRow>(&query)
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(|r| r.into_user()).collect()
    }

    async fn update(&self, user: &User) -> AuthResult<()> {
        update_user(&self.pool, user).await
    }

    async fn create_with_audit<F>(&self, user: &NewUser, audit: F) -> AuthResult<User>
    where
        F: FnOnce(&User) -> NewAuditLog + Send,
    {
        let mut tx = self.pool.begin().await?;

        let created = insert_user(&mut *tx, user).await?;
        insert_audit_log(&mut *tx, &audit(&created)).await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn update_with_audit(&self, user: &User, entry: NewAuditLog) -> AuthResult<()> {
        let mut tx = self.pool.begin().await?;

        update_user(&mut *tx, user).await?;
        insert_audit_log(&mut *tx, &entry).await?;

        tx.commit().await?;

        Ok(())
    }

    async fn count(&self) -> AuthResult<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    async fn count_by_status(&self, status: UserStatus) -> AuthResult<i64> {
        let count =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users WHERE user_status = $1")
                .bind(status.id())
                .fetch_one(&self.pool)
                .await?;

        Ok(count)
    }
}

// ============================================================================
// Audit Log Repository Implementation
// ============================================================================

impl AuditLogRepository for PgAuthRepository {
    async fn append(&self, entry: NewAuditLog) -> AuthResult<AuditLog> {
        insert_audit_log(&self.pool, &entry).await
    }

    async fn find_by_user(&self, user_id: UserId) -> AuthResult<Vec<AuditLog>> {
        let query = format!(
            r#"
            SELECT {AUDIT_LOG_COLUMNS}
            FROM audit_logs
            WHERE user_id = $1
            ORDER BY created_at DESC, audit_log_id DESC
            "#
        );

        let rows = sqlx::query_as::<_, AuditLogRow>(&query)
            .bind(user_id.as_i64())
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(AuditLogRow::into_audit_log).collect())
    }

    async fn find_by_action(&self, action: &str) -> AuthResult<Vec<AuditLog>> {
        let query = format!(
            r#"
            SELECT {AUDIT_LOG_COLUMNS}
            FROM audit_logs
            WHERE action = $1
            ORDER BY created_at DESC, audit_log_id DESC
            "#
        );

        let rows = sqlx::query_as::<_, AuditLogRow>(&query)
            .bind(action)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(AuditLogRow::into_audit_log).collect())
    }

    async fn find_by_date_range(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> AuthResult<Vec<AuditLog>> {
        let query = format!(
            r#"
            SELECT {AUDIT_LOG_COLUMNS}
            FROM audit_logs
            WHERE created_at BETWEEN $1 AND $2
            ORDER BY created_at DESC, audit_log_id DESC
            "#
        );

        let rows = sqlx::query_as::<_, AuditLogRow>(&query)
            .bind(from)
            .bind(to)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(AuditLogRow::into_audit_log).collect())
    }

    async fn find_recent(&self, limit: i64) -> AuthResult<Vec<AuditLog>> {
        let query = format!(
            r#"
            SELECT {AUDIT_LOG_COLUMNS}
            FROM audit_logs
            ORDER BY created_at DESC, audit_log_id DESC
            LIMIT $1
            "#
        );

        let rows = sqlx::query_as::<_, AuditLogRow>(&query)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(AuditLogRow::into_audit_log).collect())
    }
}

// ============================================================================
// Statements shared by pool and transaction paths
// ============================================================================

async fn insert_user<'e, E>(executor: E, user: &NewUser) -> AuthResult<User>
where
    E: PgExecutor<'e>,
{
    let query = format!(
        r#"
        INSERT INTO users (
            user_type,
            name,
            email,
            email_canonical,
            phone_number,
            password_hash,
            user_status,
            organization_name,
            permissions,
            access_level
        ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
        RETURNING {USER_COLUMNS}
        "#
    );

    let row = sqlx::query_as::<_, UserRow>(&query)
        .bind(user.profile.role().id())
        .bind(user.name.as_str())
        .bind(user.email.as_str())
        .bind(user.email.canonical())
        .bind(user.phone_number.as_deref())
        .bind(user.password.as_phc_string())
        .bind(UserStatus::Active.id())
        .bind(user.profile.organization_name())
        .bind(user.profile.permissions())
        .bind(user.profile.access_level())
        .fetch_one(executor)
        .await
        .map_err(|e| map_user_write_error(e, &user.email))?;

    row.into_user()
}

async fn update_user<'e, E>(executor: E, user: &User) -> AuthResult<()>
where
    E: PgExecutor<'e>,
{
    let result = sqlx::query(
        r#"
        UPDATE users SET
            name = $2,
            email = $3,
            email_canonical = $4,
            phone_number = $5,
            password_hash = $6,
            user_status = $7,
            organization_name = $8,
            permissions = $9,
            access_level = $10,
            last_login_at = $11
        WHERE user_id = $1
        "#,
    )
    .bind(user.user_id.as_i64())
    .bind(user.name.as_str())
    .bind(user.email.as_str())
    .bind(user.email.canonical())
    .bind(user.phone_number.as_deref())
    .bind(user.password.as_phc_string())
    .bind(user.status.id())
    .bind(user.profile.organization_name())
    .bind(user.profile.permissions())
    .bind(user.profile.access_level())
    .bind(user.last_login_at)
    .execute(executor)
    .await
    .map_err(|e| map_user_write_error(e, &user.email))?;

    if result.rows_affected() == 0 {
        return Err(AuthError::UserNotFound(user.user_id.as_i64()));
    }

    Ok(())
}

async fn insert_audit_log<'e, E>(executor: E, entry: &NewAuditLog) -> AuthResult<AuditLog>
where
    E: PgExecutor<'e>,
{
    let query = format!(
        r#"
        INSERT INTO audit_logs (user_id, action, entity, entity_id, details)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING {AUDIT_LOG_COLUMNS}
        "#
    );

    let row = sqlx::query_as::<_, AuditLogRow>(&query)
        .bind(entry.user_id.as_i64())
        .bind(&entry.action)
        .bind(&entry.entity)
        .bind(entry.entity_id)
        .bind(&entry.details)
        .fetch_one(executor)
        .await?;

    Ok(row.into_audit_log())
}

// ============================================================================
// Row Types for sqlx mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    user_id: i64,
    user_type: i16,
    name: String,
    email: String,
    email_canonical: String,
    phone_number: Option<String>,
    password_hash: String,
    user_status: i16,
    organization_name: Option<String>,
    permissions: Option<String>,
    access_level: Option<String>,
    created_at: DateTime<Utc>,
    last_login_at: Option<DateTime<Utc>>,
}

impl UserRow {
    fn into_user(self) -> AuthResult<User> {
        let role = UserRole::from_id(self.user_type)
            .ok_or_else(|| AuthError::Internal(format!("Invalid user_type: {}", self.user_type)))?;
        let status = UserStatus::from_id(self.user_status).ok_or_else(|| {
            AuthError::Internal(format!("Invalid user_status: {}", self.user_status))
        })?;

        Ok(User {
            user_id: UserId::from_i64(self.user_id),
            name: UserName::from_db(self.name),
            email: Email::from_db(self.email, self.email_canonical),
            phone_number: self.phone_number,
            password: UserPassword::from_db(self.password_hash),
            status,
            profile: UserProfile::for_role(
                role,
                self.organization_name,
                self.permissions,
                self.access_level,
            ),
            created_at: self.created_at,
            last_login_at: self.last_login_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct AuditLogRow {
    audit_log_id: i64,
    user_id: i64,
    action: String,
    entity: String,
    entity_id: i64,
    details: String,
    created_at: DateTime<Utc>,
}

impl AuditLogRow {
    fn into_audit_log(self) -> AuditLog {
        AuditLog {
            id: AuditLogId::from_i64(self.audit_log_id),
            user_id: UserId::from_i64(self.user_id),
            action: self.action,
            entity: self.entity,
            entity_id: self.entity_id,
            details: self.details,
            timestamp: self.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::error::{DatabaseError, ErrorKind};
    use std::borrow::Cow;
    use std::error::Error as StdError;
    use std::fmt;

    #[derive(Debug)]
    struct FakeDbError {
        code: Option<&'static str>,
    }

    impl fmt::Display for FakeDbError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "fake database error")
        }
    }

    impl StdError for FakeDbError {}

    impl DatabaseError for FakeDbError {
        fn message(&self) -> &str {
            "fake database error"
        }

        fn code(&self) -> Option<Cow<'_, str>> {
            self.code.map(Cow::Borrowed)
        }

        fn as_error(&self) -> &(dyn StdError + Send + Sync + 'static) {
            self
        }

        fn as_error_mut(&mut self) -> &mut (dyn StdError + Send + Sync + 'static) {
            self
        }

        fn into_error(self: Box<Self>) -> Box<dyn StdError + Send + Sync + 'static> {
            self
        }

        fn kind(&self) -> ErrorKind {
            match self.code {
                Some("23505") => ErrorKind::UniqueViolation,
                _ => ErrorKind::Other,
            }
        }
    }

    fn db_error(code: &'static str) -> sqlx::Error {
        sqlx::Error::Database(Box::new(FakeDbError { code: Some(code) }))
    }

    fn email() -> Email {
        Email::new("Race@Example.com").unwrap()
    }

    #[test]
    fn test_is_unique_violation_matches_sqlstate() {
        assert!(is_unique_violation(&db_error("23505")));
        assert!(!is_unique_violation(&db_error("22001")));
        assert!(!is_unique_violation(&sqlx::Error::Database(Box::new(
            FakeDbError { code: None }
        ))));
        assert!(!is_unique_violation(&sqlx::Error::RowNotFound));
    }

    #[test]
    fn test_unique_violation_becomes_duplicate_email() {
        let err = map_user_write_error(db_error("23505"), &email());
        assert!(matches!(err, AuthError::DuplicateEmail(ref e) if e == "Race@Example.com"));
    }

    #[test]
    fn test_other_write_errors_stay_database_errors() {
        assert!(matches!(
            map_user_write_error(db_error("22001"), &email()),
            AuthError::Database(_)
        ));
        assert!(matches!(
            map_user_write_error(sqlx::Error::PoolTimedOut, &email()),
            AuthError::Database(_)
        ));
    }
}
