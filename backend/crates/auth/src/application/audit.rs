//! Audit Trail
//!
//! Admin lookup over recorded security events. Entries are written
//! together with the change they describe, see `UserRepository`.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::domain::entity::{audit_log::AuditLog, principal::Principal};
use crate::domain::repository::AuditLogRepository;
use crate::domain::value_object::{user_id::UserId, user_role::UserRole};
use crate::error::{AuthError, AuthResult};

/// Entries returned when no limit is given
pub const DEFAULT_AUDIT_LIMIT: i64 = 50;

/// Upper bound for a single lookup
pub const MAX_AUDIT_LIMIT: i64 = 1000;

/// Audit lookup filters; all optional
#[derive(Debug, Clone, Default)]
pub struct AuditQuery {
    pub user_id: Option<UserId>,
    pub action: Option<String>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
    pub limit: Option<i64>,
}

impl AuditQuery {
    fn has_filter(&self) -> bool {
        self.user_id.is_some() || self.action.is_some() || self.from.is_some() || self.to.is_some()
    }

    fn matches(&self, log: &AuditLog) -> bool {
        self.user_id.is_none_or(|id| log.user_id == id)
            && self.action.as_deref().is_none_or(|a| log.action == a)
            && self.from.is_none_or(|from| log.timestamp >= from)
            && self.to.is_none_or(|to| log.timestamp <= to)
    }
}

/// Admin lookup over the audit log
pub struct QueryAuditLogsUseCase<A>
where
    A: AuditLogRepository,
{
    repo: Arc<A>,
}

impl<A> QueryAuditLogsUseCase<A>
where
    A: AuditLogRepository,
{
    pub fn new(repo: Arc<A>) -> Self {
        Self { repo }
    }

    /// Newest first
    ///
    /// Uses one repository lookup (user, then action, then date range,
    /// then most recent) and narrows by the remaining filters.
    pub async fn execute(&self, actor: &Principal, query: AuditQuery) -> AuthResult<Vec<AuditLog>> {
        actor.require_role(UserRole::Admin)?;

        let limit = query.limit.unwrap_or(DEFAULT_AUDIT_LIMIT);
        if !(1..=MAX_AUDIT_LIMIT).contains(&limit) {
            return Err(AuthError::InvalidArgument(format!(
                "limit must be between 1 and {}",
                MAX_AUDIT_LIMIT
            )));
        }
        if let (Some(from), Some(to)) = (query.from, query.to) {
            if from > to {
                return Err(AuthError::InvalidArgument(
                    "from must not be after to".to_string(),
                ));
            }
        }

        let candidates = if !query.has_filter() {
            self.repo.find_recent(limit).await?
        } else if let Some(user_id) = query.user_id {
            self.repo.find_by_user(user_id).await?
        } else if let Some(action) = query.action.as_deref() {
            self.repo.find_by_action(action).await?
        } else {
            let from = query.from.unwrap_or(DateTime::<Utc>::UNIX_EPOCH);
            let to = query.to.unwrap_or_else(Utc::now);
            self.repo.find_by_date_range(from, to).await?
        };

        let logs: Vec<AuditLog> = candidates
            .into_iter()
            .filter(|log| query.matches(log))
            .take(limit as usize)
            .collect();

        tracing::debug!(
            actor_id = %actor.user_id,
            returned = logs.len(),
            "Audit logs queried"
        );

        Ok(logs)
    }
}
