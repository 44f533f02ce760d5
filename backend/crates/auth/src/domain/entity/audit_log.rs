//! Audit Log Entity
//!
//! Append-only record of security-relevant events.

use chrono::{DateTime, Utc};
use kernel::id::Id;

use crate::domain::value_object::user_id::UserId;

pub struct AuditLogMarker;
pub type AuditLogId = Id<AuditLogMarker>;

/// Entity name recorded for user events
pub const ENTITY_USER: &str = "User";

/// Recorded actions
pub mod action {
    pub const USER_REGISTER: &str = "USER_REGISTER";
    pub const USER_LOGIN: &str = "USER_LOGIN";
    pub const USER_UPDATE: &str = "USER_UPDATE";
    pub const USER_STATUS_CHANGE: &str = "USER_STATUS_CHANGE";
    pub const USER_DELETE: &str = "USER_DELETE";
}

/// Entry to append; the store assigns id and timestamp
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAuditLog {
    /// Owner of the entry (the acting user)
    pub user_id: UserId,
    pub action: String,
    pub entity: String,
    pub entity_id: i64,
    pub details: String,
}

impl NewAuditLog {
    /// Event about a user record
    pub fn user_event(
        actor: UserId,
        action: &str,
        target: UserId,
        details: impl Into<String>,
    ) -> Self {
        Self {
            user_id: actor,
            action: action.to_string(),
            entity: ENTITY_USER.to_string(),
            entity_id: target.as_i64(),
            details: details.into(),
        }
    }
}

/// Stored audit entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditLog {
    pub id: AuditLogId,
    pub user_id: UserId,
    pub action: String,
    pub entity: String,
    pub entity_id: i64,
    pub details: String,
    pub timestamp: DateTime<Utc>,
}

impl AuditLog {
    pub fn from_new(id: AuditLogId, new: NewAuditLog, timestamp: DateTime<Utc>) -> Self {
        Self {
            id,
            user_id: new.user_id,
            action: new.action,
            entity: new.entity,
            entity_id: new.entity_id,
            details: new.details,
            timestamp,
        }
    }
}
