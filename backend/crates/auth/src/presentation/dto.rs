//! API DTOs (Data Transfer Objects)
//!
//! Request fields are optional so that missing values surface as field
//! validation errors instead of body rejections.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::application::{
    AuditQuery, AuthOutput, LoginInput, RegisterInput, UpdateUserInput, UserStatistics,
};
use crate::domain::entity::{audit_log::AuditLog, user::User};
use crate::domain::value_object::{user_role::UserRole, user_status::UserStatus};

/// Token type reported alongside every issued token
pub const TOKEN_TYPE: &str = "Bearer";

// ============================================================================
// Register / Login
// ============================================================================

/// Register request
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    /// ADMIN, ORGANIZER or BUYER
    pub user_type: Option<String>,
    pub phone_number: Option<String>,
    pub organization_name: Option<String>,
    pub permissions: Option<String>,
    pub access_level: Option<String>,
}

impl From<RegisterRequest> for RegisterInput {
    fn from(req: RegisterRequest) -> Self {
        Self {
            name: req.name,
            email: req.email,
            password: req.password,
            user_type: req.user_type,
            phone_number: req.phone_number,
            organization_name: req.organization_name,
            permissions: req.permissions,
            access_level: req.access_level,
        }
    }
}

/// Login request
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

impl From<LoginRequest> for LoginInput {
    fn from(req: LoginRequest) -> Self {
        Self {
            email: req.email,
            password: req.password,
        }
    }
}

/// Register / login response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub token: String,
    pub token_type: &'static str,
    pub user_id: i64,
    pub email: String,
    pub name: String,
    pub role: UserRole,
    /// Milliseconds
    pub expires_in: i64,
}

impl From<AuthOutput> for AuthResponse {
    fn from(output: AuthOutput) -> Self {
        Self {
            token: output.token,
            token_type: TOKEN_TYPE,
            user_id: output.user_id.as_i64(),
            email: output.email,
            name: output.name,
            role: output.role,
            expires_in: output.expires_in,
        }
    }
}

// ============================================================================
// Users
// ============================================================================

/// Public view of a user; the password hash never leaves the server
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone_number: Option<String>,
    pub status: UserStatus,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permissions: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_level: Option<String>,
}

impl From<&User> for UserView {
    fn from(user: &User) -> Self {
        Self {
            id: user.user_id.as_i64(),
            name: user.name.as_str().to_string(),
            email: user.email.as_str().to_string(),
            phone_number: user.phone_number.clone(),
            status: user.status,
            role: user.role(),
            created_at: user.created_at,
            last_login: user.last_login_at,
            organization_name: user.profile.organization_name().map(str::to_string),
            permissions: user.profile.permissions().map(str::to_string),
            access_level: user.profile.access_level().map(str::to_string),
        }
    }
}

impl From<User> for UserView {
    fn from(user: User) -> Self {
        Self::from(&user)
    }
}

/// Update user request
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub organization_name: Option<String>,
}

impl From<UpdateUserRequest> for UpdateUserInput {
    fn from(req: UpdateUserRequest) -> Self {
        Self {
            name: req.name,
            email: req.email,
            phone_number: req.phone_number,
            organization_name: req.organization_name,
        }
    }
}

/// Status change request
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatusChangeRequest {
    pub status: Option<String>,
}

/// User statistics response
#[derive(Debug, Clone, Serialize)]
pub struct StatisticsResponse {
    pub total: i64,
    pub active: i64,
    pub suspended: i64,
}

impl From<UserStatistics> for StatisticsResponse {
    fn from(stats: UserStatistics) -> Self {
        Self {
            total: stats.total,
            active: stats.active,
            suspended: stats.suspended,
        }
    }
}

// ============================================================================
// Misc
// ============================================================================

/// Plain confirmation
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

// ============================================================================
// Audit Logs
// ============================================================================

/// `GET /api/audit-logs` query string
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditLogQueryParams {
    pub user_id: Option<i64>,
    pub action: Option<String>,
    /// RFC 3339
    pub from: Option<DateTime<Utc>>,
    /// RFC 3339
    pub to: Option<DateTime<Utc>>,
    pub limit: Option<i64>,
}

impl From<AuditLogQueryParams> for AuditQuery {
    fn from(params: AuditLogQueryParams) -> Self {
        Self {
            user_id: params.user_id.map(Into::into),
            action: params.action,
            from: params.from,
            to: params.to,
            limit: params.limit,
        }
    }
}

/// Audit log entry
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditLogView {
    pub id: i64,
    pub user_id: i64,
    pub action: String,
    pub entity: String,
    pub entity_id: i64,
    pub details: String,
    pub timestamp: DateTime<Utc>,
}

impl From<AuditLog> for AuditLogView {
    fn from(log: AuditLog) -> Self {
        Self {
            id: log.id.as_i64(),
            user_id: log.user_id.as_i64(),
            action: log.action,
            entity: log.entity,
            entity_id: log.entity_id,
            details: log.details,
            timestamp: log.timestamp,
        }
    }
}
