//! HTTP Handlers

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use kernel::error::app_error::AppError;
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::token::TokenCodec;
use crate::application::{
    ChangeStatusUseCase, DeleteUserUseCase, GetUserUseCase, ListUsersUseCase, LoginUseCase,
    QueryAuditLogsUseCase, RegisterUseCase, UpdateUserUseCase, UserStatisticsUseCase,
};
use crate::domain::repository::{AuditLogRepository, UserRepository};
use crate::domain::value_object::user_id::UserId;
use crate::error::AuthResult;
use crate::presentation::dto::{
    AuditLogQueryParams, AuditLogView, AuthResponse, LoginRequest, MessageResponse,
    RegisterRequest, StatisticsResponse, StatusChangeRequest, UpdateUserRequest, UserView,
};
use crate::presentation::extract::{ApiJson, ApiPath, ApiQuery};
use crate::presentation::middleware::CurrentUser;

/// Storage the HTTP layer needs
pub trait AuthStore: UserRepository + AuditLogRepository + Send + Sync + 'static {}

impl<T> AuthStore for T where T: UserRepository + AuditLogRepository + Send + Sync + 'static {}

/// Shared state for handlers
pub struct AppState<R>
where
    R: AuthStore,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
    pub tokens: Arc<TokenCodec>,
}

impl<R> AppState<R>
where
    R: AuthStore,
{
    pub fn new(repo: R, config: AuthConfig) -> Self {
        let tokens = TokenCodec::from_config(&config);
        Self {
            repo: Arc::new(repo),
            config: Arc::new(config),
            tokens: Arc::new(tokens),
        }
    }
}

impl<R> Clone for AppState<R>
where
    R: AuthStore,
{
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            config: self.config.clone(),
            tokens: self.tokens.clone(),
        }
    }
}

// ============================================================================
// Auth
// ============================================================================

/// POST /api/auth/register
pub async fn register<R>(
    State(state): State<AppState<R>>,
    ApiJson(req): ApiJson<RegisterRequest>,
) -> AuthResult<(StatusCode, Json<AuthResponse>)>
where
    R: AuthStore,
{
    let use_case = RegisterUseCase::new(state.repo.clone(), state.tokens.clone(), state.config.clone());

    let output = use_case.execute(req.into()).await?;

    Ok((StatusCode::CREATED, Json(output.into())))
}

/// POST /api/auth/login
pub async fn login<R>(
    State(state): State<AppState<R>>,
    ApiJson(req): ApiJson<LoginRequest>,
) -> AuthResult<Json<AuthResponse>>
where
    R: AuthStore,
{
    let use_case = LoginUseCase::new(state.repo.clone(), state.tokens.clone(), state.config.clone());

    let output = use_case.execute(req.into()).await?;

    Ok(Json(output.into()))
}

/// POST /api/auth/logout
///
/// Tokens are self-contained; there is nothing to invalidate server-side.
pub async fn logout() -> Json<MessageResponse> {
    Json(MessageResponse::new("Logged out successfully"))
}

/// GET /api/auth/me
pub async fn me<R>(
    State(state): State<AppState<R>>,
    CurrentUser(principal): CurrentUser,
) -> AuthResult<Json<UserView>>
where
    R: AuthStore,
{
    let user = GetUserUseCase::new(state.repo.clone())
        .current(&principal)
        .await?;

    Ok(Json(user.into()))
}

// ============================================================================
// Users
// ============================================================================

/// GET /api/users
pub async fn list_users<R>(
    State(state): State<AppState<R>>,
    CurrentUser(principal): CurrentUser,
) -> AuthResult<Json<Vec<UserView>>>
where
    R: AuthStore,
{
    let users = ListUsersUseCase::new(state.repo.clone())
        .execute(&principal)
        .await?;

    Ok(Json(users.iter().map(UserView::from).collect()))
}

/// GET /api/users/statistics
pub async fn statistics<R>(
    State(state): State<AppState<R>>,
    CurrentUser(principal): CurrentUser,
) -> AuthResult<Json<StatisticsResponse>>
where
    R: AuthStore,
{
    let stats = UserStatisticsUseCase::new(state.repo.clone())
        .execute(&principal)
        .await?;

    Ok(Json(stats.into()))
}

/// GET /api/users/{id}
pub async fn get_user<R>(
    State(state): State<AppState<R>>,
    ApiPath(id): ApiPath<i64>,
) -> AuthResult<Json<UserView>>
where
    R: AuthStore,
{
    let user = GetUserUseCase::new(state.repo.clone())
        .execute(UserId::from_i64(id))
        .await?;

    Ok(Json(user.into()))
}

/// PUT /api/users/{id}
pub async fn update_user<R>(
    State(state): State<AppState<R>>,
    CurrentUser(principal): CurrentUser,
    ApiPath(id): ApiPath<i64>,
    ApiJson(req): ApiJson<UpdateUserRequest>,
) -> AuthResult<Json<UserView>>
where
    R: AuthStore,
{
    let use_case = UpdateUserUseCase::new(state.repo.clone());

    let user = use_case
        .execute(&principal, UserId::from_i64(id), req.into())
        .await?;

    Ok(Json(user.into()))
}

/// PATCH /api/users/{id}/status
pub async fn change_status<R>(
    State(state): State<AppState<R>>,
    CurrentUser(principal): CurrentUser,
    ApiPath(id): ApiPath<i64>,
    ApiJson(req): ApiJson<StatusChangeRequest>,
) -> AuthResult<Json<UserView>>
where
    R: AuthStore,
{
    let use_case = ChangeStatusUseCase::new(state.repo.clone());

    let user = use_case
        .execute(&principal, UserId::from_i64(id), req.status)
        .await?;

    Ok(Json(user.into()))
}

/// DELETE /api/users/{id}
pub async fn delete_user<R>(
    State(state): State<AppState<R>>,
    CurrentUser(principal): CurrentUser,
    ApiPath(id): ApiPath<i64>,
) -> AuthResult<Json<MessageResponse>>
where
    R: AuthStore,
{
    DeleteUserUseCase::new(state.repo.clone())
        .execute(&principal, UserId::from_i64(id))
        .await?;

    Ok(Json(MessageResponse::new("User deleted successfully")))
}

// ============================================================================
// Audit Logs
// ============================================================================

/// GET /api/audit-logs
pub async fn audit_logs<R>(
    State(state): State<AppState<R>>,
    CurrentUser(principal): CurrentUser,
    ApiQuery(params): ApiQuery<AuditLogQueryParams>,
) -> AuthResult<Json<Vec<AuditLogView>>>
where
    R: AuthStore,
{
    let logs = QueryAuditLogsUseCase::new(state.repo.clone())
        .execute(&principal, params.into())
        .await?;

    Ok(Json(logs.into_iter().map(AuditLogView::from).collect()))
}

// ============================================================================
// Fallback
// ============================================================================

/// Unknown route
pub async fn not_found() -> AppError {
    AppError::not_found("Resource not found")
}
