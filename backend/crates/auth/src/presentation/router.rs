//! API Router

use axum::{
    Router, middleware,
    routing::{get, patch, post},
};

use crate::application::config::AuthConfig;
use crate::infra::postgres::PgAuthRepository;
use crate::presentation::handlers::{self, AppState, AuthStore};
use crate::presentation::middleware::{attach_error_path, require_bearer};

/// Create the API router with PostgreSQL repository
pub fn api_router(repo: PgAuthRepository, config: AuthConfig) -> Router {
    api_router_generic(repo, config)
}

/// Create a generic API router for any repository implementation
///
/// Routes are relative; the binary nests them under `/api`.
pub fn api_router_generic<R>(repo: R, config: AuthConfig) -> Router
where
    R: AuthStore,
{
    let state = AppState::new(repo, config);

    let public = Router::new()
        .route("/auth/register", post(handlers::register::<R>))
        .route("/auth/login", post(handlers::login::<R>))
        .route("/auth/logout", post(handlers::logout));

    let protected = Router::new()
        .route("/auth/me", get(handlers::me::<R>))
        .route("/users", get(handlers::list_users::<R>))
        .route("/users/statistics", get(handlers::statistics::<R>))
        .route(
            "/users/{id}",
            get(handlers::get_user::<R>)
                .put(handlers::update_user::<R>)
                .delete(handlers::delete_user::<R>),
        )
        .route("/users/{id}/status", patch(handlers::change_status::<R>))
        .route("/audit-logs", get(handlers::audit_logs::<R>))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_bearer::<R>,
        ));

    Router::new()
        .merge(public)
        .merge(protected)
        .fallback(handlers::not_found)
        .layer(middleware::from_fn(attach_error_path))
        .with_state(state)
}
