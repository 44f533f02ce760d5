//! Auth Middleware
//!
//! Bearer authentication for protected routes, the [`CurrentUser`]
//! extractor, and request-path stamping for error bodies.

use axum::extract::{FromRequestParts, OriginalUri, Request, State};
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::Response;
use kernel::error::{body::ErrorBody, conversions::render};
use platform::bearer::extract_bearer;

use crate::domain::entity::principal::Principal;
use crate::error::AuthError;
use crate::presentation::handlers::{AppState, AuthStore};

/// Middleware that requires a valid bearer token
///
/// On success the decoded [`Principal`] is stored in request extensions.
pub async fn require_bearer<R>(
    State(state): State<AppState<R>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError>
where
    R: AuthStore,
{
    let token = extract_bearer(req.headers())?;
    let principal = state.tokens.decode(token)?.into_principal()?;

    tracing::debug!(
        user_id = %principal.user_id,
        role = %principal.role,
        "Bearer token accepted"
    );

    req.extensions_mut().insert(principal);

    Ok(next.run(req).await)
}

/// Authenticated principal of the current request
#[derive(Debug, Clone)]
pub struct CurrentUser(pub Principal);

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Principal>()
            .cloned()
            .map(CurrentUser)
            .ok_or_else(|| AuthError::Unauthenticated("Authentication required".to_string()))
    }
}

/// リクエストパスをエラーボディに埋め込むミドルウェア
///
/// nest 後でも元のパスを使うため `OriginalUri` を優先する。
pub async fn attach_error_path(req: Request, next: Next) -> Response {
    let path = req
        .extensions()
        .get::<OriginalUri>()
        .map(|uri| uri.0.path().to_string())
        .unwrap_or_else(|| req.uri().path().to_string());

    let response = next.run(req).await;

    match response.extensions().get::<ErrorBody>() {
        Some(body) if body.path.is_none() => render(body.clone().with_path(path)),
        _ => response,
    }
}
