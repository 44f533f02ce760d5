//! Error conversions - HTTP boundary for [`AppError`]
//!
//! Feature-gated behind `axum`. Rendering stashes a copy of the
//! [`ErrorBody`] in the response extensions so that outer middleware can
//! fill in the request path without re-parsing the JSON.

#[cfg(feature = "axum")]
use super::app_error::AppError;
#[cfg(feature = "axum")]
use super::body::ErrorBody;

// ============================================================================
// Axum conversions (feature-gated)
// ============================================================================

#[cfg(feature = "axum")]
impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        render(ErrorBody::from_error(&self))
    }
}

/// Render an [`ErrorBody`] as a JSON response with its status code
#[cfg(feature = "axum")]
pub fn render(body: ErrorBody) -> axum::response::Response {
    use axum::Json;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;

    let status = StatusCode::from_u16(body.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let mut response = (status, Json(body.clone())).into_response();
    response.extensions_mut().insert(body);
    response
}

#[cfg(feature = "axum")]
impl From<axum::extract::rejection::JsonRejection> for AppError {
    fn from(rejection: axum::extract::rejection::JsonRejection) -> Self {
        AppError::bad_request(format!("Malformed request body: {}", rejection.body_text()))
    }
}

#[cfg(feature = "axum")]
impl From<axum::extract::rejection::QueryRejection> for AppError {
    fn from(rejection: axum::extract::rejection::QueryRejection) -> Self {
        AppError::bad_request(format!("Invalid query string: {}", rejection.body_text()))
    }
}

#[cfg(feature = "axum")]
impl From<axum::extract::rejection::PathRejection> for AppError {
    fn from(rejection: axum::extract::rejection::PathRejection) -> Self {
        AppError::bad_request(format!("Invalid path parameter: {}", rejection.body_text()))
    }
}

#[cfg(all(test, feature = "axum"))]
mod tests {
    use super::*;
    use axum::response::IntoResponse;

    #[tokio::test]
    async fn test_into_response_renders_body_and_extension() {
        let response = AppError::not_found("User not found with id: 9").into_response();
        assert_eq!(response.status(), axum::http::StatusCode::NOT_FOUND);

        let stashed = response.extensions().get::<ErrorBody>().cloned();
        assert_eq!(stashed.as_ref().map(|b| b.status), Some(404));

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["error"], "Not Found");
        assert_eq!(json["message"], "User not found with id: 9");
        assert!(json["path"].is_null());
    }
}
