//! Extractors
//!
//! Wrappers around axum's extractors whose rejections render as the
//! standard JSON error body.

use axum::extract::{FromRequest, FromRequestParts};

use crate::error::AuthError;

/// JSON body
#[derive(Debug, Clone, Copy, Default, FromRequest)]
#[from_request(via(axum::Json), rejection(AuthError))]
pub struct ApiJson<T>(pub T);

/// Path parameters
#[derive(Debug, Clone, Copy, Default, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AuthError))]
pub struct ApiPath<T>(pub T);

/// Query string
#[derive(Debug, Clone, Copy, Default, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AuthError))]
pub struct ApiQuery<T>(pub T);
