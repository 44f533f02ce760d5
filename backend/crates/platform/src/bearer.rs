//! Bearer Token Extraction
//!
//! Reads `Authorization: Bearer <token>` from request headers.

use http::{HeaderMap, header};
use thiserror::Error;

/// Authentication scheme accepted by [`extract_bearer`]
pub const BEARER_SCHEME: &str = "Bearer";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BearerError {
    #[error("Missing Authorization header")]
    Missing,

    #[error("Authorization header must use the Bearer scheme")]
    InvalidScheme,
}

/// Extract the bearer token from headers
///
/// The scheme is matched case-insensitively; the token itself is returned
/// trimmed and may still be empty.
pub fn extract_bearer(headers: &HeaderMap) -> Result<&str, BearerError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or(BearerError::Missing)?
        .to_str()
        .map_err(|_| BearerError::InvalidScheme)?;

    let (scheme, token) = value.split_once(' ').ok_or(BearerError::InvalidScheme)?;
    if !scheme.eq_ignore_ascii_case(BEARER_SCHEME) {
        return Err(BearerError::InvalidScheme);
    }

    Ok(token.trim())
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::HeaderValue;

    fn headers(value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static(value));
        headers
    }

    #[test]
    fn test_extract_bearer() {
        assert_eq!(extract_bearer(&headers("Bearer abc.def.ghi")), Ok("abc.def.ghi"));
        assert_eq!(extract_bearer(&headers("bearer xyz")), Ok("xyz"));
    }

    #[test]
    fn test_missing_header() {
        assert_eq!(extract_bearer(&HeaderMap::new()), Err(BearerError::Missing));
    }

    #[test]
    fn test_wrong_scheme() {
        assert_eq!(
            extract_bearer(&headers("Basic dXNlcjpwYXNz")),
            Err(BearerError::InvalidScheme)
        );
        assert_eq!(
            extract_bearer(&headers("Bearer")),
            Err(BearerError::InvalidScheme)
        );
    }

    #[test]
    fn test_empty_token_is_returned_empty() {
        assert_eq!(extract_bearer(&headers("Bearer   ")), Ok(""));
    }
}
