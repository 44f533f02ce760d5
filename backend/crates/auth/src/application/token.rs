//! Token Codec
//!
//! Issues and validates HS256 bearer tokens.
//!
//! Claims: `sub` (user id as decimal string), `email`, `role`, `iat`, `exp`
//! (Unix seconds). Expiry is checked with zero leeway.

use chrono::{Duration, Utc};
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, errors::ErrorKind as JwtErrorKind,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::application::config::AuthConfig;
use crate::domain::entity::principal::Principal;
use crate::domain::value_object::{user_id::UserId, user_role::UserRole};

/// Token claims
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub email: String,
    pub role: String,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    /// Numeric user id from `sub`
    pub fn user_id(&self) -> Result<UserId, TokenError> {
        self.sub.parse().map_err(|_| TokenError::Malformed)
    }

    /// Rebuild the request principal
    pub fn into_principal(self) -> Result<Principal, TokenError> {
        let user_id = self.user_id()?;
        let role = UserRole::from_code(&self.role).ok_or(TokenError::Malformed)?;
        Ok(Principal {
            user_id,
            email: self.email,
            role,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("Invalid token signature")]
    InvalidSignature,

    #[error("Token has expired")]
    Expired,

    #[error("Malformed token")]
    Malformed,

    #[error("Token encoding failed: {0}")]
    Encoding(String),
}

/// HS256 token issuer/validator
#[derive(Clone)]
pub struct TokenCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl TokenCodec {
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.validate_exp = true;

        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
            ttl,
        }
    }

    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(&config.jwt_secret, config.token_ttl)
    }

    /// Configured lifetime in milliseconds (reported as `expiresIn`)
    pub fn ttl_ms(&self) -> i64 {
        self.ttl.num_milliseconds()
    }

    /// Issue a token with the configured lifetime
    pub fn issue(&self, user_id: UserId, email: &str, role: UserRole) -> Result<String, TokenError> {
        self.issue_with_ttl(user_id, email, role, self.ttl)
    }

    /// Issue a token with an explicit lifetime
    pub fn issue_with_ttl(
        &self,
        user_id: UserId,
        email: &str,
        role: UserRole,
        ttl: Duration,
    ) -> Result<String, TokenError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            email: email.to_string(),
            role: role.code().to_string(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        };

        jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| TokenError::Encoding(e.to_string()))
    }

    /// Validate signature and expiry, then return the claims
    pub fn decode(&self, token: &str) -> Result<Claims, TokenError> {
        if token.trim().is_empty() {
            return Err(TokenError::Malformed);
        }

        let data = jsonwebtoken::decode::<Claims>(token, &self.decoding, &self.validation)
            .map_err(|e| match e.kind() {
                JwtErrorKind::InvalidSignature => TokenError::InvalidSignature,
                JwtErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Malformed,
            })?;

        // Reject non-numeric subjects here so callers never see them
        data.claims.user_id()?;

        Ok(data.claims)
    }
}

impl std::fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCodec")
            .field("ttl_ms", &self.ttl_ms())
            .finish_non_exhaustive()
    }
}
