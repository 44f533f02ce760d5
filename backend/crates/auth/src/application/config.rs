//! Application Configuration
//!
//! Configuration for the Auth application layer.

use chrono::Duration;

/// Re-export HashCost from platform
pub use platform::password::HashCost;

/// Default token lifetime: 24 hours
pub const DEFAULT_TOKEN_TTL_MS: i64 = 86_400_000;

/// Length of generated signing secrets (256 bits)
const GENERATED_SECRET_LEN: usize = 32;

/// Auth application configuration
#[derive(Clone)]
pub struct AuthConfig {
    /// HS256 signing secret
    pub jwt_secret: Vec<u8>,
    /// Token lifetime
    pub token_ttl: Duration,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
    /// Argon2id work factor for new hashes
    pub hash_cost: HashCost,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: platform::crypto::random_bytes(GENERATED_SECRET_LEN),
            token_ttl: Duration::milliseconds(DEFAULT_TOKEN_TTL_MS),
            password_pepper: None,
            hash_cost: HashCost::default(),
        }
    }
}

impl AuthConfig {
    /// Create config with a fixed signing secret
    pub fn with_secret(secret: impl Into<Vec<u8>>) -> Self {
        Self {
            jwt_secret: secret.into(),
            ..Default::default()
        }
    }

    /// Create config for development
    ///
    /// Random signing secret (tokens die with the process) and a cheap
    /// hash cost for fast local iteration.
    pub fn development() -> Self {
        Self {
            hash_cost: HashCost::testing(),
            ..Default::default()
        }
    }

    /// Override the token lifetime in milliseconds
    pub fn with_token_ttl_ms(mut self, ttl_ms: i64) -> Self {
        self.token_ttl = Duration::milliseconds(ttl_ms);
        self
    }

    /// Override the hash cost
    pub fn with_hash_cost(mut self, cost: HashCost) -> Self {
        self.hash_cost = cost;
        self
    }

    /// Set the password pepper
    pub fn with_pepper(mut self, pepper: impl Into<Vec<u8>>) -> Self {
        self.password_pepper = Some(pepper.into());
        self
    }

    /// Get token TTL in milliseconds
    pub fn token_ttl_ms(&self) -> i64 {
        self.token_ttl.num_milliseconds()
    }

    /// Get password pepper as slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"[REDACTED]")
            .field("token_ttl_ms", &self.token_ttl_ms())
            .field("password_pepper", &self.password_pepper.as_ref().map(|_| "[REDACTED]"))
            .field("hash_cost", &self.hash_cost)
            .finish()
    }
}
