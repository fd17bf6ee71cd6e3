//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::time::Duration;

use platform::password::{HashCost, PasswordPolicy};

/// Auth application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Secret key for signing bearer tokens (HS256)
    pub jwt_secret: Vec<u8>,
    /// Bearer token lifetime (default 30 minutes)
    pub token_ttl: Duration,
    /// Password-reset token lifetime (default 1 hour)
    pub reset_token_ttl: Duration,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
    /// Argon2id cost parameters
    pub hash_cost: HashCost,
    /// Password acceptance policy (applied when passwords are set)
    pub password_policy: PasswordPolicy,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: vec![0u8; 32],
            token_ttl: Duration::from_secs(30 * 60),
            reset_token_ttl: Duration::from_secs(3600),
            password_pepper: None,
            hash_cost: HashCost::default(),
            password_policy: PasswordPolicy::default(),
        }
    }
}

impl AuthConfig {
    /// Create config with a random signing secret (for development)
    pub fn with_random_secret() -> Self {
        Self {
            jwt_secret: platform::crypto::random_bytes(32),
            ..Default::default()
        }
    }

    /// Create config for development (random secret, cheap hashing, relaxed policy)
    pub fn development() -> Self {
        Self {
            hash_cost: HashCost::development(),
            password_policy: PasswordPolicy::development(),
            ..Self::with_random_secret()
        }
    }

    /// Token lifetime in whole seconds
    pub fn token_ttl_secs(&self) -> i64 {
        self.token_ttl.as_secs() as i64
    }

    /// Reset-token lifetime as a chrono duration
    pub fn reset_token_ttl_chrono(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.reset_token_ttl.as_secs() as i64)
    }

    /// Get password pepper as slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }
}
