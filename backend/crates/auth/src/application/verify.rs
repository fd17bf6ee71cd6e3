//! Verify Token Use Case
//!
//! Validates a presented bearer token and confirms its subject still maps
//! to an existing admin account.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::token::decode_token;
use crate::domain::repository::AdminRepository;
use crate::error::{AuthError, AuthResult};

/// Verify token use case
pub struct VerifyTokenUseCase<R>
where
    R: AdminRepository,
{
    repo: Arc<R>,
    config: Arc<AuthConfig>,
}

impl<R> VerifyTokenUseCase<R>
where
    R: AdminRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self { repo, config }
    }

    /// Validate the token and return the subject username
    pub async fn execute(&self, token: &str) -> AuthResult<String> {
        let claims = decode_token(token, &self.config)?;

        // A token whose subject was renamed or removed is dead
        self.repo
            .find_by_username(&claims.sub)
            .await?
            .ok_or(AuthError::TokenInvalid)?;

        Ok(claims.sub)
    }

    /// Just check validity (returns bool)
    pub async fn is_valid(&self, token: &str) -> bool {
        self.execute(token).await.is_ok()
    }
}
