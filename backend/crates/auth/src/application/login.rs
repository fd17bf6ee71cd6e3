//! Login Use Case
//!
//! Authenticates an admin and issues a bearer token.

use std::sync::Arc;

use platform::password::ClearTextPassword;

use crate::application::config::AuthConfig;
use crate::application::token::issue_token;
use crate::domain::repository::AdminRepository;
use crate::error::{AuthError, AuthResult};

/// Login input
pub struct LoginInput {
    pub username: String,
    pub password: String,
}

/// Login output
pub struct LoginOutput {
    /// Signed bearer token
    pub access_token: String,
}

/// Login use case
pub struct LoginUseCase<R>
where
    R: AdminRepository,
{
    repo: Arc<R>,
    config: Arc<AuthConfig>,
}

impl<R> LoginUseCase<R>
where
    R: AdminRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute(&self, input: LoginInput) -> AuthResult<LoginOutput> {
        let account = self
            .repo
            .find_by_username(input.username.trim())
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        // No policy check on login: the stored password passed policy when
        // it was set, and a tightened policy must not lock the account out.
        let password = ClearTextPassword::unvalidated(input.password);

        if !account.password_hash.verify(&password, self.config.pepper()) {
            // last_login stays untouched on failure
            return Err(AuthError::InvalidCredentials);
        }

        let mut account = account;
        account.record_login();
        self.repo.update(&account).await?;

        let access_token = issue_token(account.username.as_str(), &self.config)?;

        tracing::info!(
            admin_id = %account.admin_id,
            username = %account.username,
            "Admin signed in"
        );

        Ok(LoginOutput { access_token })
    }
}
