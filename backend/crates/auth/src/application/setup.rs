//! Setup Use Case
//!
//! First-admin bootstrap: creates an admin account.

use std::sync::Arc;

use platform::password::ClearTextPassword;

use crate::application::config::AuthConfig;
use crate::domain::entity::admin_account::AdminAccount;
use crate::domain::repository::AdminRepository;
use crate::domain::value_object::{admin_name::AdminName, email::Email};
use crate::error::{AuthError, AuthResult};

/// Fallback contact address when setup provides none
const DEFAULT_ADMIN_EMAIL: &str = "admin@techkwiz.com";

/// Setup input
pub struct SetupInput {
    pub username: String,
    pub password: String,
    /// Optional; falls back to the default admin address
    pub email: Option<String>,
}

/// Setup use case
pub struct SetupUseCase<R>
where
    R: AdminRepository,
{
    repo: Arc<R>,
    config: Arc<AuthConfig>,
}

impl<R> SetupUseCase<R>
where
    R: AdminRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute(&self, input: SetupInput) -> AuthResult<AdminAccount> {
        let username =
            AdminName::new(&input.username).map_err(|e| AuthError::Validation(e.to_string()))?;

        if self.repo.exists_by_username(username.as_str()).await? {
            return Err(AuthError::UsernameTaken);
        }

        let email = Email::new(input.email.unwrap_or_else(|| DEFAULT_ADMIN_EMAIL.to_string()))
            .map_err(|e| AuthError::Validation(e.to_string()))?;

        if self.repo.exists_by_email(email.as_str()).await? {
            return Err(AuthError::EmailTaken);
        }

        let password = ClearTextPassword::new(input.password, &self.config.password_policy)?;
        let password_hash = password.hash(self.config.pepper(), &self.config.hash_cost)?;

        let account = AdminAccount::new(username, email, password_hash);
        self.repo.create(&account).await?;

        tracing::info!(
            admin_id = %account.admin_id,
            username = %account.username,
            "Admin account created"
        );

        Ok(account)
    }
}
