//! Update Profile Use Case
//!
//! Applies partial changes to the authenticated admin's account after
//! re-verifying the current password.

use std::sync::Arc;

use platform::password::ClearTextPassword;

use crate::application::config::AuthConfig;
use crate::domain::entity::admin_account::AdminAccount;
use crate::domain::repository::AdminRepository;
use crate::domain::value_object::{admin_name::AdminName, email::Email};
use crate::error::{AuthError, AuthResult};

/// Update profile input
///
/// Only provided fields are applied.
pub struct UpdateProfileInput {
    pub current_password: String,
    pub username: Option<String>,
    pub email: Option<String>,
    pub new_password: Option<String>,
}

/// Update profile use case
pub struct UpdateProfileUseCase<R>
where
    R: AdminRepository,
{
    repo: Arc<R>,
    config: Arc<AuthConfig>,
}

impl<R> UpdateProfileUseCase<R>
where
    R: AdminRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self { repo, config }
    }

    /// `current_username` comes from the verified bearer token
    pub async fn execute(
        &self,
        current_username: &str,
        input: UpdateProfileInput,
    ) -> AuthResult<AdminAccount> {
        let mut account = self
            .repo
            .find_by_username(current_username)
            .await?
            .ok_or(AuthError::TokenInvalid)?;

        let current = ClearTextPassword::unvalidated(input.current_password);
        if !account.password_hash.verify(&current, self.config.pepper()) {
            return Err(AuthError::InvalidCredentials);
        }

        if let Some(new_username) = input.username {
            let new_username =
                AdminName::new(&new_username).map_err(|e| AuthError::Validation(e.to_string()))?;

            if new_username != account.username
                && self.repo.exists_by_username(new_username.as_str()).await?
            {
                return Err(AuthError::Validation(
                    "Username already taken".to_string(),
                ));
            }
            account.set_username(new_username);
        }

        if let Some(new_email) = input.email {
            let new_email =
                Email::new(new_email).map_err(|e| AuthError::Validation(e.to_string()))?;

            if new_email != account.email && self.repo.exists_by_email(new_email.as_str()).await? {
                return Err(AuthError::Validation(
                    "Email already registered".to_string(),
                ));
            }
            account.set_email(new_email);
        }

        if let Some(new_password) = input.new_password {
            let password = ClearTextPassword::new(new_password, &self.config.password_policy)?;
            account.update_password(password.hash(self.config.pepper(), &self.config.hash_cost)?);
        }

        self.repo.update(&account).await?;

        tracing::info!(admin_id = %account.admin_id, "Admin profile updated");
        Ok(account)
    }
}
