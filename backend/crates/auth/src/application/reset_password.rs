//! Reset Password Use Case
//!
//! Consumes a presented reset token: matches it by digest, checks expiry,
//! replaces the password hash and clears the token so it cannot be reused.

use std::sync::Arc;

use platform::password::ClearTextPassword;

use crate::application::config::AuthConfig;
use crate::domain::repository::AdminRepository;
use crate::domain::value_object::reset_token::ResetToken;
use crate::error::{AuthError, AuthResult};

/// Reset password input
pub struct ResetPasswordInput {
    pub token: String,
    pub new_password: String,
}

/// Reset password use case
pub struct ResetPasswordUseCase<R>
where
    R: AdminRepository,
{
    repo: Arc<R>,
    config: Arc<AuthConfig>,
}

impl<R> ResetPasswordUseCase<R>
where
    R: AdminRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute(&self, input: ResetPasswordInput) -> AuthResult<()> {
        let token_hash = ResetToken::hash_of(&input.token);

        let mut account = self
            .repo
            .find_by_reset_token_hash(&token_hash)
            .await?
            .ok_or(AuthError::ResetTokenInvalid)?;

        if !account.has_valid_reset_token() {
            return Err(AuthError::ResetTokenInvalid);
        }

        let password = ClearTextPassword::new(input.new_password, &self.config.password_policy)?;
        let password_hash = password.hash(self.config.pepper(), &self.config.hash_cost)?;

        account.update_password(password_hash);
        account.clear_reset_token();
        self.repo.update(&account).await?;

        tracing::info!(admin_id = %account.admin_id, "Password reset completed");
        Ok(())
    }
}
