//! Forgot Password Use Case
//!
//! Issues a reset token for a matching account and dispatches the reset
//! email. Never reveals whether the email matched anything: the outcome is
//! identical for known and unknown addresses.

use std::sync::Arc;

use platform::mailer::Mailer;

use crate::application::config::AuthConfig;
use crate::domain::repository::AdminRepository;
use crate::domain::value_object::{email::Email, reset_token::ResetToken};
use crate::error::AuthResult;

/// Forgot password use case
pub struct ForgotPasswordUseCase<R>
where
    R: AdminRepository,
{
    repo: Arc<R>,
    config: Arc<AuthConfig>,
    mailer: Arc<Mailer>,
}

impl<R> ForgotPasswordUseCase<R>
where
    R: AdminRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>, mailer: Arc<Mailer>) -> Self {
        Self {
            repo,
            config,
            mailer,
        }
    }

    /// Process a reset request
    ///
    /// Returns `Ok(())` for unknown and malformed addresses too; the caller
    /// always answers with the same generic message.
    pub async fn execute(&self, email_raw: &str) -> AuthResult<()> {
        // A malformed address cannot match an account; same outcome
        let Ok(email) = Email::new(email_raw) else {
            return Ok(());
        };

        let Some(mut account) = self.repo.find_by_email(email.as_str()).await? else {
            tracing::debug!("Password reset requested for unknown email");
            return Ok(());
        };

        let (token, raw_token) = ResetToken::issue(self.config.reset_token_ttl_chrono());
        account.set_reset_token(token);
        self.repo.update(&account).await?;

        // Email dispatch is fire and forget: failing here must not produce
        // a different response than the unknown-email path.
        if let Err(e) = self
            .mailer
            .send_password_reset(
                account.email.as_str(),
                account.username.as_str(),
                &raw_token,
            )
            .await
        {
            tracing::error!(error = %e, "Password reset email dispatch failed");
        }

        tracing::info!(admin_id = %account.admin_id, "Password reset token issued");
        Ok(())
    }
}
