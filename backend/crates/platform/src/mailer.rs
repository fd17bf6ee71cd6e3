//! Transactional Email Dispatch
//!
//! Sends password-reset email through a Resend-style HTTP API. Without an
//! API key the mailer logs the reset URL instead of sending, which keeps
//! development environments working without credentials.

use std::time::Duration;

use serde::Serialize;
use thiserror::Error;

/// Resend API endpoint
const SEND_ENDPOINT: &str = "https://api.resend.com/emails";

/// Outbound request timeout
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Mailer errors
#[derive(Debug, Error)]
pub enum MailerError {
    /// Transport-level failure (connect, timeout, TLS)
    #[error("Email request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The API rejected the request
    #[error("Email API returned {status}")]
    Api { status: u16 },
}

#[derive(Serialize)]
struct SendEmailRequest {
    from: String,
    to: Vec<String>,
    subject: String,
    html: String,
}

/// Email dispatch handle
#[derive(Clone)]
pub struct Mailer {
    client: reqwest::Client,
    api_key: Option<String>,
    from: String,
    frontend_url: String,
}

impl Mailer {
    /// Create a mailer
    ///
    /// `api_key = None` switches to log-only mode.
    pub fn new(
        api_key: Option<String>,
        from: impl Into<String>,
        frontend_url: impl Into<String>,
    ) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("reqwest client construction cannot fail with static config");

        Self {
            client,
            api_key,
            from: from.into(),
            frontend_url: frontend_url.into(),
        }
    }

    /// Build the password-reset URL for a raw token
    pub fn reset_url(&self, token: &str) -> String {
        format!(
            "{}/admin/reset-password?token={}",
            self.frontend_url.trim_end_matches('/'),
            token
        )
    }

    /// Send a password-reset email containing the raw token in a URL
    ///
    /// The stored side only ever keeps the token hash; the raw token exists
    /// in this email and nowhere else.
    pub async fn send_password_reset(
        &self,
        to_email: &str,
        username: &str,
        token: &str,
    ) -> Result<(), MailerError> {
        let reset_url = self.reset_url(token);

        let Some(api_key) = &self.api_key else {
            tracing::info!(to_email, reset_url, "Email API not configured, logging reset link");
            return Ok(());
        };

        let body = SendEmailRequest {
            from: self.from.clone(),
            to: vec![to_email.to_string()],
            subject: "TechKwiz Admin - Password Reset Request".to_string(),
            html: format!(
                r#"<h2>Password Reset</h2>
<p>Hello {username},</p>
<p>We received a request to reset your password for the TechKwiz admin dashboard.
Click the link below to choose a new one:</p>
<p><a href="{reset_url}">{reset_url}</a></p>
<p>This link expires in 1 hour.</p>
<p>If you did not request this, you can safely ignore this email.</p>"#
            ),
        };

        let resp = self
            .client
            .post(SEND_ENDPOINT)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            tracing::error!(%status, body = %text, "Email API error");
            return Err(MailerError::Api {
                status: status.as_u16(),
            });
        }

        tracing::info!(to_email, "Password reset email sent");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset_url_format() {
        let mailer = Mailer::new(None, "noreply@techkwiz.com", "https://techkwiz.com");
        assert_eq!(
            mailer.reset_url("tok123"),
            "https://techkwiz.com/admin/reset-password?token=tok123"
        );
    }

    #[test]
    fn test_reset_url_trims_trailing_slash() {
        let mailer = Mailer::new(None, "noreply@techkwiz.com", "https://techkwiz.com/");
        assert_eq!(
            mailer.reset_url("tok123"),
            "https://techkwiz.com/admin/reset-password?token=tok123"
        );
    }

    #[tokio::test]
    async fn test_log_only_mode_succeeds() {
        let mailer = Mailer::new(None, "noreply@techkwiz.com", "http://localhost:3000");
        let result = mailer
            .send_password_reset("admin@techkwiz.com", "admin", "tok123")
            .await;
        assert!(result.is_ok());
    }
}
