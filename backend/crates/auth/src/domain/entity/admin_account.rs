//! Admin Account Entity
//!
//! The single administrative principal of the dashboard. Credentials and
//! reset-token state live on the same entity because the product has exactly
//! one kind of account.

use chrono::{DateTime, Utc};
use kernel::id::AdminId;
use platform::password::HashedPassword;

use crate::domain::value_object::{admin_name::AdminName, email::Email, reset_token::ResetToken};

/// Admin account entity
#[derive(Debug, Clone)]
pub struct AdminAccount {
    /// Stable string identifier
    pub admin_id: AdminId,
    /// Login name (unique)
    pub username: AdminName,
    /// Contact address for password resets (unique)
    pub email: Email,
    /// Argon2id password hash (PHC string)
    pub password_hash: HashedPassword,
    /// Pending reset token, if a reset was requested
    pub reset_token: Option<ResetToken>,
    /// Last successful login time
    pub last_login_at: Option<DateTime<Utc>>,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl AdminAccount {
    /// Create a new admin account
    pub fn new(username: AdminName, email: Email, password_hash: HashedPassword) -> Self {
        let now = Utc::now();
        Self {
            admin_id: AdminId::new(),
            username,
            email,
            password_hash,
            reset_token: None,
            last_login_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Record successful login
    pub fn record_login(&mut self) {
        let now = Utc::now();
        self.last_login_at = Some(now);
        self.updated_at = now;
    }

    /// Replace the stored password hash
    pub fn update_password(&mut self, new_hash: HashedPassword) {
        self.password_hash = new_hash;
        self.updated_at = Utc::now();
    }

    /// Attach a pending reset token (replaces any previous one)
    pub fn set_reset_token(&mut self, token: ResetToken) {
        self.reset_token = Some(token);
        self.updated_at = Utc::now();
    }

    /// Clear the reset token after a successful reset
    pub fn clear_reset_token(&mut self) {
        self.reset_token = None;
        self.updated_at = Utc::now();
    }

    /// Change the login name
    pub fn set_username(&mut self, username: AdminName) {
        self.username = username;
        self.updated_at = Utc::now();
    }

    /// Change the contact address
    pub fn set_email(&mut self, email: Email) {
        self.email = email;
        self.updated_at = Utc::now();
    }

    /// Whether the pending reset token (if any) is still usable
    pub fn has_valid_reset_token(&self) -> bool {
        self.reset_token.as_ref().is_some_and(|t| !t.is_expired())
    }
}
