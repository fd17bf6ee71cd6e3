//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entity::admin_account::AdminAccount;

/// Generic message returned by forgot/reset password
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

// ============================================================================
// Setup
// ============================================================================

/// Setup request
#[derive(Debug, Clone, Deserialize)]
pub struct SetupRequest {
    pub username: String,
    pub password: String,
    pub email: Option<String>,
}

/// Admin account as exposed over the API
///
/// The password hash and reset-token state never leave the server.
#[derive(Debug, Clone, Serialize)]
pub struct AdminAccountResponse {
    pub id: String,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
}

impl From<&AdminAccount> for AdminAccountResponse {
    fn from(account: &AdminAccount) -> Self {
        Self {
            id: account.admin_id.to_string(),
            username: account.username.as_str().to_string(),
            email: account.email.as_str().to_string(),
            created_at: account.created_at,
            updated_at: account.updated_at,
            last_login: account.last_login_at,
        }
    }
}

// ============================================================================
// Login
// ============================================================================

/// Login request
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Login response
#[derive(Debug, Clone, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

impl TokenResponse {
    pub fn bearer(access_token: String) -> Self {
        Self {
            access_token,
            token_type: "bearer".to_string(),
        }
    }
}

// ============================================================================
// Verify
// ============================================================================

/// Verify response
#[derive(Debug, Clone, Serialize)]
pub struct VerifyResponse {
    pub valid: bool,
    pub username: String,
}

// ============================================================================
// Password reset
// ============================================================================

/// Forgot-password request
#[derive(Debug, Clone, Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

/// Reset-password request
#[derive(Debug, Clone, Deserialize)]
pub struct ResetPasswordRequest {
    pub token: String,
    pub new_password: String,
}

// ============================================================================
// Profile
// ============================================================================

/// Profile update request; only provided fields are applied
#[derive(Debug, Clone, Deserialize)]
pub struct ProfileUpdateRequest {
    pub current_password: String,
    pub username: Option<String>,
    pub email: Option<String>,
    pub new_password: Option<String>,
}
