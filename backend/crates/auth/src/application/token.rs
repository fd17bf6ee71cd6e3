//! Bearer Token Service
//!
//! Issues and verifies the signed, time-limited bearer tokens carried by
//! admin requests. Tokens are HS256 JWTs with a subject (username) and an
//! expiry claim; nothing else is embedded.

use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::application::config::AuthConfig;
use crate::error::{AuthError, AuthResult};

/// Token claims
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the admin username
    pub sub: String,
    /// Expiry as a unix timestamp
    pub exp: usize,
}

/// Issue a signed token for a username
pub fn issue_token(username: &str, config: &AuthConfig) -> AuthResult<String> {
    let expiration = Utc::now()
        .checked_add_signed(chrono::Duration::seconds(config.token_ttl_secs()))
        .ok_or_else(|| AuthError::Internal("Token expiry overflow".to_string()))?
        .timestamp();

    let claims = Claims {
        sub: username.to_string(),
        exp: expiration as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(&config.jwt_secret),
    )
    .map_err(|e| AuthError::Internal(format!("Token signing failed: {e}")))
}

/// Decode and validate a presented token
///
/// Signature and expiry are both checked; any failure collapses into
/// [`AuthError::TokenInvalid`] so callers cannot distinguish why.
pub fn decode_token(token: &str, config: &AuthConfig) -> AuthResult<Claims> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(&config.jwt_secret),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| AuthError::TokenInvalid)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_and_decode() {
        let config = AuthConfig::development();
        let token = issue_token("admin", &config).unwrap();
        let claims = decode_token(&token, &config).unwrap();
        assert_eq!(claims.sub, "admin");
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let config = AuthConfig::development();
        let other = AuthConfig::development();
        let token = issue_token("admin", &config).unwrap();
        assert!(matches!(
            decode_token(&token, &other),
            Err(AuthError::TokenInvalid)
        ));
    }

    #[test]
    fn test_garbage_rejected() {
        let config = AuthConfig::development();
        assert!(matches!(
            decode_token("not.a.token", &config),
            Err(AuthError::TokenInvalid)
        ));
    }

    #[test]
    fn test_expired_rejected() {
        let config = AuthConfig::development();

        // Forge a token whose expiry is beyond the default 60s leeway
        let claims = Claims {
            sub: "admin".to_string(),
            exp: (Utc::now().timestamp() - 120) as usize,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(&config.jwt_secret),
        )
        .unwrap();

        assert!(matches!(
            decode_token(&token, &config),
            Err(AuthError::TokenInvalid)
        ));
    }
}
