//! Reset Token Value Object
//!
//! Pending password-reset state on an admin account. The raw token is
//! generated once, handed to the mailer, and never stored: only its SHA-256
//! digest and an expiry survive. Presented tokens are matched by digest.

use chrono::{DateTime, Duration, Utc};
use platform::crypto;

/// Stored reset-token state (digest + expiry)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResetToken {
    token_hash: String,
    expires_at: DateTime<Utc>,
}

impl ResetToken {
    /// Issue a fresh token
    ///
    /// Returns the storable state and the raw token. The raw token leaves
    /// this function exactly once, for the reset email.
    pub fn issue(ttl: Duration) -> (Self, String) {
        let raw = crypto::random_url_token();
        let token = Self {
            token_hash: Self::hash_of(&raw),
            expires_at: Utc::now() + ttl,
        };
        (token, raw)
    }

    /// Reconstruct from stored values
    pub fn from_parts(token_hash: impl Into<String>, expires_at: DateTime<Utc>) -> Self {
        Self {
            token_hash: token_hash.into(),
            expires_at,
        }
    }

    /// Digest of a presented raw token
    pub fn hash_of(raw: &str) -> String {
        crypto::sha256_hex(raw.as_bytes())
    }

    /// Whether the token has passed its expiry
    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }

    /// Stored digest
    pub fn token_hash(&self) -> &str {
        &self.token_hash
    }

    /// Expiry timestamp
    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_produces_matching_hash() {
        let (token, raw) = ResetToken::issue(Duration::hours(1));
        assert_eq!(token.token_hash(), ResetToken::hash_of(&raw));
        assert!(!token.is_expired());
    }

    #[test]
    fn test_raw_token_not_stored() {
        let (token, raw) = ResetToken::issue(Duration::hours(1));
        assert_ne!(token.token_hash(), raw);
    }

    #[test]
    fn test_backdated_token_is_expired() {
        let token = ResetToken::from_parts("digest", Utc::now() - Duration::minutes(1));
        assert!(token.is_expired());
    }

    #[test]
    fn test_issue_is_unique() {
        let (a, _) = ResetToken::issue(Duration::hours(1));
        let (b, _) = ResetToken::issue(Duration::hours(1));
        assert_ne!(a.token_hash(), b.token_hash());
    }
}
