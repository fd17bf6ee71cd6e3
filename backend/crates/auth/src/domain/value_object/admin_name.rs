//! Admin Name Value Object
//!
//! Login name for the admin dashboard.
//!
//! ## Invariants
//! - Length: 3-50 characters (after trimming)
//! - Characters: ASCII letters, digits, underscore, hyphen

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Minimum length for an admin username (in characters)
pub const ADMIN_NAME_MIN_LENGTH: usize = 3;

/// Maximum length for an admin username (in characters)
pub const ADMIN_NAME_MAX_LENGTH: usize = 50;

/// Error returned when username validation fails
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AdminNameError {
    /// Username is empty after trimming
    #[error("Username is required")]
    Empty,

    /// Username is too short
    #[error("Username must be at least {min} characters long")]
    TooShort { min: usize },

    /// Username is too long
    #[error("Username must be at most {max} characters long")]
    TooLong { max: usize },

    /// Username contains a disallowed character
    #[error("Username can only contain letters, numbers, underscores, and hyphens")]
    InvalidCharacter,
}

/// Validated admin username
///
/// Stored and matched exactly as entered (minus surrounding whitespace).
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AdminName(String);

impl AdminName {
    /// Create a new AdminName from raw input
    pub fn new(input: impl AsRef<str>) -> Result<Self, AdminNameError> {
        let trimmed = input.as_ref().trim();

        if trimmed.is_empty() {
            return Err(AdminNameError::Empty);
        }

        let length = trimmed.chars().count();
        if length < ADMIN_NAME_MIN_LENGTH {
            return Err(AdminNameError::TooShort {
                min: ADMIN_NAME_MIN_LENGTH,
            });
        }
        if length > ADMIN_NAME_MAX_LENGTH {
            return Err(AdminNameError::TooLong {
                max: ADMIN_NAME_MAX_LENGTH,
            });
        }

        if !trimmed
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            return Err(AdminNameError::InvalidCharacter);
        }

        Ok(Self(trimmed.to_string()))
    }

    /// Create from database value (assumed already validated)
    pub fn from_db(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Get the username as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert into the underlying string
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Debug for AdminName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AdminName").field(&self.0).finish()
    }
}

impl fmt::Display for AdminName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for AdminName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for AdminName {
    type Error = AdminNameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<AdminName> for String {
    fn from(name: AdminName) -> Self {
        name.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_names() {
        assert!(AdminName::new("admin").is_ok());
        assert!(AdminName::new("quiz_master-01").is_ok());
        assert!(AdminName::new("ABC").is_ok());
    }

    #[test]
    fn test_trims_whitespace() {
        let name = AdminName::new("  admin  ").unwrap();
        assert_eq!(name.as_str(), "admin");
    }

    #[test]
    fn test_empty_fails() {
        assert!(matches!(AdminName::new(""), Err(AdminNameError::Empty)));
        assert!(matches!(AdminName::new("   "), Err(AdminNameError::Empty)));
    }

    #[test]
    fn test_too_short() {
        assert!(matches!(
            AdminName::new("ab"),
            Err(AdminNameError::TooShort { min: 3 })
        ));
    }

    #[test]
    fn test_too_long() {
        let input = "a".repeat(ADMIN_NAME_MAX_LENGTH + 1);
        assert!(matches!(
            AdminName::new(&input),
            Err(AdminNameError::TooLong { .. })
        ));
    }

    #[test]
    fn test_invalid_characters() {
        assert!(matches!(
            AdminName::new("admin!"),
            Err(AdminNameError::InvalidCharacter)
        ));
        assert!(matches!(
            AdminName::new("ad min"),
            Err(AdminNameError::InvalidCharacter)
        ));
        assert!(matches!(
            AdminName::new("admin@site"),
            Err(AdminNameError::InvalidCharacter)
        ));
    }

    #[test]
    fn test_serde_round_trip() {
        let name = AdminName::new("admin").unwrap();
        let json = serde_json::to_string(&name).unwrap();
        assert_eq!(json, "\"admin\"");
        let back: AdminName = serde_json::from_str(&json).unwrap();
        assert_eq!(back, name);
    }

    #[test]
    fn test_deserialize_invalid() {
        let result: Result<AdminName, _> = serde_json::from_str("\"a!\"");
        assert!(result.is_err());
    }
}
