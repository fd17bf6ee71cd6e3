//! Common ID Types
//!
//! Type-safe ID wrappers for domain entities.
//!
//! Every entity is keyed by an application-generated string id (a UUID v4
//! rendered to text at creation time), so ids stay stable across
//! export/import and are never tied to a store-native row identifier.

use std::fmt;
use std::marker::PhantomData;
use uuid::Uuid;

/// Generic typed ID wrapper
///
/// Usage:
/// ```
/// use kernel::id::{Id, markers};
/// type CategoryId = Id<markers::Category>;
/// ```
///
/// Clone/Eq/Hash are implemented by hand: derives would demand the same
/// bounds of the marker type, and markers are bare unit structs.
pub struct Id<T> {
    value: String,
    _marker: PhantomData<T>,
}

impl<T> Clone for Id<T> {
    fn clone(&self) -> Self {
        Self {
            value: self.value.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T> PartialEq for Id<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T> Eq for Id<T> {}

impl<T> std::hash::Hash for Id<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl<T> Id<T> {
    /// Create a new random ID (UUID v4, rendered as text)
    pub fn new() -> Self {
        Self {
            value: Uuid::new_v4().to_string(),
            _marker: PhantomData,
        }
    }

    /// Create from an existing string (e.g., a path parameter or a db row)
    pub fn from_string(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            _marker: PhantomData,
        }
    }

    /// Get the id as a string slice
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Convert into the underlying string
    pub fn into_inner(self) -> String {
        self.value
    }
}

impl<T> Default for Id<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({})", self.value)
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl<T> From<String> for Id<T> {
    fn from(value: String) -> Self {
        Self::from_string(value)
    }
}

impl<T> From<Id<T>> for String {
    fn from(id: Id<T>) -> Self {
        id.value
    }
}

impl<T> AsRef<str> for Id<T> {
    fn as_ref(&self) -> &str {
        &self.value
    }
}

impl<T> serde::Serialize for Id<T> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.value)
    }
}

impl<'de, T> serde::Deserialize<'de> for Id<T> {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Ok(Self::from_string(value))
    }
}

/// Marker types for different entity IDs
pub mod markers {
    /// Marker for admin account IDs
    pub struct Admin;

    /// Marker for quiz category IDs
    pub struct Category;

    /// Marker for quiz question IDs
    pub struct Question;

    /// Marker for script injection IDs
    pub struct Script;

    /// Marker for ad slot IDs
    pub struct AdSlot;

    /// Marker for rewarded popup config IDs
    pub struct RewardedConfig;

    /// Marker for ad analytics event IDs
    pub struct AnalyticsEvent;

    /// Marker for site config IDs
    pub struct SiteConfig;
}

/// Type aliases for common IDs
pub type AdminId = Id<markers::Admin>;
pub type CategoryId = Id<markers::Category>;
pub type QuestionId = Id<markers::Question>;
pub type ScriptId = Id<markers::Script>;
pub type AdSlotId = Id<markers::AdSlot>;
pub type RewardedConfigId = Id<markers::RewardedConfig>;
pub type AnalyticsEventId = Id<markers::AnalyticsEvent>;
pub type SiteConfigId = Id<markers::SiteConfig>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_type_safety() {
        let category_id: CategoryId = Id::new();
        let question_id: QuestionId = Id::new();

        // These are different types, cannot be mixed
        let _c: String = category_id.into_inner();
        let _q: String = question_id.into_inner();
    }

    #[test]
    fn test_id_from_string() {
        let id: CategoryId = Id::from_string("abc-123");
        assert_eq!(id.as_str(), "abc-123");
    }

    #[test]
    fn test_new_ids_are_unique() {
        let a: CategoryId = Id::new();
        let b: CategoryId = Id::new();
        assert_ne!(a, b);
    }

    #[test]
    fn test_serde_round_trip() {
        let id: QuestionId = Id::from_string("q-1");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"q-1\"");
        let back: QuestionId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
