//! Rewarded Popup Config Entity

use chrono::{DateTime, Utc};
use kernel::id::{CategoryId, RewardedConfigId};
use std::fmt;

/// Resolution key of a rewarded-popup config
///
/// Exactly one config exists per scope; `Homepage` is the null-category
/// scope of the original data model.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ConfigScope {
    Homepage,
    Category(CategoryId),
}

impl ConfigScope {
    /// Path-segment form: the literal `homepage` or a category id
    pub fn from_path_segment(segment: &str) -> Self {
        if segment == "homepage" {
            ConfigScope::Homepage
        } else {
            ConfigScope::Category(CategoryId::from_string(segment))
        }
    }

    /// Database form: NULL for homepage, the category id otherwise
    pub fn as_db(&self) -> Option<&str> {
        match self {
            ConfigScope::Homepage => None,
            ConfigScope::Category(id) => Some(id.as_str()),
        }
    }

    /// Reconstruct from the database form
    pub fn from_db(category_id: Option<String>) -> Self {
        match category_id {
            None => ConfigScope::Homepage,
            Some(id) => ConfigScope::Category(CategoryId::from_string(id)),
        }
    }

    pub fn category_id(&self) -> Option<&CategoryId> {
        match self {
            ConfigScope::Homepage => None,
            ConfigScope::Category(id) => Some(id),
        }
    }
}

impl fmt::Display for ConfigScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigScope::Homepage => f.write_str("homepage"),
            ConfigScope::Category(id) => write!(f, "{id}"),
        }
    }
}

/// Default number of questions before the popup triggers
pub const DEFAULT_TRIGGER_AFTER_QUESTIONS: i32 = 5;

/// Default coin reward granted by the popup
pub const DEFAULT_COIN_REWARD: i32 = 200;

/// Rewarded popup configuration
///
/// Lazily created with these defaults the first time a scope is resolved,
/// and persisted immediately.
#[derive(Debug, Clone)]
pub struct RewardedPopupConfig {
    pub config_id: RewardedConfigId,
    pub scope: ConfigScope,
    pub category_name: String,
    pub trigger_after_questions: i32,
    pub coin_reward: i32,
    pub is_active: bool,
    pub show_on_insufficient_coins: bool,
    pub show_during_quiz: bool,
    pub enable_analytics: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl RewardedPopupConfig {
    /// Construct the documented default for a scope
    pub fn default_for_scope(scope: ConfigScope, category_name: String) -> Self {
        let now = Utc::now();
        Self {
            config_id: RewardedConfigId::new(),
            scope,
            category_name,
            trigger_after_questions: DEFAULT_TRIGGER_AFTER_QUESTIONS,
            coin_reward: DEFAULT_COIN_REWARD,
            is_active: true,
            show_on_insufficient_coins: true,
            show_during_quiz: true,
            enable_analytics: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Merge provided fields into the config and bump `updated_at`
    ///
    /// Idempotent: applying the same patch twice leaves the same state
    /// (except the timestamp).
    pub fn apply(&mut self, patch: RewardedPopupConfigPatch) {
        if let Some(v) = patch.category_name {
            self.category_name = v;
        }
        if let Some(v) = patch.trigger_after_questions {
            self.trigger_after_questions = v;
        }
        if let Some(v) = patch.coin_reward {
            self.coin_reward = v;
        }
        if let Some(v) = patch.is_active {
            self.is_active = v;
        }
        if let Some(v) = patch.show_on_insufficient_coins {
            self.show_on_insufficient_coins = v;
        }
        if let Some(v) = patch.show_during_quiz {
            self.show_during_quiz = v;
        }
        if let Some(v) = patch.enable_analytics {
            self.enable_analytics = v;
        }
        self.updated_at = Utc::now();
    }
}

/// Partial update; `None` fields are left untouched
#[derive(Debug, Clone, Default)]
pub struct RewardedPopupConfigPatch {
    pub category_name: Option<String>,
    pub trigger_after_questions: Option<i32>,
    pub coin_reward: Option<i32>,
    pub is_active: Option<bool>,
    pub show_on_insufficient_coins: Option<bool>,
    pub show_during_quiz: Option<bool>,
    pub enable_analytics: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_path_segment() {
        assert_eq!(
            ConfigScope::from_path_segment("homepage"),
            ConfigScope::Homepage
        );
        assert_eq!(
            ConfigScope::from_path_segment("cat-1"),
            ConfigScope::Category(CategoryId::from_string("cat-1"))
        );
    }

    #[test]
    fn test_scope_db_round_trip() {
        assert_eq!(ConfigScope::Homepage.as_db(), None);
        assert_eq!(ConfigScope::from_db(None), ConfigScope::Homepage);

        let scope = ConfigScope::Category(CategoryId::from_string("cat-1"));
        assert_eq!(scope.as_db(), Some("cat-1"));
        assert_eq!(ConfigScope::from_db(Some("cat-1".to_string())), scope);
    }

    #[test]
    fn test_defaults() {
        let config =
            RewardedPopupConfig::default_for_scope(ConfigScope::Homepage, "Homepage".to_string());
        assert_eq!(config.trigger_after_questions, 5);
        assert_eq!(config.coin_reward, 200);
        assert!(config.is_active);
        assert!(config.show_on_insufficient_coins);
        assert!(config.show_during_quiz);
        assert!(config.enable_analytics);
    }

    #[test]
    fn test_apply_merges_only_provided_fields() {
        let mut config =
            RewardedPopupConfig::default_for_scope(ConfigScope::Homepage, "Homepage".to_string());

        config.apply(RewardedPopupConfigPatch {
            coin_reward: Some(150),
            ..Default::default()
        });

        assert_eq!(config.coin_reward, 150);
        assert_eq!(config.trigger_after_questions, 5);
        assert!(config.is_active);
    }

    #[test]
    fn test_apply_is_idempotent() {
        let mut a =
            RewardedPopupConfig::default_for_scope(ConfigScope::Homepage, "Homepage".to_string());
        let patch = RewardedPopupConfigPatch {
            coin_reward: Some(150),
            is_active: Some(false),
            ..Default::default()
        };

        a.apply(patch.clone());
        let first = (a.coin_reward, a.is_active, a.trigger_after_questions);
        a.apply(patch);
        let second = (a.coin_reward, a.is_active, a.trigger_after_questions);

        assert_eq!(first, second);
    }
}
