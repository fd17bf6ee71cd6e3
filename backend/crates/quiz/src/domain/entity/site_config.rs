//! Site Config Entity
//!
//! Singleton row of site-wide analytics/pixel ids and static text files.
//! Resolve-or-create semantics mirror the rewarded-popup config.

use chrono::{DateTime, Utc};
use kernel::id::SiteConfigId;

/// Site-wide configuration
#[derive(Debug, Clone, Default)]
pub struct SiteConfig {
    pub site_config_id: SiteConfigId,
    pub google_analytics_id: Option<String>,
    pub google_search_console_id: Option<String>,
    pub facebook_pixel_id: Option<String>,
    pub google_tag_manager_id: Option<String>,
    pub twitter_pixel_id: Option<String>,
    pub linkedin_pixel_id: Option<String>,
    pub tiktok_pixel_id: Option<String>,
    pub snapchat_pixel_id: Option<String>,
    pub ads_txt_content: Option<String>,
    pub robots_txt_content: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SiteConfig {
    /// Fresh config with no ids configured
    pub fn new_default() -> Self {
        let now = Utc::now();
        Self {
            site_config_id: SiteConfigId::new(),
            created_at: now,
            updated_at: now,
            ..Default::default()
        }
    }

    /// Merge provided fields and bump `updated_at`
    pub fn apply(&mut self, patch: SiteConfigPatch) {
        macro_rules! merge {
            ($field:ident) => {
                if let Some(v) = patch.$field {
                    self.$field = Some(v);
                }
            };
        }
        merge!(google_analytics_id);
        merge!(google_search_console_id);
        merge!(facebook_pixel_id);
        merge!(google_tag_manager_id);
        merge!(twitter_pixel_id);
        merge!(linkedin_pixel_id);
        merge!(tiktok_pixel_id);
        merge!(snapchat_pixel_id);
        merge!(ads_txt_content);
        merge!(robots_txt_content);
        self.updated_at = Utc::now();
    }
}

/// Partial update; `None` fields are left untouched
#[derive(Debug, Clone, Default)]
pub struct SiteConfigPatch {
    pub google_analytics_id: Option<String>,
    pub google_search_console_id: Option<String>,
    pub facebook_pixel_id: Option<String>,
    pub google_tag_manager_id: Option<String>,
    pub twitter_pixel_id: Option<String>,
    pub linkedin_pixel_id: Option<String>,
    pub tiktok_pixel_id: Option<String>,
    pub snapchat_pixel_id: Option<String>,
    pub ads_txt_content: Option<String>,
    pub robots_txt_content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_merges_only_provided_fields() {
        let mut config = SiteConfig::new_default();
        config.google_analytics_id = Some("GA-1".to_string());

        config.apply(SiteConfigPatch {
            facebook_pixel_id: Some("FB-1".to_string()),
            ..Default::default()
        });

        assert_eq!(config.google_analytics_id.as_deref(), Some("GA-1"));
        assert_eq!(config.facebook_pixel_id.as_deref(), Some("FB-1"));
        assert!(config.robots_txt_content.is_none());
    }
}
