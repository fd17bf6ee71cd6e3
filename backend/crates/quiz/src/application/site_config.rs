//! Site-Config Resolver
//!
//! Singleton counterpart of the rewarded-config resolver: the first read
//! creates and persists an empty default row.

use std::sync::Arc;

use crate::domain::entity::site_config::{SiteConfig, SiteConfigPatch};
use crate::domain::repository::SiteConfigRepository;
use crate::error::QuizResult;

/// Site-config use case
pub struct SiteConfigUseCase<R>
where
    R: SiteConfigRepository,
{
    repo: Arc<R>,
}

impl<R> SiteConfigUseCase<R>
where
    R: SiteConfigRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Return the stored config, creating and persisting a default on first
    /// access
    pub async fn resolve(&self) -> QuizResult<SiteConfig> {
        if let Some(config) = self.repo.find_site_config().await? {
            return Ok(config);
        }

        let config = SiteConfig::new_default();

        if let Err(e) = self.repo.save_site_config(&config).await {
            tracing::warn!(error = %e, "Failed to persist default site config");
        } else {
            tracing::info!("Created default site config");
        }

        Ok(config)
    }

    /// Merge provided fields into the existing-or-defaulted row
    pub async fn update(&self, patch: SiteConfigPatch) -> QuizResult<SiteConfig> {
        let mut config = match self.repo.find_site_config().await? {
            Some(existing) => existing,
            None => SiteConfig::new_default(),
        };

        config.apply(patch);
        self.repo.save_site_config(&config).await?;

        tracing::info!("Site config updated");
        Ok(config)
    }
}
