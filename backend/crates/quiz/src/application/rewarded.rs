//! Rewarded-Config Resolver
//!
//! Resolves a popup configuration by scope (homepage or category id).
//! A scope that has never been resolved gets the documented default,
//! persisted immediately so a second read sees the same row.

use std::sync::Arc;

use crate::domain::entity::rewarded_config::{
    ConfigScope, RewardedPopupConfig, RewardedPopupConfigPatch,
};
use crate::domain::repository::{CategoryRepository, RewardedConfigRepository};
use crate::error::QuizResult;

/// Rewarded-config resolver use case
pub struct RewardedConfigUseCase<R>
where
    R: CategoryRepository + RewardedConfigRepository,
{
    repo: Arc<R>,
}

impl<R> RewardedConfigUseCase<R>
where
    R: CategoryRepository + RewardedConfigRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// All stored configs (admin list view)
    pub async fn list(&self) -> QuizResult<Vec<RewardedPopupConfig>> {
        self.repo.list_rewarded_configs().await
    }

    /// Resolve the config for a scope, creating and persisting the default
    /// on first access
    pub async fn resolve(&self, scope: ConfigScope) -> QuizResult<RewardedPopupConfig> {
        if let Some(config) = self.repo.find_rewarded_config(&scope).await? {
            return Ok(config);
        }

        let category_name = self.derive_category_name(&scope).await?;
        let config = RewardedPopupConfig::default_for_scope(scope, category_name);

        // Persisting the default is best effort: a failed write degrades to
        // serving the transient default, never to an error response.
        if let Err(e) = self.repo.save_rewarded_config(&config).await {
            tracing::warn!(
                scope = %config.scope,
                error = %e,
                "Failed to persist default rewarded config"
            );
        } else {
            tracing::info!(scope = %config.scope, "Created default rewarded config");
        }

        Ok(config)
    }

    /// Upsert: merge provided fields into the existing-or-defaulted row
    ///
    /// Idempotent; re-running the same update yields the same stored state.
    /// Concurrent writers race at last-write-wins, which is acceptable for
    /// rare, low-stakes configuration changes.
    pub async fn update(
        &self,
        scope: ConfigScope,
        mut patch: RewardedPopupConfigPatch,
    ) -> QuizResult<RewardedPopupConfig> {
        let mut config = match self.repo.find_rewarded_config(&scope).await? {
            Some(existing) => existing,
            None => {
                let category_name = self.derive_category_name(&scope).await?;
                RewardedPopupConfig::default_for_scope(scope, category_name)
            }
        };

        // A blank category name in the patch re-derives, same as creation
        if patch
            .category_name
            .as_ref()
            .is_some_and(|name| name.trim().is_empty())
        {
            patch.category_name = Some(self.derive_category_name(&config.scope).await?);
        }

        config.apply(patch);

        if config.category_name.trim().is_empty() {
            config.category_name = self.derive_category_name(&config.scope).await?;
        }

        self.repo.save_rewarded_config(&config).await?;

        tracing::info!(scope = %config.scope, "Rewarded config updated");
        Ok(config)
    }

    /// Display name for a scope: the category's name when it exists,
    /// a placeholder for unknown ids, "Homepage" for the null scope
    async fn derive_category_name(&self, scope: &ConfigScope) -> QuizResult<String> {
        match scope {
            ConfigScope::Homepage => Ok("Homepage".to_string()),
            ConfigScope::Category(category_id) => {
                let name = self
                    .repo
                    .find_category(category_id)
                    .await?
                    .map(|c| c.name)
                    .unwrap_or_else(|| format!("Category {category_id}"));
                Ok(name)
            }
        }
    }
}
