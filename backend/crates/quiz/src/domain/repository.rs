//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use crate::domain::entity::ad_slot::AdSlot;
use crate::domain::entity::analytics::{AdAnalyticsEvent, AnalyticsFilter, AnalyticsTotals};
use crate::domain::entity::category::QuizCategory;
use crate::domain::entity::question::{Difficulty, QuizQuestion};
use crate::domain::entity::rewarded_config::{ConfigScope, RewardedPopupConfig};
use crate::domain::entity::script::ScriptInjection;
use crate::domain::entity::site_config::SiteConfig;
use crate::error::QuizResult;
use kernel::id::{AdSlotId, CategoryId, QuestionId, ScriptId};

/// Category repository trait
#[trait_variant::make(CategoryRepository: Send)]
pub trait LocalCategoryRepository {
    /// List all categories
    async fn list_categories(&self) -> QuizResult<Vec<QuizCategory>>;

    /// Find category by ID
    async fn find_category(&self, category_id: &CategoryId) -> QuizResult<Option<QuizCategory>>;

    /// Create a category
    async fn create_category(&self, category: &QuizCategory) -> QuizResult<()>;

    /// Update a category
    async fn update_category(&self, category: &QuizCategory) -> QuizResult<()>;

    /// Delete a category; returns whether a row was removed
    async fn delete_category(&self, category_id: &CategoryId) -> QuizResult<bool>;

    /// Delete all categories (import replaces everything)
    async fn delete_all_categories(&self) -> QuizResult<u64>;
}

/// Question repository trait
#[trait_variant::make(QuestionRepository: Send)]
pub trait LocalQuestionRepository {
    /// List questions, optionally filtered by category and difficulty
    async fn list_questions(
        &self,
        category_id: Option<&CategoryId>,
        difficulty: Option<Difficulty>,
    ) -> QuizResult<Vec<QuizQuestion>>;

    /// Find question by ID
    async fn find_question(&self, question_id: &QuestionId) -> QuizResult<Option<QuizQuestion>>;

    /// Create a question
    async fn create_question(&self, question: &QuizQuestion) -> QuizResult<()>;

    /// Update a question
    async fn update_question(&self, question: &QuizQuestion) -> QuizResult<()>;

    /// Delete a question; returns whether a row was removed
    async fn delete_question(&self, question_id: &QuestionId) -> QuizResult<bool>;

    /// Delete every question of a category (cascade on category delete)
    async fn delete_questions_by_category(&self, category_id: &CategoryId) -> QuizResult<u64>;

    /// Delete all questions (import replaces everything)
    async fn delete_all_questions(&self) -> QuizResult<u64>;
}

/// Rewarded-popup config repository trait
#[trait_variant::make(RewardedConfigRepository: Send)]
pub trait LocalRewardedConfigRepository {
    /// List all configs
    async fn list_rewarded_configs(&self) -> QuizResult<Vec<RewardedPopupConfig>>;

    /// Find the config for a scope
    async fn find_rewarded_config(
        &self,
        scope: &ConfigScope,
    ) -> QuizResult<Option<RewardedPopupConfig>>;

    /// Insert or replace the config for its scope (last write wins)
    async fn save_rewarded_config(&self, config: &RewardedPopupConfig) -> QuizResult<()>;
}

/// Script injection repository trait
#[trait_variant::make(ScriptRepository: Send)]
pub trait LocalScriptRepository {
    /// List all scripts
    async fn list_scripts(&self) -> QuizResult<Vec<ScriptInjection>>;

    /// Find script by ID
    async fn find_script(&self, script_id: &ScriptId) -> QuizResult<Option<ScriptInjection>>;

    /// Active scripts for a placement (public view)
    async fn list_active_scripts_by_placement(
        &self,
        placement: &str,
    ) -> QuizResult<Vec<ScriptInjection>>;

    /// Create a script
    async fn create_script(&self, script: &ScriptInjection) -> QuizResult<()>;

    /// Update a script
    async fn update_script(&self, script: &ScriptInjection) -> QuizResult<()>;

    /// Delete a script; returns whether a row was removed
    async fn delete_script(&self, script_id: &ScriptId) -> QuizResult<bool>;
}

/// Ad slot repository trait
#[trait_variant::make(AdSlotRepository: Send)]
pub trait LocalAdSlotRepository {
    /// List all ad slots
    async fn list_ad_slots(&self) -> QuizResult<Vec<AdSlot>>;

    /// Find ad slot by ID
    async fn find_ad_slot(&self, ad_slot_id: &AdSlotId) -> QuizResult<Option<AdSlot>>;

    /// Active ad slots for a placement (public view)
    async fn list_active_ad_slots_by_placement(
        &self,
        placement: &str,
    ) -> QuizResult<Vec<AdSlot>>;

    /// Create an ad slot
    async fn create_ad_slot(&self, ad_slot: &AdSlot) -> QuizResult<()>;

    /// Update an ad slot
    async fn update_ad_slot(&self, ad_slot: &AdSlot) -> QuizResult<()>;

    /// Delete an ad slot; returns whether a row was removed
    async fn delete_ad_slot(&self, ad_slot_id: &AdSlotId) -> QuizResult<bool>;
}

/// Ad analytics repository trait
#[trait_variant::make(AnalyticsRepository: Send)]
pub trait LocalAnalyticsRepository {
    /// Record a write-once event
    async fn insert_event(&self, event: &AdAnalyticsEvent) -> QuizResult<()>;

    /// Most recent events passing the filter, newest first
    async fn list_events(
        &self,
        filter: &AnalyticsFilter,
        limit: i64,
    ) -> QuizResult<Vec<AdAnalyticsEvent>>;

    /// Aggregate counts over the filtered event set
    async fn count_events(&self, filter: &AnalyticsFilter) -> QuizResult<AnalyticsTotals>;
}

/// Site config repository trait
#[trait_variant::make(SiteConfigRepository: Send)]
pub trait LocalSiteConfigRepository {
    /// The singleton config row, if one exists
    async fn find_site_config(&self) -> QuizResult<Option<SiteConfig>>;

    /// Insert or replace the singleton config row
    async fn save_site_config(&self, config: &SiteConfig) -> QuizResult<()>;
}

/// Everything the quiz handlers need from one store handle
pub trait QuizRepository:
    CategoryRepository
    + QuestionRepository
    + RewardedConfigRepository
    + ScriptRepository
    + AdSlotRepository
    + AnalyticsRepository
    + SiteConfigRepository
    + Clone
    + Send
    + Sync
    + 'static
{
}

impl<T> QuizRepository for T where
    T: CategoryRepository
        + QuestionRepository
        + RewardedConfigRepository
        + ScriptRepository
        + AdSlotRepository
        + AnalyticsRepository
        + SiteConfigRepository
        + Clone
        + Send
        + Sync
        + 'static
{
}
