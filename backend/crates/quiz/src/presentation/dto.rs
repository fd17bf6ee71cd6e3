//! API DTOs (Data Transfer Objects)
//!
//! Response DTOs also derive `Deserialize`: the cache stores them as JSON,
//! and the import endpoint accepts the export shape back.

use chrono::{DateTime, Utc};
use kernel::id::{CategoryId, QuestionId};
use serde::{Deserialize, Serialize};

use crate::domain::entity::ad_slot::AdSlot;
use crate::domain::entity::analytics::{AdAnalyticsEvent, AdEventType, AnalyticsTotals};
use crate::domain::entity::category::{QuizCategory, TimerSettings};
use crate::domain::entity::question::{CorrectAnswer, Difficulty, QuestionType, QuizQuestion};
use crate::domain::entity::rewarded_config::{RewardedPopupConfig, RewardedPopupConfigPatch};
use crate::domain::entity::script::ScriptInjection;
use crate::domain::entity::site_config::{SiteConfig, SiteConfigPatch};
use crate::error::{QuizError, QuizResult};

/// Generic message response (deletes, imports)
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

// ============================================================================
// Categories
// ============================================================================

/// Category as exposed over the API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryResponse {
    pub id: String,
    pub name: String,
    pub icon: String,
    pub color: String,
    pub description: String,
    pub subcategories: Vec<String>,
    pub entry_fee: i64,
    pub prize_pool: i64,
    #[serde(flatten)]
    pub timer: TimerSettings,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&QuizCategory> for CategoryResponse {
    fn from(category: &QuizCategory) -> Self {
        Self {
            id: category.category_id.to_string(),
            name: category.name.clone(),
            icon: category.icon.clone(),
            color: category.color.clone(),
            description: category.description.clone(),
            subcategories: category.subcategories.clone(),
            entry_fee: category.entry_fee,
            prize_pool: category.prize_pool,
            timer: category.timer.clone(),
            created_at: category.created_at,
            updated_at: category.updated_at,
        }
    }
}

impl CategoryResponse {
    /// Rebuild the entity, keeping id and timestamps (import path)
    pub fn into_category(self) -> QuizResult<QuizCategory> {
        validate_fees(self.entry_fee, self.prize_pool)?;
        Ok(QuizCategory {
            category_id: CategoryId::from_string(self.id),
            name: self.name,
            icon: self.icon,
            color: self.color,
            description: self.description,
            subcategories: self.subcategories,
            entry_fee: self.entry_fee,
            prize_pool: self.prize_pool,
            timer: self.timer,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

fn validate_fees(entry_fee: i64, prize_pool: i64) -> QuizResult<()> {
    if entry_fee < 0 {
        return Err(QuizError::Validation(
            "entry_fee must be non-negative".to_string(),
        ));
    }
    if prize_pool < 0 {
        return Err(QuizError::Validation(
            "prize_pool must be non-negative".to_string(),
        ));
    }
    Ok(())
}

/// Category creation request
///
/// Timer fields are optional and fall back to the documented defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct CategoryCreateRequest {
    pub name: String,
    pub icon: String,
    pub color: String,
    pub description: String,
    #[serde(default)]
    pub subcategories: Vec<String>,
    pub entry_fee: i64,
    pub prize_pool: i64,
    pub timer_enabled: Option<bool>,
    pub timer_seconds: Option<i32>,
    pub show_timer_warning: Option<bool>,
    pub auto_advance_on_timeout: Option<bool>,
    pub show_correct_answer_on_timeout: Option<bool>,
}

impl CategoryCreateRequest {
    pub fn into_category(self) -> QuizResult<QuizCategory> {
        validate_fees(self.entry_fee, self.prize_pool)?;
        let defaults = TimerSettings::default();
        let now = Utc::now();
        Ok(QuizCategory {
            category_id: CategoryId::new(),
            name: self.name,
            icon: self.icon,
            color: self.color,
            description: self.description,
            subcategories: self.subcategories,
            entry_fee: self.entry_fee,
            prize_pool: self.prize_pool,
            timer: TimerSettings {
                timer_enabled: self.timer_enabled.unwrap_or(defaults.timer_enabled),
                timer_seconds: self.timer_seconds.unwrap_or(defaults.timer_seconds),
                show_timer_warning: self
                    .show_timer_warning
                    .unwrap_or(defaults.show_timer_warning),
                auto_advance_on_timeout: self
                    .auto_advance_on_timeout
                    .unwrap_or(defaults.auto_advance_on_timeout),
                show_correct_answer_on_timeout: self
                    .show_correct_answer_on_timeout
                    .unwrap_or(defaults.show_correct_answer_on_timeout),
            },
            created_at: now,
            updated_at: now,
        })
    }
}

/// Category partial update; only provided fields are applied
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CategoryUpdateRequest {
    pub name: Option<String>,
    pub icon: Option<String>,
    pub color: Option<String>,
    pub description: Option<String>,
    pub subcategories: Option<Vec<String>>,
    pub entry_fee: Option<i64>,
    pub prize_pool: Option<i64>,
    pub timer_enabled: Option<bool>,
    pub timer_seconds: Option<i32>,
    pub show_timer_warning: Option<bool>,
    pub auto_advance_on_timeout: Option<bool>,
    pub show_correct_answer_on_timeout: Option<bool>,
}

impl CategoryUpdateRequest {
    pub fn apply(self, category: &mut QuizCategory) -> QuizResult<()> {
        validate_fees(
            self.entry_fee.unwrap_or(category.entry_fee),
            self.prize_pool.unwrap_or(category.prize_pool),
        )?;

        if let Some(v) = self.name {
            category.name = v;
        }
        if let Some(v) = self.icon {
            category.icon = v;
        }
        if let Some(v) = self.color {
            category.color = v;
        }
        if let Some(v) = self.description {
            category.description = v;
        }
        if let Some(v) = self.subcategories {
            category.subcategories = v;
        }
        if let Some(v) = self.entry_fee {
            category.entry_fee = v;
        }
        if let Some(v) = self.prize_pool {
            category.prize_pool = v;
        }
        if let Some(v) = self.timer_enabled {
            category.timer.timer_enabled = v;
        }
        if let Some(v) = self.timer_seconds {
            category.timer.timer_seconds = v;
        }
        if let Some(v) = self.show_timer_warning {
            category.timer.show_timer_warning = v;
        }
        if let Some(v) = self.auto_advance_on_timeout {
            category.timer.auto_advance_on_timeout = v;
        }
        if let Some(v) = self.show_correct_answer_on_timeout {
            category.timer.show_correct_answer_on_timeout = v;
        }
        category.touch();
        Ok(())
    }
}

/// Timer projection of a category
#[derive(Debug, Clone, Serialize)]
pub struct TimerConfigResponse {
    pub category_id: String,
    pub category_name: String,
    pub timer_enabled: bool,
    pub timer_seconds: i32,
    pub show_timer_warning: bool,
    pub auto_advance_on_timeout: bool,
    pub show_correct_answer_on_timeout: bool,
}

impl From<&QuizCategory> for TimerConfigResponse {
    fn from(category: &QuizCategory) -> Self {
        Self {
            category_id: category.category_id.to_string(),
            category_name: category.name.clone(),
            timer_enabled: category.timer.timer_enabled,
            timer_seconds: category.timer.timer_seconds,
            show_timer_warning: category.timer.show_timer_warning,
            auto_advance_on_timeout: category.timer.auto_advance_on_timeout,
            show_correct_answer_on_timeout: category.timer.show_correct_answer_on_timeout,
        }
    }
}

// ============================================================================
// Questions
// ============================================================================

/// Question as exposed over the API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionResponse {
    pub id: String,
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: CorrectAnswer,
    pub difficulty: Difficulty,
    #[serde(default)]
    pub question_type: QuestionType,
    pub fun_fact: String,
    pub category_id: String,
    pub subcategory: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emoji_clue: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visual_options: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub personality_trait: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prediction_year: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub engagement_score: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&QuizQuestion> for QuestionResponse {
    fn from(question: &QuizQuestion) -> Self {
        Self {
            id: question.question_id.to_string(),
            question: question.question.clone(),
            options: question.options.clone(),
            correct_answer: question.correct_answer,
            difficulty: question.difficulty,
            question_type: question.question_type,
            fun_fact: question.fun_fact.clone(),
            category_id: question.category_id.to_string(),
            subcategory: question.subcategory.clone(),
            emoji_clue: question.emoji_clue.clone(),
            visual_options: question.visual_options.clone(),
            personality_trait: question.personality_trait.clone(),
            prediction_year: question.prediction_year.clone(),
            engagement_score: question.engagement_score,
            created_at: question.created_at,
            updated_at: question.updated_at,
        }
    }
}

fn validate_options(options: &[String], correct_answer: CorrectAnswer) -> QuizResult<()> {
    if options.len() < 2 {
        return Err(QuizError::Validation(
            "A question needs at least 2 options".to_string(),
        ));
    }
    if !correct_answer.is_valid_for(options.len()) {
        return Err(QuizError::Validation(
            "correct_answer must index into options or be -1".to_string(),
        ));
    }
    Ok(())
}

impl QuestionResponse {
    /// Rebuild the entity, keeping id and timestamps (import path)
    pub fn into_question(self) -> QuizResult<QuizQuestion> {
        validate_options(&self.options, self.correct_answer)?;
        Ok(QuizQuestion {
            question_id: QuestionId::from_string(self.id),
            question: self.question,
            options: self.options,
            correct_answer: self.correct_answer,
            difficulty: self.difficulty,
            question_type: self.question_type,
            fun_fact: self.fun_fact,
            category_id: CategoryId::from_string(self.category_id),
            subcategory: self.subcategory,
            emoji_clue: self.emoji_clue,
            visual_options: self.visual_options,
            personality_trait: self.personality_trait,
            prediction_year: self.prediction_year,
            engagement_score: self.engagement_score,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Question creation request
#[derive(Debug, Clone, Deserialize)]
pub struct QuestionCreateRequest {
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: CorrectAnswer,
    pub difficulty: Difficulty,
    #[serde(default)]
    pub question_type: QuestionType,
    pub fun_fact: String,
    pub category_id: String,
    pub subcategory: String,
    pub emoji_clue: Option<String>,
    pub visual_options: Option<Vec<String>>,
    pub personality_trait: Option<String>,
    pub prediction_year: Option<String>,
    pub engagement_score: Option<i32>,
}

impl QuestionCreateRequest {
    pub fn into_question(self) -> QuizResult<QuizQuestion> {
        validate_options(&self.options, self.correct_answer)?;
        let now = Utc::now();
        Ok(QuizQuestion {
            question_id: QuestionId::new(),
            question: self.question,
            options: self.options,
            correct_answer: self.correct_answer,
            difficulty: self.difficulty,
            question_type: self.question_type,
            fun_fact: self.fun_fact,
            category_id: CategoryId::from_string(self.category_id),
            subcategory: self.subcategory,
            emoji_clue: self.emoji_clue,
            visual_options: self.visual_options,
            personality_trait: self.personality_trait,
            prediction_year: self.prediction_year,
            engagement_score: self.engagement_score,
            created_at: now,
            updated_at: now,
        })
    }
}

/// Question partial update; only provided fields are applied
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuestionUpdateRequest {
    pub question: Option<String>,
    pub options: Option<Vec<String>>,
    pub correct_answer: Option<CorrectAnswer>,
    pub difficulty: Option<Difficulty>,
    pub fun_fact: Option<String>,
    pub category_id: Option<String>,
    pub subcategory: Option<String>,
}

impl QuestionUpdateRequest {
    pub fn apply(self, question: &mut QuizQuestion) -> QuizResult<()> {
        // The merged options/answer pair must stay consistent
        let options = self.options.as_deref().unwrap_or(&question.options);
        let correct_answer = self.correct_answer.unwrap_or(question.correct_answer);
        validate_options(options, correct_answer)?;

        if let Some(v) = self.question {
            question.question = v;
        }
        if let Some(v) = self.options {
            question.options = v;
        }
        if let Some(v) = self.correct_answer {
            question.correct_answer = v;
        }
        if let Some(v) = self.difficulty {
            question.difficulty = v;
        }
        if let Some(v) = self.fun_fact {
            question.fun_fact = v;
        }
        if let Some(v) = self.category_id {
            question.category_id = CategoryId::from_string(v);
        }
        if let Some(v) = self.subcategory {
            question.subcategory = v;
        }
        question.touch();
        Ok(())
    }
}

// ============================================================================
// Rewarded config
// ============================================================================

/// Rewarded popup config as exposed over the API
///
/// Both the admin and public views serialize exactly this shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RewardedConfigResponse {
    pub id: String,
    pub category_id: Option<String>,
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

impl From<&RewardedPopupConfig> for RewardedConfigResponse {
    fn from(config: &RewardedPopupConfig) -> Self {
        Self {
            id: config.config_id.to_string(),
            category_id: config.scope.category_id().map(|id| id.to_string()),
            category_name: config.category_name.clone(),
            trigger_after_questions: config.trigger_after_questions,
            coin_reward: config.coin_reward,
            is_active: config.is_active,
            show_on_insufficient_coins: config.show_on_insufficient_coins,
            show_during_quiz: config.show_during_quiz,
            enable_analytics: config.enable_analytics,
            created_at: config.created_at,
            updated_at: config.updated_at,
        }
    }
}

/// Rewarded config partial update
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RewardedConfigUpdateRequest {
    pub category_name: Option<String>,
    pub trigger_after_questions: Option<i32>,
    pub coin_reward: Option<i32>,
    pub is_active: Option<bool>,
    pub show_on_insufficient_coins: Option<bool>,
    pub show_during_quiz: Option<bool>,
    pub enable_analytics: Option<bool>,
}

impl RewardedConfigUpdateRequest {
    pub fn into_patch(self) -> QuizResult<RewardedPopupConfigPatch> {
        if self.trigger_after_questions.is_some_and(|v| v < 1) {
            return Err(QuizError::Validation(
                "trigger_after_questions must be positive".to_string(),
            ));
        }
        if self.coin_reward.is_some_and(|v| v < 0) {
            return Err(QuizError::Validation(
                "coin_reward must be non-negative".to_string(),
            ));
        }

        Ok(RewardedPopupConfigPatch {
            category_name: self.category_name,
            trigger_after_questions: self.trigger_after_questions,
            coin_reward: self.coin_reward,
            is_active: self.is_active,
            show_on_insufficient_coins: self.show_on_insufficient_coins,
            show_during_quiz: self.show_during_quiz,
            enable_analytics: self.enable_analytics,
        })
    }
}

// ============================================================================
// Scripts
// ============================================================================

/// Script injection as exposed over the API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScriptResponse {
    pub id: String,
    pub name: String,
    pub script_code: String,
    pub placement: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&ScriptInjection> for ScriptResponse {
    fn from(script: &ScriptInjection) -> Self {
        Self {
            id: script.script_id.to_string(),
            name: script.name.clone(),
            script_code: script.script_code.clone(),
            placement: script.placement.clone(),
            is_active: script.is_active,
            created_at: script.created_at,
            updated_at: script.updated_at,
        }
    }
}

/// Script creation request
#[derive(Debug, Clone, Deserialize)]
pub struct ScriptCreateRequest {
    pub name: String,
    pub script_code: String,
    pub placement: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

/// Script partial update
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScriptUpdateRequest {
    pub name: Option<String>,
    pub script_code: Option<String>,
    pub placement: Option<String>,
    pub is_active: Option<bool>,
}

impl ScriptUpdateRequest {
    pub fn apply(self, script: &mut ScriptInjection) {
        if let Some(v) = self.name {
            script.name = v;
        }
        if let Some(v) = self.script_code {
            script.script_code = v;
        }
        if let Some(v) = self.placement {
            script.placement = v;
        }
        if let Some(v) = self.is_active {
            script.is_active = v;
        }
        script.touch();
    }
}

fn default_true() -> bool {
    true
}

// ============================================================================
// Ad slots
// ============================================================================

/// Ad slot as exposed over the API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdSlotResponse {
    pub id: String,
    pub name: String,
    pub ad_unit_id: String,
    pub ad_code: String,
    pub placement: String,
    pub ad_type: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&AdSlot> for AdSlotResponse {
    fn from(ad_slot: &AdSlot) -> Self {
        Self {
            id: ad_slot.ad_slot_id.to_string(),
            name: ad_slot.name.clone(),
            ad_unit_id: ad_slot.ad_unit_id.clone(),
            ad_code: ad_slot.ad_code.clone(),
            placement: ad_slot.placement.clone(),
            ad_type: ad_slot.ad_type.clone(),
            is_active: ad_slot.is_active,
            created_at: ad_slot.created_at,
            updated_at: ad_slot.updated_at,
        }
    }
}

/// Ad slot creation request
#[derive(Debug, Clone, Deserialize)]
pub struct AdSlotCreateRequest {
    pub name: String,
    pub ad_unit_id: String,
    pub ad_code: String,
    pub placement: String,
    pub ad_type: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl AdSlotCreateRequest {
    pub fn into_ad_slot(self) -> AdSlot {
        let now = Utc::now();
        AdSlot {
            ad_slot_id: kernel::id::AdSlotId::new(),
            name: self.name,
            ad_unit_id: self.ad_unit_id,
            ad_code: self.ad_code,
            placement: self.placement,
            ad_type: self.ad_type,
            is_active: self.is_active,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Ad slot partial update
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AdSlotUpdateRequest {
    pub name: Option<String>,
    pub ad_unit_id: Option<String>,
    pub ad_code: Option<String>,
    pub placement: Option<String>,
    pub ad_type: Option<String>,
    pub is_active: Option<bool>,
}

impl AdSlotUpdateRequest {
    pub fn apply(self, ad_slot: &mut AdSlot) {
        if let Some(v) = self.name {
            ad_slot.name = v;
        }
        if let Some(v) = self.ad_unit_id {
            ad_slot.ad_unit_id = v;
        }
        if let Some(v) = self.ad_code {
            ad_slot.ad_code = v;
        }
        if let Some(v) = self.placement {
            ad_slot.placement = v;
        }
        if let Some(v) = self.ad_type {
            ad_slot.ad_type = v;
        }
        if let Some(v) = self.is_active {
            ad_slot.is_active = v;
        }
        ad_slot.touch();
    }
}

// ============================================================================
// Analytics
// ============================================================================

/// Player-reported ad event
#[derive(Debug, Clone, Deserialize)]
pub struct AnalyticsEventRequest {
    pub event_type: AdEventType,
    pub placement: String,
    pub source: Option<String>,
    pub category_id: Option<String>,
    pub session_id: Option<String>,
    pub metadata: Option<serde_json::Value>,
}

/// Acknowledgement for a recorded event
#[derive(Debug, Clone, Serialize)]
pub struct AnalyticsEventAck {
    pub status: String,
    pub id: String,
}

/// Stored event as exposed to the admin view
#[derive(Debug, Clone, Serialize)]
pub struct AnalyticsEventResponse {
    pub id: String,
    pub event_type: AdEventType,
    pub placement: String,
    pub source: Option<String>,
    pub category_id: Option<String>,
    pub session_id: Option<String>,
    pub metadata: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}

impl From<&AdAnalyticsEvent> for AnalyticsEventResponse {
    fn from(event: &AdAnalyticsEvent) -> Self {
        Self {
            id: event.event_id.to_string(),
            event_type: event.event_type,
            placement: event.placement.clone(),
            source: event.source.clone(),
            category_id: event.category_id.as_ref().map(|id| id.to_string()),
            session_id: event.session_id.clone(),
            metadata: event.metadata.clone(),
            created_at: event.created_at,
        }
    }
}

/// Query parameters of the admin analytics views
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnalyticsQuery {
    pub from_ts: Option<String>,
    pub to_ts: Option<String>,
    pub placement: Option<String>,
    pub category_id: Option<String>,
    pub limit: Option<i64>,
}

/// Echo of the applied filters
#[derive(Debug, Clone, Serialize)]
pub struct AnalyticsFilterEcho {
    pub from_ts: Option<String>,
    pub to_ts: Option<String>,
    pub placement: Option<String>,
    pub category_id: Option<String>,
}

/// Admin analytics summary
#[derive(Debug, Clone, Serialize)]
pub struct AnalyticsSummaryResponse {
    pub total_events: i64,
    pub starts: i64,
    pub completes: i64,
    pub errors: i64,
    pub conversion_rate: f64,
    pub recent: Vec<AnalyticsEventResponse>,
    pub filters: AnalyticsFilterEcho,
}

impl AnalyticsSummaryResponse {
    pub fn new(
        totals: AnalyticsTotals,
        recent: Vec<AnalyticsEventResponse>,
        filters: AnalyticsFilterEcho,
    ) -> Self {
        Self {
            total_events: totals.total_events,
            starts: totals.starts,
            completes: totals.completes,
            errors: totals.errors,
            conversion_rate: totals.conversion_rate(),
            recent,
            filters,
        }
    }
}

// ============================================================================
// Export / Import
// ============================================================================

/// Full quiz-data export
#[derive(Debug, Clone, Serialize)]
pub struct QuizDataExportResponse {
    pub categories: Vec<CategoryResponse>,
    pub questions: Vec<QuestionResponse>,
    pub export_date: DateTime<Utc>,
}

/// Import payload: the export shape fed back in
#[derive(Debug, Clone, Deserialize)]
pub struct QuizDataImportRequest {
    pub categories: Vec<CategoryResponse>,
    pub questions: Vec<QuestionResponse>,
    /// Present in exports; ignored on import
    #[serde(default)]
    pub export_date: Option<DateTime<Utc>>,
}

// ============================================================================
// Site config
// ============================================================================

/// Site config as exposed over the API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfigResponse {
    pub id: String,
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

impl From<&SiteConfig> for SiteConfigResponse {
    fn from(config: &SiteConfig) -> Self {
        Self {
            id: config.site_config_id.to_string(),
            google_analytics_id: config.google_analytics_id.clone(),
            google_search_console_id: config.google_search_console_id.clone(),
            facebook_pixel_id: config.facebook_pixel_id.clone(),
            google_tag_manager_id: config.google_tag_manager_id.clone(),
            twitter_pixel_id: config.twitter_pixel_id.clone(),
            linkedin_pixel_id: config.linkedin_pixel_id.clone(),
            tiktok_pixel_id: config.tiktok_pixel_id.clone(),
            snapchat_pixel_id: config.snapchat_pixel_id.clone(),
            ads_txt_content: config.ads_txt_content.clone(),
            robots_txt_content: config.robots_txt_content.clone(),
            created_at: config.created_at,
            updated_at: config.updated_at,
        }
    }
}

/// Site config partial update
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SiteConfigUpdateRequest {
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

impl SiteConfigUpdateRequest {
    pub fn into_patch(self) -> SiteConfigPatch {
        SiteConfigPatch {
            google_analytics_id: self.google_analytics_id,
            google_search_console_id: self.google_search_console_id,
            facebook_pixel_id: self.facebook_pixel_id,
            google_tag_manager_id: self.google_tag_manager_id,
            twitter_pixel_id: self.twitter_pixel_id,
            linkedin_pixel_id: self.linkedin_pixel_id,
            tiktok_pixel_id: self.tiktok_pixel_id,
            snapchat_pixel_id: self.snapchat_pixel_id,
            ads_txt_content: self.ads_txt_content,
            robots_txt_content: self.robots_txt_content,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_create_rejects_negative_fees() {
        let req = CategoryCreateRequest {
            name: "Tech".to_string(),
            icon: "💻".to_string(),
            color: "#336699".to_string(),
            description: "Technology".to_string(),
            subcategories: vec![],
            entry_fee: -1,
            prize_pool: 0,
            timer_enabled: None,
            timer_seconds: None,
            show_timer_warning: None,
            auto_advance_on_timeout: None,
            show_correct_answer_on_timeout: None,
        };
        assert!(matches!(req.into_category(), Err(QuizError::Validation(_))));
    }

    #[test]
    fn test_category_create_defaults_timer() {
        let req = CategoryCreateRequest {
            name: "Tech".to_string(),
            icon: "💻".to_string(),
            color: "#336699".to_string(),
            description: "Technology".to_string(),
            subcategories: vec![],
            entry_fee: 100,
            prize_pool: 500,
            timer_enabled: None,
            timer_seconds: None,
            show_timer_warning: None,
            auto_advance_on_timeout: None,
            show_correct_answer_on_timeout: None,
        };
        let category = req.into_category().unwrap();
        assert!(category.timer.timer_enabled);
        assert_eq!(category.timer.timer_seconds, 30);
    }

    #[test]
    fn test_question_create_requires_two_options() {
        let req = QuestionCreateRequest {
            question: "Only one option?".to_string(),
            options: vec!["yes".to_string()],
            correct_answer: CorrectAnswer::Graded { index: 0 },
            difficulty: Difficulty::Beginner,
            question_type: QuestionType::MultipleChoice,
            fun_fact: String::new(),
            category_id: "cat-1".to_string(),
            subcategory: "general".to_string(),
            emoji_clue: None,
            visual_options: None,
            personality_trait: None,
            prediction_year: None,
            engagement_score: None,
        };
        assert!(matches!(req.into_question(), Err(QuizError::Validation(_))));
    }

    #[test]
    fn test_question_create_rejects_out_of_range_answer() {
        let req = QuestionCreateRequest {
            question: "Pick".to_string(),
            options: vec!["a".to_string(), "b".to_string()],
            correct_answer: CorrectAnswer::Graded { index: 2 },
            difficulty: Difficulty::Beginner,
            question_type: QuestionType::MultipleChoice,
            fun_fact: String::new(),
            category_id: "cat-1".to_string(),
            subcategory: "general".to_string(),
            emoji_clue: None,
            visual_options: None,
            personality_trait: None,
            prediction_year: None,
            engagement_score: None,
        };
        assert!(matches!(req.into_question(), Err(QuizError::Validation(_))));
    }

    #[test]
    fn test_question_update_revalidates_merged_state() {
        let mut question = QuestionCreateRequest {
            question: "Pick".to_string(),
            options: vec!["a".to_string(), "b".to_string(), "c".to_string()],
            correct_answer: CorrectAnswer::Graded { index: 2 },
            difficulty: Difficulty::Beginner,
            question_type: QuestionType::MultipleChoice,
            fun_fact: String::new(),
            category_id: "cat-1".to_string(),
            subcategory: "general".to_string(),
            emoji_clue: None,
            visual_options: None,
            personality_trait: None,
            prediction_year: None,
            engagement_score: None,
        }
        .into_question()
        .unwrap();

        // Shrinking options below the current answer index must fail
        let update = QuestionUpdateRequest {
            options: Some(vec!["a".to_string(), "b".to_string()]),
            ..Default::default()
        };
        assert!(update.apply(&mut question).is_err());

        // Shrinking options and moving the answer together is fine
        let update = QuestionUpdateRequest {
            options: Some(vec!["a".to_string(), "b".to_string()]),
            correct_answer: Some(CorrectAnswer::Graded { index: 0 }),
            ..Default::default()
        };
        assert!(update.apply(&mut question).is_ok());
    }

    #[test]
    fn test_ungraded_answer_serializes_as_sentinel() {
        let req = QuestionCreateRequest {
            question: "Which vibe?".to_string(),
            options: vec!["calm".to_string(), "bold".to_string()],
            correct_answer: CorrectAnswer::Ungraded,
            difficulty: Difficulty::Beginner,
            question_type: QuestionType::Personality,
            fun_fact: String::new(),
            category_id: "cat-1".to_string(),
            subcategory: "mood".to_string(),
            emoji_clue: None,
            visual_options: None,
            personality_trait: Some("openness".to_string()),
            prediction_year: None,
            engagement_score: None,
        };
        let question = req.into_question().unwrap();
        let response = QuestionResponse::from(&question);
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["correct_answer"], serde_json::json!(-1));
    }
}
