//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use kernel::id::{
    AdSlotId, AnalyticsEventId, CategoryId, QuestionId, RewardedConfigId, ScriptId, SiteConfigId,
};
use sqlx::PgPool;

use crate::domain::entity::ad_slot::AdSlot;
use crate::domain::entity::analytics::{
    AdAnalyticsEvent, AdEventType, AnalyticsFilter, AnalyticsTotals,
};
use crate::domain::entity::category::{QuizCategory, TimerSettings};
use crate::domain::entity::question::{CorrectAnswer, Difficulty, QuestionType, QuizQuestion};
use crate::domain::entity::rewarded_config::{ConfigScope, RewardedPopupConfig};
use crate::domain::entity::script::ScriptInjection;
use crate::domain::entity::site_config::SiteConfig;
use crate::domain::repository::{
    AdSlotRepository, AnalyticsRepository, CategoryRepository, QuestionRepository,
    RewardedConfigRepository, ScriptRepository, SiteConfigRepository,
};
use crate::error::{QuizError, QuizResult};

/// PostgreSQL-backed quiz repository
///
/// One handle implements every quiz repository trait, mirroring the
/// one-collection-per-entity persisted layout.
#[derive(Clone)]
pub struct PgQuizRepository {
    pool: PgPool,
}

impl PgQuizRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn parse_stored<T: std::str::FromStr<Err = String>>(value: &str) -> QuizResult<T> {
    value
        .parse()
        .map_err(|e: String| QuizError::Internal(format!("Stored value unreadable: {e}")))
}

// ============================================================================
// Categories
// ============================================================================

#[derive(sqlx::FromRow)]
struct CategoryRow {
    id: String,
    name: String,
    icon: String,
    color: String,
    description: String,
    subcategories: Vec<String>,
    entry_fee: i64,
    prize_pool: i64,
    timer_enabled: bool,
    timer_seconds: i32,
    show_timer_warning: bool,
    auto_advance_on_timeout: bool,
    show_correct_answer_on_timeout: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl CategoryRow {
    fn into_category(self) -> QuizCategory {
        QuizCategory {
            category_id: CategoryId::from_string(self.id),
            name: self.name,
            icon: self.icon,
            color: self.color,
            description: self.description,
            subcategories: self.subcategories,
            entry_fee: self.entry_fee,
            prize_pool: self.prize_pool,
            timer: TimerSettings {
                timer_enabled: self.timer_enabled,
                timer_seconds: self.timer_seconds,
                show_timer_warning: self.show_timer_warning,
                auto_advance_on_timeout: self.auto_advance_on_timeout,
                show_correct_answer_on_timeout: self.show_correct_answer_on_timeout,
            },
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

const CATEGORY_COLUMNS: &str = r#"
    SELECT
        id,
        name,
        icon,
        color,
        description,
        subcategories,
        entry_fee,
        prize_pool,
        timer_enabled,
        timer_seconds,
        show_timer_warning,
        auto_advance_on_timeout,
        show_correct_answer_on_timeout,
        created_at,
        updated_at
    FROM quiz_categories
"#;

impl CategoryRepository for PgQuizRepository {
    async fn list_categories(&self) -> QuizResult<Vec<QuizCategory>> {
        let rows =
            sqlx::query_as::<_, CategoryRow>(&format!("{CATEGORY_COLUMNS} ORDER BY created_at"))
                .fetch_all(&self.pool)
                .await?;

        Ok(rows.into_iter().map(CategoryRow::into_category).collect())
    }

    async fn find_category(&self, category_id: &CategoryId) -> QuizResult<Option<QuizCategory>> {
        let row = sqlx::query_as::<_, CategoryRow>(&format!("{CATEGORY_COLUMNS} WHERE id = $1"))
            .bind(category_id.as_str())
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(CategoryRow::into_category))
    }

    async fn create_category(&self, category: &QuizCategory) -> QuizResult<()> {
        sqlx::query(
            r#"
            INSERT INTO quiz_categories (
                id, name, icon, color, description, subcategories,
                entry_fee, prize_pool,
                timer_enabled, timer_seconds, show_timer_warning,
                auto_advance_on_timeout, show_correct_answer_on_timeout,
                created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            "#,
        )
        .bind(category.category_id.as_str())
        .bind(&category.name)
        .bind(&category.icon)
        .bind(&category.color)
        .bind(&category.description)
        .bind(&category.subcategories)
        .bind(category.entry_fee)
        .bind(category.prize_pool)
        .bind(category.timer.timer_enabled)
        .bind(category.timer.timer_seconds)
        .bind(category.timer.show_timer_warning)
        .bind(category.timer.auto_advance_on_timeout)
        .bind(category.timer.show_correct_answer_on_timeout)
        .bind(category.created_at)
        .bind(category.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn update_category(&self, category: &QuizCategory) -> QuizResult<()> {
        sqlx::query(
            r#"
            UPDATE quiz_categories SET
                name = $2,
                icon = $3,
                color = $4,
                description = $5,
                subcategories = $6,
                entry_fee = $7,
                prize_pool = $8,
                timer_enabled = $9,
                timer_seconds = $10,
                show_timer_warning = $11,
                auto_advance_on_timeout = $12,
                show_correct_answer_on_timeout = $13,
                updated_at = $14
            WHERE id = $1
            "#,
        )
        .bind(category.category_id.as_str())
        .bind(&category.name)
        .bind(&category.icon)
        .bind(&category.color)
        .bind(&category.description)
        .bind(&category.subcategories)
        .bind(category.entry_fee)
        .bind(category.prize_pool)
        .bind(category.timer.timer_enabled)
        .bind(category.timer.timer_seconds)
        .bind(category.timer.show_timer_warning)
        .bind(category.timer.auto_advance_on_timeout)
        .bind(category.timer.show_correct_answer_on_timeout)
        .bind(category.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete_category(&self, category_id: &CategoryId) -> QuizResult<bool> {
        let deleted = sqlx::query("DELETE FROM quiz_categories WHERE id = $1")
            .bind(category_id.as_str())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted > 0)
    }

    async fn delete_all_categories(&self) -> QuizResult<u64> {
        let deleted = sqlx::query("DELETE FROM quiz_categories")
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted)
    }
}

// ============================================================================
// Questions
// ============================================================================

#[derive(sqlx::FromRow)]
struct QuestionRow {
    id: String,
    question: String,
    options: Vec<String>,
    correct_answer: i32,
    difficulty: String,
    question_type: String,
    fun_fact: String,
    category_id: String,
    subcategory: String,
    emoji_clue: Option<String>,
    visual_options: Option<Vec<String>>,
    personality_trait: Option<String>,
    prediction_year: Option<String>,
    engagement_score: Option<i32>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl QuestionRow {
    fn into_question(self) -> QuizResult<QuizQuestion> {
        Ok(QuizQuestion {
            question_id: QuestionId::from_string(self.id),
            question: self.question,
            options: self.options,
            correct_answer: CorrectAnswer::from_db(self.correct_answer)
                .map_err(QuizError::Internal)?,
            difficulty: parse_stored::<Difficulty>(&self.difficulty)?,
            question_type: parse_stored::<QuestionType>(&self.question_type)?,
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

const QUESTION_COLUMNS: &str = r#"
    SELECT
        id,
        question,
        options,
        correct_answer,
        difficulty,
        question_type,
        fun_fact,
        category_id,
        subcategory,
        emoji_clue,
        visual_options,
        personality_trait,
        prediction_year,
        engagement_score,
        created_at,
        updated_at
    FROM quiz_questions
"#;

impl QuestionRepository for PgQuizRepository {
    async fn list_questions(
        &self,
        category_id: Option<&CategoryId>,
        difficulty: Option<Difficulty>,
    ) -> QuizResult<Vec<QuizQuestion>> {
        let rows = sqlx::query_as::<_, QuestionRow>(&format!(
            r#"
            {QUESTION_COLUMNS}
            WHERE ($1::text IS NULL OR category_id = $1)
              AND ($2::text IS NULL OR difficulty = $2)
            ORDER BY created_at
            "#
        ))
        .bind(category_id.map(|id| id.as_str()))
        .bind(difficulty.map(|d| d.as_str()))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(QuestionRow::into_question).collect()
    }

    async fn find_question(&self, question_id: &QuestionId) -> QuizResult<Option<QuizQuestion>> {
        let row = sqlx::query_as::<_, QuestionRow>(&format!("{QUESTION_COLUMNS} WHERE id = $1"))
            .bind(question_id.as_str())
            .fetch_optional(&self.pool)
            .await?;

        row.map(QuestionRow::into_question).transpose()
    }

    async fn create_question(&self, question: &QuizQuestion) -> QuizResult<()> {
        sqlx::query(
            r#"
            INSERT INTO quiz_questions (
                id, question, options, correct_answer, difficulty, question_type,
                fun_fact, category_id, subcategory,
                emoji_clue, visual_options, personality_trait, prediction_year,
                engagement_score, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
            "#,
        )
        .bind(question.question_id.as_str())
        .bind(&question.question)
        .bind(&question.options)
        .bind(question.correct_answer.to_db())
        .bind(question.difficulty.as_str())
        .bind(question.question_type.as_str())
        .bind(&question.fun_fact)
        .bind(question.category_id.as_str())
        .bind(&question.subcategory)
        .bind(&question.emoji_clue)
        .bind(&question.visual_options)
        .bind(&question.personality_trait)
        .bind(&question.prediction_year)
        .bind(question.engagement_score)
        .bind(question.created_at)
        .bind(question.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn update_question(&self, question: &QuizQuestion) -> QuizResult<()> {
        sqlx::query(
            r#"
            UPDATE quiz_questions SET
                question = $2,
                options = $3,
                correct_answer = $4,
                difficulty = $5,
                question_type = $6,
                fun_fact = $7,
                category_id = $8,
                subcategory = $9,
                emoji_clue = $10,
                visual_options = $11,
                personality_trait = $12,
                prediction_year = $13,
                engagement_score = $14,
                updated_at = $15
            WHERE id = $1
            "#,
        )
        .bind(question.question_id.as_str())
        .bind(&question.question)
        .bind(&question.options)
        .bind(question.correct_answer.to_db())
        .bind(question.difficulty.as_str())
        .bind(question.question_type.as_str())
        .bind(&question.fun_fact)
        .bind(question.category_id.as_str())
        .bind(&question.subcategory)
        .bind(&question.emoji_clue)
        .bind(&question.visual_options)
        .bind(&question.personality_trait)
        .bind(&question.prediction_year)
        .bind(question.engagement_score)
        .bind(question.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete_question(&self, question_id: &QuestionId) -> QuizResult<bool> {
        let deleted = sqlx::query("DELETE FROM quiz_questions WHERE id = $1")
            .bind(question_id.as_str())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted > 0)
    }

    async fn delete_questions_by_category(&self, category_id: &CategoryId) -> QuizResult<u64> {
        let deleted = sqlx::query("DELETE FROM quiz_questions WHERE category_id = $1")
            .bind(category_id.as_str())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted)
    }

    async fn delete_all_questions(&self) -> QuizResult<u64> {
        let deleted = sqlx::query("DELETE FROM quiz_questions")
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted)
    }
}

// ============================================================================
// Rewarded configs
// ============================================================================

#[derive(sqlx::FromRow)]
struct RewardedRow {
    id: String,
    category_id: Option<String>,
    category_name: String,
    trigger_after_questions: i32,
    coin_reward: i32,
    is_active: bool,
    show_on_insufficient_coins: bool,
    show_during_quiz: bool,
    enable_analytics: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl RewardedRow {
    fn into_config(self) -> RewardedPopupConfig {
        RewardedPopupConfig {
            config_id: RewardedConfigId::from_string(self.id),
            scope: ConfigScope::from_db(self.category_id),
            category_name: self.category_name,
            trigger_after_questions: self.trigger_after_questions,
            coin_reward: self.coin_reward,
            is_active: self.is_active,
            show_on_insufficient_coins: self.show_on_insufficient_coins,
            show_during_quiz: self.show_during_quiz,
            enable_analytics: self.enable_analytics,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

const REWARDED_COLUMNS: &str = r#"
    SELECT
        id,
        category_id,
        category_name,
        trigger_after_questions,
        coin_reward,
        is_active,
        show_on_insufficient_coins,
        show_during_quiz,
        enable_analytics,
        created_at,
        updated_at
    FROM rewarded_popup_configs
"#;

impl RewardedConfigRepository for PgQuizRepository {
    async fn list_rewarded_configs(&self) -> QuizResult<Vec<RewardedPopupConfig>> {
        let rows =
            sqlx::query_as::<_, RewardedRow>(&format!("{REWARDED_COLUMNS} ORDER BY created_at"))
                .fetch_all(&self.pool)
                .await?;

        Ok(rows.into_iter().map(RewardedRow::into_config).collect())
    }

    async fn find_rewarded_config(
        &self,
        scope: &ConfigScope,
    ) -> QuizResult<Option<RewardedPopupConfig>> {
        let row = sqlx::query_as::<_, RewardedRow>(&format!(
            "{REWARDED_COLUMNS} WHERE category_id IS NOT DISTINCT FROM $1"
        ))
        .bind(scope.as_db())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(RewardedRow::into_config))
    }

    async fn save_rewarded_config(&self, config: &RewardedPopupConfig) -> QuizResult<()> {
        // One row per scope; concurrent writers resolve to last-write-wins
        sqlx::query(
            r#"
            INSERT INTO rewarded_popup_configs (
                id, category_id, category_name,
                trigger_after_questions, coin_reward, is_active,
                show_on_insufficient_coins, show_during_quiz, enable_analytics,
                created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            ON CONFLICT (category_id) DO UPDATE SET
                category_name = EXCLUDED.category_name,
                trigger_after_questions = EXCLUDED.trigger_after_questions,
                coin_reward = EXCLUDED.coin_reward,
                is_active = EXCLUDED.is_active,
                show_on_insufficient_coins = EXCLUDED.show_on_insufficient_coins,
                show_during_quiz = EXCLUDED.show_during_quiz,
                enable_analytics = EXCLUDED.enable_analytics,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(config.config_id.as_str())
        .bind(config.scope.as_db())
        .bind(&config.category_name)
        .bind(config.trigger_after_questions)
        .bind(config.coin_reward)
        .bind(config.is_active)
        .bind(config.show_on_insufficient_coins)
        .bind(config.show_during_quiz)
        .bind(config.enable_analytics)
        .bind(config.created_at)
        .bind(config.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

// ============================================================================
// Scripts
// ============================================================================

#[derive(sqlx::FromRow)]
struct ScriptRow {
    id: String,
    name: String,
    script_code: String,
    placement: String,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ScriptRow {
    fn into_script(self) -> ScriptInjection {
        ScriptInjection {
            script_id: ScriptId::from_string(self.id),
            name: self.name,
            script_code: self.script_code,
            placement: self.placement,
            is_active: self.is_active,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

const SCRIPT_COLUMNS: &str = r#"
    SELECT id, name, script_code, placement, is_active, created_at, updated_at
    FROM script_injections
"#;

impl ScriptRepository for PgQuizRepository {
    async fn list_scripts(&self) -> QuizResult<Vec<ScriptInjection>> {
        let rows =
            sqlx::query_as::<_, ScriptRow>(&format!("{SCRIPT_COLUMNS} ORDER BY created_at"))
                .fetch_all(&self.pool)
                .await?;

        Ok(rows.into_iter().map(ScriptRow::into_script).collect())
    }

    async fn find_script(&self, script_id: &ScriptId) -> QuizResult<Option<ScriptInjection>> {
        let row = sqlx::query_as::<_, ScriptRow>(&format!("{SCRIPT_COLUMNS} WHERE id = $1"))
            .bind(script_id.as_str())
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(ScriptRow::into_script))
    }

    async fn list_active_scripts_by_placement(
        &self,
        placement: &str,
    ) -> QuizResult<Vec<ScriptInjection>> {
        let rows = sqlx::query_as::<_, ScriptRow>(&format!(
            "{SCRIPT_COLUMNS} WHERE placement = $1 AND is_active ORDER BY created_at"
        ))
        .bind(placement)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(ScriptRow::into_script).collect())
    }

    async fn create_script(&self, script: &ScriptInjection) -> QuizResult<()> {
        sqlx::query(
            r#"
            INSERT INTO script_injections (
                id, name, script_code, placement, is_active, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(script.script_id.as_str())
        .bind(&script.name)
        .bind(&script.script_code)
        .bind(&script.placement)
        .bind(script.is_active)
        .bind(script.created_at)
        .bind(script.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn update_script(&self, script: &ScriptInjection) -> QuizResult<()> {
        sqlx::query(
            r#"
            UPDATE script_injections SET
                name = $2,
                script_code = $3,
                placement = $4,
                is_active = $5,
                updated_at = $6
            WHERE id = $1
            "#,
        )
        .bind(script.script_id.as_str())
        .bind(&script.name)
        .bind(&script.script_code)
        .bind(&script.placement)
        .bind(script.is_active)
        .bind(script.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete_script(&self, script_id: &ScriptId) -> QuizResult<bool> {
        let deleted = sqlx::query("DELETE FROM script_injections WHERE id = $1")
            .bind(script_id.as_str())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted > 0)
    }
}

// ============================================================================
// Ad slots
// ============================================================================

#[derive(sqlx::FromRow)]
struct AdSlotRow {
    id: String,
    name: String,
    ad_unit_id: String,
    ad_code: String,
    placement: String,
    ad_type: String,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl AdSlotRow {
    fn into_ad_slot(self) -> AdSlot {
        AdSlot {
            ad_slot_id: AdSlotId::from_string(self.id),
            name: self.name,
            ad_unit_id: self.ad_unit_id,
            ad_code: self.ad_code,
            placement: self.placement,
            ad_type: self.ad_type,
            is_active: self.is_active,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

const AD_SLOT_COLUMNS: &str = r#"
    SELECT id, name, ad_unit_id, ad_code, placement, ad_type, is_active,
           created_at, updated_at
    FROM ad_slots
"#;

impl AdSlotRepository for PgQuizRepository {
    async fn list_ad_slots(&self) -> QuizResult<Vec<AdSlot>> {
        let rows =
            sqlx::query_as::<_, AdSlotRow>(&format!("{AD_SLOT_COLUMNS} ORDER BY created_at"))
                .fetch_all(&self.pool)
                .await?;

        Ok(rows.into_iter().map(AdSlotRow::into_ad_slot).collect())
    }

    async fn find_ad_slot(&self, ad_slot_id: &AdSlotId) -> QuizResult<Option<AdSlot>> {
        let row = sqlx::query_as::<_, AdSlotRow>(&format!("{AD_SLOT_COLUMNS} WHERE id = $1"))
            .bind(ad_slot_id.as_str())
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(AdSlotRow::into_ad_slot))
    }

    async fn list_active_ad_slots_by_placement(
        &self,
        placement: &str,
    ) -> QuizResult<Vec<AdSlot>> {
        let rows = sqlx::query_as::<_, AdSlotRow>(&format!(
            "{AD_SLOT_COLUMNS} WHERE placement = $1 AND is_active ORDER BY created_at"
        ))
        .bind(placement)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(AdSlotRow::into_ad_slot).collect())
    }

    async fn create_ad_slot(&self, ad_slot: &AdSlot) -> QuizResult<()> {
        sqlx::query(
            r#"
            INSERT INTO ad_slots (
                id, name, ad_unit_id, ad_code, placement, ad_type, is_active,
                created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(ad_slot.ad_slot_id.as_str())
        .bind(&ad_slot.name)
        .bind(&ad_slot.ad_unit_id)
        .bind(&ad_slot.ad_code)
        .bind(&ad_slot.placement)
        .bind(&ad_slot.ad_type)
        .bind(ad_slot.is_active)
        .bind(ad_slot.created_at)
        .bind(ad_slot.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn update_ad_slot(&self, ad_slot: &AdSlot) -> QuizResult<()> {
        sqlx::query(
            r#"
            UPDATE ad_slots SET
                name = $2,
                ad_unit_id = $3,
                ad_code = $4,
                placement = $5,
                ad_type = $6,
                is_active = $7,
                updated_at = $8
            WHERE id = $1
            "#,
        )
        .bind(ad_slot.ad_slot_id.as_str())
        .bind(&ad_slot.name)
        .bind(&ad_slot.ad_unit_id)
        .bind(&ad_slot.ad_code)
        .bind(&ad_slot.placement)
        .bind(&ad_slot.ad_type)
        .bind(ad_slot.is_active)
        .bind(ad_slot.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete_ad_slot(&self, ad_slot_id: &AdSlotId) -> QuizResult<bool> {
        let deleted = sqlx::query("DELETE FROM ad_slots WHERE id = $1")
            .bind(ad_slot_id.as_str())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted > 0)
    }
}

// ============================================================================
// Analytics
// ============================================================================

#[derive(sqlx::FromRow)]
struct EventRow {
    id: String,
    event_type: String,
    placement: String,
    source: Option<String>,
    category_id: Option<String>,
    session_id: Option<String>,
    metadata: Option<serde_json::Value>,
    created_at: DateTime<Utc>,
}

impl EventRow {
    fn into_event(self) -> QuizResult<AdAnalyticsEvent> {
        Ok(AdAnalyticsEvent {
            event_id: AnalyticsEventId::from_string(self.id),
            event_type: parse_stored::<AdEventType>(&self.event_type)?,
            placement: self.placement,
            source: self.source,
            category_id: self.category_id.map(CategoryId::from_string),
            session_id: self.session_id,
            metadata: self.metadata,
            created_at: self.created_at,
        })
    }
}

const EVENT_FILTER: &str = r#"
    WHERE ($1::timestamptz IS NULL OR created_at >= $1)
      AND ($2::timestamptz IS NULL OR created_at <= $2)
      AND ($3::text IS NULL OR placement = $3)
      AND ($4::text IS NULL OR category_id = $4)
"#;

impl AnalyticsRepository for PgQuizRepository {
    async fn insert_event(&self, event: &AdAnalyticsEvent) -> QuizResult<()> {
        sqlx::query(
            r#"
            INSERT INTO ad_analytics_events (
                id, event_type, placement, source, category_id, session_id,
                metadata, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(event.event_id.as_str())
        .bind(event.event_type.as_str())
        .bind(&event.placement)
        .bind(&event.source)
        .bind(event.category_id.as_ref().map(|id| id.as_str()))
        .bind(&event.session_id)
        .bind(&event.metadata)
        .bind(event.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn list_events(
        &self,
        filter: &AnalyticsFilter,
        limit: i64,
    ) -> QuizResult<Vec<AdAnalyticsEvent>> {
        let rows = sqlx::query_as::<_, EventRow>(&format!(
            r#"
            SELECT id, event_type, placement, source, category_id, session_id,
                   metadata, created_at
            FROM ad_analytics_events
            {EVENT_FILTER}
            ORDER BY created_at DESC
            LIMIT $5
            "#
        ))
        .bind(filter.from_ts)
        .bind(filter.to_ts)
        .bind(&filter.placement)
        .bind(&filter.category_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(EventRow::into_event).collect()
    }

    async fn count_events(&self, filter: &AnalyticsFilter) -> QuizResult<AnalyticsTotals> {
        let (total, starts, completes, errors) =
            sqlx::query_as::<_, (i64, i64, i64, i64)>(&format!(
                r#"
                SELECT
                    COUNT(*),
                    COUNT(*) FILTER (WHERE event_type = 'start'),
                    COUNT(*) FILTER (WHERE event_type = 'complete'),
                    COUNT(*) FILTER (WHERE event_type = 'error')
                FROM ad_analytics_events
                {EVENT_FILTER}
                "#
            ))
            .bind(filter.from_ts)
            .bind(filter.to_ts)
            .bind(&filter.placement)
            .bind(&filter.category_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(AnalyticsTotals {
            total_events: total,
            starts,
            completes,
            errors,
        })
    }
}

// ============================================================================
// Site config
// ============================================================================

#[derive(sqlx::FromRow)]
struct SiteConfigRow {
    id: String,
    google_analytics_id: Option<String>,
    google_search_console_id: Option<String>,
    facebook_pixel_id: Option<String>,
    google_tag_manager_id: Option<String>,
    twitter_pixel_id: Option<String>,
    linkedin_pixel_id: Option<String>,
    tiktok_pixel_id: Option<String>,
    snapchat_pixel_id: Option<String>,
    ads_txt_content: Option<String>,
    robots_txt_content: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl SiteConfigRow {
    fn into_config(self) -> SiteConfig {
        SiteConfig {
            site_config_id: SiteConfigId::from_string(self.id),
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
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

impl SiteConfigRepository for PgQuizRepository {
    async fn find_site_config(&self) -> QuizResult<Option<SiteConfig>> {
        let row = sqlx::query_as::<_, SiteConfigRow>(
            r#"
            SELECT id, google_analytics_id, google_search_console_id,
                   facebook_pixel_id, google_tag_manager_id, twitter_pixel_id,
                   linkedin_pixel_id, tiktok_pixel_id, snapchat_pixel_id,
                   ads_txt_content, robots_txt_content, created_at, updated_at
            FROM site_configs
            ORDER BY created_at
            LIMIT 1
            "#,
        )
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(SiteConfigRow::into_config))
    }

    async fn save_site_config(&self, config: &SiteConfig) -> QuizResult<()> {
        sqlx::query(
            r#"
            INSERT INTO site_configs (
                id, google_analytics_id, google_search_console_id,
                facebook_pixel_id, google_tag_manager_id, twitter_pixel_id,
                linkedin_pixel_id, tiktok_pixel_id, snapchat_pixel_id,
                ads_txt_content, robots_txt_content, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            ON CONFLICT (id) DO UPDATE SET
                google_analytics_id = EXCLUDED.google_analytics_id,
                google_search_console_id = EXCLUDED.google_search_console_id,
                facebook_pixel_id = EXCLUDED.facebook_pixel_id,
                google_tag_manager_id = EXCLUDED.google_tag_manager_id,
                twitter_pixel_id = EXCLUDED.twitter_pixel_id,
                linkedin_pixel_id = EXCLUDED.linkedin_pixel_id,
                tiktok_pixel_id = EXCLUDED.tiktok_pixel_id,
                snapchat_pixel_id = EXCLUDED.snapchat_pixel_id,
                ads_txt_content = EXCLUDED.ads_txt_content,
                robots_txt_content = EXCLUDED.robots_txt_content,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(config.site_config_id.as_str())
        .bind(&config.google_analytics_id)
        .bind(&config.google_search_console_id)
        .bind(&config.facebook_pixel_id)
        .bind(&config.google_tag_manager_id)
        .bind(&config.twitter_pixel_id)
        .bind(&config.linkedin_pixel_id)
        .bind(&config.tiktok_pixel_id)
        .bind(&config.snapchat_pixel_id)
        .bind(&config.ads_txt_content)
        .bind(&config.robots_txt_content)
        .bind(config.created_at)
        .bind(config.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
