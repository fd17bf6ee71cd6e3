//! Public HTTP Handlers
//!
//! Anonymous player-facing reads (and the analytics event write). Category
//! and question reads go through the best-effort cache; the store stays
//! authoritative.

use std::time::Duration;

use axum::Json;
use axum::extract::{Path, Query, State};
use kernel::id::{CategoryId, QuestionId};
use serde::Deserialize;

use crate::application::analytics::{AnalyticsUseCase, RecordEventInput};
use crate::application::rewarded::RewardedConfigUseCase;
use crate::application::select_questions::fixed_length_set;
use crate::application::site_config::SiteConfigUseCase;
use crate::domain::entity::question::Difficulty;
use crate::domain::entity::rewarded_config::ConfigScope;
use crate::domain::repository::QuizRepository;
use crate::error::{QuizError, QuizResult};
use crate::presentation::dto::{
    AdSlotResponse, AnalyticsEventAck, AnalyticsEventRequest, CategoryResponse, QuestionResponse,
    RewardedConfigResponse, ScriptResponse, SiteConfigResponse, TimerConfigResponse,
};
use crate::presentation::router::QuizAppState;

// Cache keys and TTLs for the public read path
pub(crate) const CATEGORIES_CACHE_KEY: &str = "quiz:categories";
pub(crate) const CATEGORIES_CACHE_TTL: Duration = Duration::from_secs(600);
pub(crate) const QUESTIONS_CACHE_TTL: Duration = Duration::from_secs(300);

pub(crate) fn questions_cache_key(category_id: &str) -> String {
    format!("quiz:questions:{category_id}")
}

// ============================================================================
// Categories
// ============================================================================

/// GET /api/quiz/categories
pub async fn list_categories<R>(
    State(state): State<QuizAppState<R>>,
) -> QuizResult<Json<Vec<CategoryResponse>>>
where
    R: QuizRepository,
{
    if let Some(cached) = state
        .cache
        .get_json::<Vec<CategoryResponse>>(CATEGORIES_CACHE_KEY)
        .await
    {
        return Ok(Json(cached));
    }

    let categories = state.repo.list_categories().await?;
    let response: Vec<CategoryResponse> = categories.iter().map(Into::into).collect();

    state
        .cache
        .set_json(CATEGORIES_CACHE_KEY, &response, CATEGORIES_CACHE_TTL)
        .await;

    Ok(Json(response))
}

/// GET /api/quiz/categories/{category_id}
pub async fn get_category<R>(
    State(state): State<QuizAppState<R>>,
    Path(category_id): Path<String>,
) -> QuizResult<Json<CategoryResponse>>
where
    R: QuizRepository,
{
    let category = state
        .repo
        .find_category(&CategoryId::from_string(category_id))
        .await?
        .ok_or(QuizError::CategoryNotFound)?;

    Ok(Json(CategoryResponse::from(&category)))
}

/// GET /api/quiz/categories/{category_id}/timer-config
pub async fn get_timer_config<R>(
    State(state): State<QuizAppState<R>>,
    Path(category_id): Path<String>,
) -> QuizResult<Json<TimerConfigResponse>>
where
    R: QuizRepository,
{
    let category = state
        .repo
        .find_category(&CategoryId::from_string(category_id))
        .await?
        .ok_or(QuizError::CategoryNotFound)?;

    Ok(Json(TimerConfigResponse::from(&category)))
}

// ============================================================================
// Questions
// ============================================================================

/// Query parameters of the player question endpoint
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuestionsQuery {
    /// Accepted for compatibility; the sequential flow is fixed at 5
    pub count: Option<usize>,
    pub difficulty: Option<Difficulty>,
}

/// Category question pool, via the cache when possible
async fn load_category_questions<R>(
    state: &QuizAppState<R>,
    category_id: &str,
) -> QuizResult<Vec<QuestionResponse>>
where
    R: QuizRepository,
{
    let key = questions_cache_key(category_id);

    if let Some(cached) = state.cache.get_json::<Vec<QuestionResponse>>(&key).await {
        return Ok(cached);
    }

    let questions = state
        .repo
        .list_questions(Some(&CategoryId::from_string(category_id)), None)
        .await?;
    let response: Vec<QuestionResponse> = questions.iter().map(Into::into).collect();

    if !response.is_empty() {
        state
            .cache
            .set_json(&key, &response, QUESTIONS_CACHE_TTL)
            .await;
    }

    Ok(response)
}

/// GET /api/quiz/questions/{category_id}?count=&difficulty=
///
/// Always returns exactly 5 questions when the category has any; repeats
/// entries when fewer exist, truncates when more do.
pub async fn get_quiz_questions<R>(
    State(state): State<QuizAppState<R>>,
    Path(category_id): Path<String>,
    Query(query): Query<QuestionsQuery>,
) -> QuizResult<Json<Vec<QuestionResponse>>>
where
    R: QuizRepository,
{
    let mut pool = load_category_questions(&state, &category_id).await?;

    if let Some(difficulty) = query.difficulty {
        pool.retain(|q| q.difficulty == difficulty);
    }

    if pool.is_empty() {
        return Err(QuizError::NoQuestions);
    }

    Ok(Json(fixed_length_set(pool)))
}

/// GET /api/quiz/sequential-questions/{category_id}
///
/// Same fixed-length contract as the filtered endpoint.
pub async fn get_sequential_questions<R>(
    State(state): State<QuizAppState<R>>,
    Path(category_id): Path<String>,
) -> QuizResult<Json<Vec<QuestionResponse>>>
where
    R: QuizRepository,
{
    let pool = load_category_questions(&state, &category_id).await?;

    if pool.is_empty() {
        return Err(QuizError::NoQuestions);
    }

    Ok(Json(fixed_length_set(pool)))
}

/// GET /api/quiz/question/{question_id}
pub async fn get_single_question<R>(
    State(state): State<QuizAppState<R>>,
    Path(question_id): Path<String>,
) -> QuizResult<Json<QuestionResponse>>
where
    R: QuizRepository,
{
    let question = state
        .repo
        .find_question(&QuestionId::from_string(question_id))
        .await?
        .ok_or(QuizError::QuestionNotFound)?;

    Ok(Json(QuestionResponse::from(&question)))
}

// ============================================================================
// Scripts & ad slots
// ============================================================================

/// GET /api/quiz/scripts/{placement}
pub async fn get_scripts_for_placement<R>(
    State(state): State<QuizAppState<R>>,
    Path(placement): Path<String>,
) -> QuizResult<Json<Vec<ScriptResponse>>>
where
    R: QuizRepository,
{
    let scripts = state
        .repo
        .list_active_scripts_by_placement(&placement)
        .await?;

    Ok(Json(scripts.iter().map(Into::into).collect()))
}

/// GET /api/quiz/ad-slots/{placement}
pub async fn get_ad_slots_for_placement<R>(
    State(state): State<QuizAppState<R>>,
    Path(placement): Path<String>,
) -> QuizResult<Json<Vec<AdSlotResponse>>>
where
    R: QuizRepository,
{
    let slots = state
        .repo
        .list_active_ad_slots_by_placement(&placement)
        .await?;

    Ok(Json(slots.iter().map(Into::into).collect()))
}

/// GET /api/quiz/between-questions-ads
pub async fn get_between_questions_ads<R>(
    State(state): State<QuizAppState<R>>,
) -> QuizResult<Json<Vec<AdSlotResponse>>>
where
    R: QuizRepository,
{
    let slots = state
        .repo
        .list_active_ad_slots_by_placement("between-questions")
        .await?;

    Ok(Json(slots.iter().map(Into::into).collect()))
}

// ============================================================================
// Rewarded config
// ============================================================================

/// GET /api/quiz/rewarded-config
pub async fn get_rewarded_config_homepage<R>(
    State(state): State<QuizAppState<R>>,
) -> QuizResult<Json<RewardedConfigResponse>>
where
    R: QuizRepository,
{
    let config = RewardedConfigUseCase::new(state.repo.clone())
        .resolve(ConfigScope::Homepage)
        .await?;

    Ok(Json(RewardedConfigResponse::from(&config)))
}

/// GET /api/quiz/rewarded-config/{category_id}
pub async fn get_rewarded_config_for_category<R>(
    State(state): State<QuizAppState<R>>,
    Path(category_id): Path<String>,
) -> QuizResult<Json<RewardedConfigResponse>>
where
    R: QuizRepository,
{
    let scope = ConfigScope::Category(CategoryId::from_string(category_id));
    let config = RewardedConfigUseCase::new(state.repo.clone())
        .resolve(scope)
        .await?;

    Ok(Json(RewardedConfigResponse::from(&config)))
}

// ============================================================================
// Site config
// ============================================================================

/// GET /api/quiz/site-config
pub async fn get_site_config<R>(
    State(state): State<QuizAppState<R>>,
) -> QuizResult<Json<SiteConfigResponse>>
where
    R: QuizRepository,
{
    let config = SiteConfigUseCase::new(state.repo.clone()).resolve().await?;

    Ok(Json(SiteConfigResponse::from(&config)))
}

// ============================================================================
// Analytics
// ============================================================================

/// POST /api/quiz/ad-analytics/event
pub async fn record_ad_event<R>(
    State(state): State<QuizAppState<R>>,
    Json(req): Json<AnalyticsEventRequest>,
) -> QuizResult<Json<AnalyticsEventAck>>
where
    R: QuizRepository,
{
    let event = AnalyticsUseCase::new(state.repo.clone())
        .record(RecordEventInput {
            event_type: req.event_type,
            placement: req.placement,
            source: req.source,
            category_id: req.category_id,
            session_id: req.session_id,
            metadata: req.metadata,
        })
        .await?;

    Ok(Json(AnalyticsEventAck {
        status: "ok".to_string(),
        id: event.event_id.to_string(),
    }))
}
