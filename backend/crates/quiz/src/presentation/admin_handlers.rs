//! Admin HTTP Handlers
//!
//! Authenticated CRUD over categories, questions, scripts, ad slots,
//! rewarded/site configuration, plus export/import and analytics views.
//! Bearer enforcement happens in the api app via the auth middleware; these
//! handlers assume an authenticated caller.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use chrono::{DateTime, Utc};
use kernel::id::{AdSlotId, CategoryId, QuestionId, ScriptId};

use crate::application::analytics::AnalyticsUseCase;
use crate::application::export_import::QuizDataTransferUseCase;
use crate::application::rewarded::RewardedConfigUseCase;
use crate::application::site_config::SiteConfigUseCase;
use crate::domain::entity::analytics::AnalyticsFilter;
use crate::domain::entity::question::Difficulty;
use crate::domain::entity::rewarded_config::ConfigScope;
use crate::domain::entity::script::ScriptInjection;
use crate::domain::repository::QuizRepository;
use crate::error::{QuizError, QuizResult};
use crate::presentation::dto::{
    AdSlotCreateRequest, AdSlotResponse, AdSlotUpdateRequest, AnalyticsFilterEcho, AnalyticsQuery,
    AnalyticsSummaryResponse, CategoryCreateRequest, CategoryResponse, CategoryUpdateRequest,
    MessageResponse, QuestionCreateRequest, QuestionResponse, QuestionUpdateRequest,
    QuizDataExportResponse, QuizDataImportRequest, RewardedConfigResponse,
    RewardedConfigUpdateRequest, ScriptCreateRequest, ScriptResponse, ScriptUpdateRequest,
    SiteConfigResponse, SiteConfigUpdateRequest,
};
use crate::presentation::public_handlers::{CATEGORIES_CACHE_KEY, questions_cache_key};
use crate::presentation::router::QuizAppState;

/// Drop the cached category list and, when given, one category's questions
async fn invalidate_content_cache<R>(state: &QuizAppState<R>, category_id: Option<&str>)
where
    R: QuizRepository,
{
    state.cache.delete(CATEGORIES_CACHE_KEY).await;
    if let Some(category_id) = category_id {
        state.cache.delete(&questions_cache_key(category_id)).await;
    }
}

// ============================================================================
// Categories
// ============================================================================

/// GET /api/admin/categories
pub async fn list_categories<R>(
    State(state): State<QuizAppState<R>>,
) -> QuizResult<Json<Vec<CategoryResponse>>>
where
    R: QuizRepository,
{
    let categories = state.repo.list_categories().await?;
    Ok(Json(categories.iter().map(Into::into).collect()))
}

/// GET /api/admin/categories/{category_id}
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

/// POST /api/admin/categories
pub async fn create_category<R>(
    State(state): State<QuizAppState<R>>,
    Json(req): Json<CategoryCreateRequest>,
) -> QuizResult<Json<CategoryResponse>>
where
    R: QuizRepository,
{
    let category = req.into_category()?;
    state.repo.create_category(&category).await?;

    invalidate_content_cache(&state, None).await;
    tracing::info!(category_id = %category.category_id, name = %category.name, "Category created");

    Ok(Json(CategoryResponse::from(&category)))
}

/// PUT /api/admin/categories/{category_id}
pub async fn update_category<R>(
    State(state): State<QuizAppState<R>>,
    Path(category_id): Path<String>,
    Json(req): Json<CategoryUpdateRequest>,
) -> QuizResult<Json<CategoryResponse>>
where
    R: QuizRepository,
{
    let category_id = CategoryId::from_string(category_id);
    let mut category = state
        .repo
        .find_category(&category_id)
        .await?
        .ok_or(QuizError::CategoryNotFound)?;

    req.apply(&mut category)?;
    state.repo.update_category(&category).await?;

    invalidate_content_cache(&state, Some(category_id.as_str())).await;

    Ok(Json(CategoryResponse::from(&category)))
}

/// DELETE /api/admin/categories/{category_id}
///
/// Cascades deletion of the category's questions. The cascade is best
/// effort: its failure is logged and the delete still reports success.
pub async fn delete_category<R>(
    State(state): State<QuizAppState<R>>,
    Path(category_id): Path<String>,
) -> QuizResult<Json<MessageResponse>>
where
    R: QuizRepository,
{
    let category_id = CategoryId::from_string(category_id);

    if !state.repo.delete_category(&category_id).await? {
        return Err(QuizError::CategoryNotFound);
    }

    match state.repo.delete_questions_by_category(&category_id).await {
        Ok(removed) => {
            tracing::info!(category_id = %category_id, removed, "Category deleted with questions");
        }
        Err(e) => {
            tracing::error!(
                category_id = %category_id,
                error = %e,
                "Question cascade failed after category delete"
            );
        }
    }

    invalidate_content_cache(&state, Some(category_id.as_str())).await;

    Ok(Json(MessageResponse {
        message: "Category and its questions deleted".to_string(),
    }))
}

// ============================================================================
// Questions
// ============================================================================

/// Query parameters of the admin question list
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct QuestionListQuery {
    pub category_id: Option<String>,
    pub difficulty: Option<Difficulty>,
}

/// GET /api/admin/questions?category_id=&difficulty=
pub async fn list_questions<R>(
    State(state): State<QuizAppState<R>>,
    Query(query): Query<QuestionListQuery>,
) -> QuizResult<Json<Vec<QuestionResponse>>>
where
    R: QuizRepository,
{
    let category_id = query.category_id.map(CategoryId::from_string);
    let questions = state
        .repo
        .list_questions(category_id.as_ref(), query.difficulty)
        .await?;

    Ok(Json(questions.iter().map(Into::into).collect()))
}

/// GET /api/admin/questions/{question_id}
pub async fn get_question<R>(
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

/// POST /api/admin/questions
pub async fn create_question<R>(
    State(state): State<QuizAppState<R>>,
    Json(req): Json<QuestionCreateRequest>,
) -> QuizResult<Json<QuestionResponse>>
where
    R: QuizRepository,
{
    let question = req.into_question()?;

    // The category link must point somewhere
    state
        .repo
        .find_category(&question.category_id)
        .await?
        .ok_or(QuizError::CategoryNotFound)?;

    state.repo.create_question(&question).await?;

    invalidate_content_cache(&state, Some(question.category_id.as_str())).await;
    tracing::info!(question_id = %question.question_id, "Question created");

    Ok(Json(QuestionResponse::from(&question)))
}

/// PUT /api/admin/questions/{question_id}
pub async fn update_question<R>(
    State(state): State<QuizAppState<R>>,
    Path(question_id): Path<String>,
    Json(req): Json<QuestionUpdateRequest>,
) -> QuizResult<Json<QuestionResponse>>
where
    R: QuizRepository,
{
    let mut question = state
        .repo
        .find_question(&QuestionId::from_string(question_id))
        .await?
        .ok_or(QuizError::QuestionNotFound)?;

    let old_category = question.category_id.clone();
    req.apply(&mut question)?;
    state.repo.update_question(&question).await?;

    invalidate_content_cache(&state, Some(old_category.as_str())).await;
    if question.category_id != old_category {
        state
            .cache
            .delete(&questions_cache_key(question.category_id.as_str()))
            .await;
    }

    Ok(Json(QuestionResponse::from(&question)))
}

/// DELETE /api/admin/questions/{question_id}
pub async fn delete_question<R>(
    State(state): State<QuizAppState<R>>,
    Path(question_id): Path<String>,
) -> QuizResult<Json<MessageResponse>>
where
    R: QuizRepository,
{
    let question_id = QuestionId::from_string(question_id);
    let question = state
        .repo
        .find_question(&question_id)
        .await?
        .ok_or(QuizError::QuestionNotFound)?;

    state.repo.delete_question(&question_id).await?;
    invalidate_content_cache(&state, Some(question.category_id.as_str())).await;

    Ok(Json(MessageResponse {
        message: "Question deleted".to_string(),
    }))
}

// ============================================================================
// Scripts
// ============================================================================

/// GET /api/admin/scripts
pub async fn list_scripts<R>(
    State(state): State<QuizAppState<R>>,
) -> QuizResult<Json<Vec<ScriptResponse>>>
where
    R: QuizRepository,
{
    let scripts = state.repo.list_scripts().await?;
    Ok(Json(scripts.iter().map(Into::into).collect()))
}

/// GET /api/admin/scripts/{script_id}
pub async fn get_script<R>(
    State(state): State<QuizAppState<R>>,
    Path(script_id): Path<String>,
) -> QuizResult<Json<ScriptResponse>>
where
    R: QuizRepository,
{
    let script = state
        .repo
        .find_script(&ScriptId::from_string(script_id))
        .await?
        .ok_or(QuizError::ScriptNotFound)?;

    Ok(Json(ScriptResponse::from(&script)))
}

/// POST /api/admin/scripts
pub async fn create_script<R>(
    State(state): State<QuizAppState<R>>,
    Json(req): Json<ScriptCreateRequest>,
) -> QuizResult<Json<ScriptResponse>>
where
    R: QuizRepository,
{
    let script = ScriptInjection::new(req.name, req.script_code, req.placement, req.is_active);
    state.repo.create_script(&script).await?;

    tracing::info!(script_id = %script.script_id, "Script created");
    Ok(Json(ScriptResponse::from(&script)))
}

/// PUT /api/admin/scripts/{script_id}
pub async fn update_script<R>(
    State(state): State<QuizAppState<R>>,
    Path(script_id): Path<String>,
    Json(req): Json<ScriptUpdateRequest>,
) -> QuizResult<Json<ScriptResponse>>
where
    R: QuizRepository,
{
    let mut script = state
        .repo
        .find_script(&ScriptId::from_string(script_id))
        .await?
        .ok_or(QuizError::ScriptNotFound)?;

    req.apply(&mut script);
    state.repo.update_script(&script).await?;

    Ok(Json(ScriptResponse::from(&script)))
}

/// DELETE /api/admin/scripts/{script_id}
pub async fn delete_script<R>(
    State(state): State<QuizAppState<R>>,
    Path(script_id): Path<String>,
) -> QuizResult<Json<MessageResponse>>
where
    R: QuizRepository,
{
    if !state
        .repo
        .delete_script(&ScriptId::from_string(script_id))
        .await?
    {
        return Err(QuizError::ScriptNotFound);
    }

    Ok(Json(MessageResponse {
        message: "Script deleted".to_string(),
    }))
}

// ============================================================================
// Ad slots
// ============================================================================

/// GET /api/admin/ad-slots
pub async fn list_ad_slots<R>(
    State(state): State<QuizAppState<R>>,
) -> QuizResult<Json<Vec<AdSlotResponse>>>
where
    R: QuizRepository,
{
    let slots = state.repo.list_ad_slots().await?;
    Ok(Json(slots.iter().map(Into::into).collect()))
}

/// GET /api/admin/ad-slots/{ad_slot_id}
pub async fn get_ad_slot<R>(
    State(state): State<QuizAppState<R>>,
    Path(ad_slot_id): Path<String>,
) -> QuizResult<Json<AdSlotResponse>>
where
    R: QuizRepository,
{
    let slot = state
        .repo
        .find_ad_slot(&AdSlotId::from_string(ad_slot_id))
        .await?
        .ok_or(QuizError::AdSlotNotFound)?;

    Ok(Json(AdSlotResponse::from(&slot)))
}

/// POST /api/admin/ad-slots
pub async fn create_ad_slot<R>(
    State(state): State<QuizAppState<R>>,
    Json(req): Json<AdSlotCreateRequest>,
) -> QuizResult<Json<AdSlotResponse>>
where
    R: QuizRepository,
{
    let slot = req.into_ad_slot();
    state.repo.create_ad_slot(&slot).await?;

    tracing::info!(ad_slot_id = %slot.ad_slot_id, "Ad slot created");
    Ok(Json(AdSlotResponse::from(&slot)))
}

/// PUT /api/admin/ad-slots/{ad_slot_id}
pub async fn update_ad_slot<R>(
    State(state): State<QuizAppState<R>>,
    Path(ad_slot_id): Path<String>,
    Json(req): Json<AdSlotUpdateRequest>,
) -> QuizResult<Json<AdSlotResponse>>
where
    R: QuizRepository,
{
    let mut slot = state
        .repo
        .find_ad_slot(&AdSlotId::from_string(ad_slot_id))
        .await?
        .ok_or(QuizError::AdSlotNotFound)?;

    req.apply(&mut slot);
    state.repo.update_ad_slot(&slot).await?;

    Ok(Json(AdSlotResponse::from(&slot)))
}

/// DELETE /api/admin/ad-slots/{ad_slot_id}
pub async fn delete_ad_slot<R>(
    State(state): State<QuizAppState<R>>,
    Path(ad_slot_id): Path<String>,
) -> QuizResult<Json<MessageResponse>>
where
    R: QuizRepository,
{
    if !state
        .repo
        .delete_ad_slot(&AdSlotId::from_string(ad_slot_id))
        .await?
    {
        return Err(QuizError::AdSlotNotFound);
    }

    Ok(Json(MessageResponse {
        message: "Ad slot deleted".to_string(),
    }))
}

// ============================================================================
// Rewarded config
// ============================================================================

/// GET /api/admin/rewarded-config
pub async fn list_rewarded_configs<R>(
    State(state): State<QuizAppState<R>>,
) -> QuizResult<Json<Vec<RewardedConfigResponse>>>
where
    R: QuizRepository,
{
    let configs = RewardedConfigUseCase::new(state.repo.clone()).list().await?;
    Ok(Json(configs.iter().map(Into::into).collect()))
}

/// GET /api/admin/rewarded-config/{scope}
///
/// `scope` is a category id or the literal `homepage`.
pub async fn get_rewarded_config<R>(
    State(state): State<QuizAppState<R>>,
    Path(scope): Path<String>,
) -> QuizResult<Json<RewardedConfigResponse>>
where
    R: QuizRepository,
{
    let config = RewardedConfigUseCase::new(state.repo.clone())
        .resolve(ConfigScope::from_path_segment(&scope))
        .await?;

    Ok(Json(RewardedConfigResponse::from(&config)))
}

/// PUT /api/admin/rewarded-config/{scope}
pub async fn update_rewarded_config<R>(
    State(state): State<QuizAppState<R>>,
    Path(scope): Path<String>,
    Json(req): Json<RewardedConfigUpdateRequest>,
) -> QuizResult<Json<RewardedConfigResponse>>
where
    R: QuizRepository,
{
    let patch = req.into_patch()?;
    let config = RewardedConfigUseCase::new(state.repo.clone())
        .update(ConfigScope::from_path_segment(&scope), patch)
        .await?;

    Ok(Json(RewardedConfigResponse::from(&config)))
}

// ============================================================================
// Site config
// ============================================================================

/// GET /api/admin/site-config
pub async fn get_site_config<R>(
    State(state): State<QuizAppState<R>>,
) -> QuizResult<Json<SiteConfigResponse>>
where
    R: QuizRepository,
{
    let config = SiteConfigUseCase::new(state.repo.clone()).resolve().await?;
    Ok(Json(SiteConfigResponse::from(&config)))
}

/// PUT /api/admin/site-config
pub async fn update_site_config<R>(
    State(state): State<QuizAppState<R>>,
    Json(req): Json<SiteConfigUpdateRequest>,
) -> QuizResult<Json<SiteConfigResponse>>
where
    R: QuizRepository,
{
    let config = SiteConfigUseCase::new(state.repo.clone())
        .update(req.into_patch())
        .await?;

    Ok(Json(SiteConfigResponse::from(&config)))
}

// ============================================================================
// Export / Import
// ============================================================================

/// GET /api/admin/export/quiz-data
pub async fn export_quiz_data<R>(
    State(state): State<QuizAppState<R>>,
) -> QuizResult<Json<QuizDataExportResponse>>
where
    R: QuizRepository,
{
    let snapshot = QuizDataTransferUseCase::new(state.repo.clone())
        .export()
        .await?;

    Ok(Json(QuizDataExportResponse {
        categories: snapshot.categories.iter().map(Into::into).collect(),
        questions: snapshot.questions.iter().map(Into::into).collect(),
        export_date: snapshot.export_date,
    }))
}

/// POST /api/admin/import/quiz-data
///
/// Replaces ALL stored categories and questions.
pub async fn import_quiz_data<R>(
    State(state): State<QuizAppState<R>>,
    Json(req): Json<QuizDataImportRequest>,
) -> QuizResult<Json<MessageResponse>>
where
    R: QuizRepository,
{
    let categories = req
        .categories
        .into_iter()
        .map(|c| c.into_category())
        .collect::<QuizResult<Vec<_>>>()?;
    let questions = req
        .questions
        .into_iter()
        .map(|q| q.into_question())
        .collect::<QuizResult<Vec<_>>>()?;

    let (category_count, question_count) = QuizDataTransferUseCase::new(state.repo.clone())
        .import(categories, questions)
        .await?;

    // Everything cached is potentially stale now
    state.cache.clear().await;

    Ok(Json(MessageResponse {
        message: format!(
            "Imported {category_count} categories and {question_count} questions"
        ),
    }))
}

// ============================================================================
// Analytics
// ============================================================================

fn parse_timestamp(value: &str) -> QuizResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| QuizError::InvalidTimestamp)
}

fn build_filter(query: &AnalyticsQuery) -> QuizResult<AnalyticsFilter> {
    Ok(AnalyticsFilter {
        from_ts: query.from_ts.as_deref().map(parse_timestamp).transpose()?,
        to_ts: query.to_ts.as_deref().map(parse_timestamp).transpose()?,
        placement: query.placement.clone(),
        category_id: query.category_id.clone(),
    })
}

/// GET /api/admin/ad-analytics
pub async fn get_ad_analytics<R>(
    State(state): State<QuizAppState<R>>,
    Query(query): Query<AnalyticsQuery>,
) -> QuizResult<Json<AnalyticsSummaryResponse>>
where
    R: QuizRepository,
{
    let filter = build_filter(&query)?;
    let summary = AnalyticsUseCase::new(state.repo.clone())
        .summary(&filter, query.limit)
        .await?;

    Ok(Json(AnalyticsSummaryResponse::new(
        summary.totals,
        summary.recent.iter().map(Into::into).collect(),
        AnalyticsFilterEcho {
            from_ts: query.from_ts,
            to_ts: query.to_ts,
            placement: query.placement,
            category_id: query.category_id,
        },
    )))
}

/// GET /api/admin/ad-analytics/export
pub async fn export_ad_analytics<R>(
    State(state): State<QuizAppState<R>>,
    Query(query): Query<AnalyticsQuery>,
) -> QuizResult<Response>
where
    R: QuizRepository,
{
    let filter = build_filter(&query)?;
    let csv = AnalyticsUseCase::new(state.repo.clone())
        .export_csv(&filter)
        .await?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=ad_analytics.csv",
            ),
        ],
        csv,
    )
        .into_response())
}
