//! Quiz Routers

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use platform::cache::Cache;

use crate::domain::repository::QuizRepository;
use crate::infra::postgres::PgQuizRepository;
use crate::presentation::{admin_handlers, public_handlers};

/// Shared state for quiz handlers
#[derive(Clone)]
pub struct QuizAppState<R>
where
    R: QuizRepository,
{
    pub repo: Arc<R>,
    pub cache: Cache,
}

/// Create the admin quiz router with PostgreSQL repository
///
/// Bearer enforcement is layered on by the api app.
pub fn admin_quiz_router(repo: PgQuizRepository, cache: Cache) -> Router {
    admin_quiz_router_generic(repo, cache)
}

/// Create the public quiz router with PostgreSQL repository
pub fn public_quiz_router(repo: PgQuizRepository, cache: Cache) -> Router {
    public_quiz_router_generic(repo, cache)
}

/// Create a generic admin quiz router for any repository implementation
pub fn admin_quiz_router_generic<R>(repo: R, cache: Cache) -> Router
where
    R: QuizRepository,
{
    let state = QuizAppState {
        repo: Arc::new(repo),
        cache,
    };

    Router::new()
        .route(
            "/categories",
            get(admin_handlers::list_categories::<R>).post(admin_handlers::create_category::<R>),
        )
        .route(
            "/categories/{category_id}",
            get(admin_handlers::get_category::<R>)
                .put(admin_handlers::update_category::<R>)
                .delete(admin_handlers::delete_category::<R>),
        )
        .route(
            "/questions",
            get(admin_handlers::list_questions::<R>).post(admin_handlers::create_question::<R>),
        )
        .route(
            "/questions/{question_id}",
            get(admin_handlers::get_question::<R>)
                .put(admin_handlers::update_question::<R>)
                .delete(admin_handlers::delete_question::<R>),
        )
        .route(
            "/scripts",
            get(admin_handlers::list_scripts::<R>).post(admin_handlers::create_script::<R>),
        )
        .route(
            "/scripts/{script_id}",
            get(admin_handlers::get_script::<R>)
                .put(admin_handlers::update_script::<R>)
                .delete(admin_handlers::delete_script::<R>),
        )
        .route(
            "/ad-slots",
            get(admin_handlers::list_ad_slots::<R>).post(admin_handlers::create_ad_slot::<R>),
        )
        .route(
            "/ad-slots/{ad_slot_id}",
            get(admin_handlers::get_ad_slot::<R>)
                .put(admin_handlers::update_ad_slot::<R>)
                .delete(admin_handlers::delete_ad_slot::<R>),
        )
        .route(
            "/rewarded-config",
            get(admin_handlers::list_rewarded_configs::<R>),
        )
        .route(
            "/rewarded-config/{scope}",
            get(admin_handlers::get_rewarded_config::<R>)
                .put(admin_handlers::update_rewarded_config::<R>),
        )
        .route(
            "/site-config",
            get(admin_handlers::get_site_config::<R>)
                .put(admin_handlers::update_site_config::<R>),
        )
        .route(
            "/export/quiz-data",
            get(admin_handlers::export_quiz_data::<R>),
        )
        .route(
            "/import/quiz-data",
            post(admin_handlers::import_quiz_data::<R>),
        )
        .route("/ad-analytics", get(admin_handlers::get_ad_analytics::<R>))
        .route(
            "/ad-analytics/export",
            get(admin_handlers::export_ad_analytics::<R>),
        )
        .with_state(state)
}

/// Create a generic public quiz router for any repository implementation
pub fn public_quiz_router_generic<R>(repo: R, cache: Cache) -> Router
where
    R: QuizRepository,
{
    let state = QuizAppState {
        repo: Arc::new(repo),
        cache,
    };

    Router::new()
        .route("/categories", get(public_handlers::list_categories::<R>))
        .route(
            "/categories/{category_id}",
            get(public_handlers::get_category::<R>),
        )
        .route(
            "/categories/{category_id}/timer-config",
            get(public_handlers::get_timer_config::<R>),
        )
        .route(
            "/questions/{category_id}",
            get(public_handlers::get_quiz_questions::<R>),
        )
        .route(
            "/sequential-questions/{category_id}",
            get(public_handlers::get_sequential_questions::<R>),
        )
        .route(
            "/question/{question_id}",
            get(public_handlers::get_single_question::<R>),
        )
        .route(
            "/scripts/{placement}",
            get(public_handlers::get_scripts_for_placement::<R>),
        )
        .route(
            "/ad-slots/{placement}",
            get(public_handlers::get_ad_slots_for_placement::<R>),
        )
        .route(
            "/between-questions-ads",
            get(public_handlers::get_between_questions_ads::<R>),
        )
        .route(
            "/rewarded-config",
            get(public_handlers::get_rewarded_config_homepage::<R>),
        )
        .route(
            "/rewarded-config/{category_id}",
            get(public_handlers::get_rewarded_config_for_category::<R>),
        )
        .route("/site-config", get(public_handlers::get_site_config::<R>))
        .route(
            "/ad-analytics/event",
            post(public_handlers::record_ad_event::<R>),
        )
        .with_state(state)
}
