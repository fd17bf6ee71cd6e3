//! Auth Router

use axum::{
    Router, middleware,
    routing::{get, post, put},
};
use std::sync::Arc;

use platform::mailer::Mailer;

use crate::application::config::AuthConfig;
use crate::domain::repository::AdminRepository;
use crate::infra::postgres::PgAdminRepository;
use crate::presentation::handlers::{self, AuthAppState};
use crate::presentation::middleware::{AuthMiddlewareState, require_admin};

/// Create the admin auth router with PostgreSQL repository
pub fn admin_auth_router(repo: PgAdminRepository, config: AuthConfig, mailer: Mailer) -> Router {
    admin_auth_router_generic(repo, config, mailer)
}

/// Create a generic admin auth router for any repository implementation
pub fn admin_auth_router_generic<R>(repo: R, config: AuthConfig, mailer: Mailer) -> Router
where
    R: AdminRepository + Clone + Send + Sync + 'static,
{
    let state = AuthAppState {
        repo: Arc::new(repo),
        config: Arc::new(config),
        mailer: Arc::new(mailer),
    };

    let mw_state = AuthMiddlewareState {
        repo: state.repo.clone(),
        config: state.config.clone(),
    };

    Router::new()
        .route("/setup", post(handlers::setup::<R>))
        .route("/login", post(handlers::login::<R>))
        .route("/verify", get(handlers::verify::<R>))
        .route("/forgot-password", post(handlers::forgot_password::<R>))
        .route("/reset-password", post(handlers::reset_password::<R>))
        .route(
            "/profile",
            put(handlers::update_profile::<R>).route_layer(middleware::from_fn(
                move |req, next| require_admin(mw_state.clone(), req, next),
            )),
        )
        .with_state(state)
}
