//! Auth Middleware
//!
//! Middleware for requiring a valid bearer token on protected routes.

use axum::body::Body;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use std::sync::Arc;

use crate::application::VerifyTokenUseCase;
use crate::application::config::AuthConfig;
use crate::domain::repository::AdminRepository;
use crate::error::AuthError;
use crate::presentation::handlers::bearer_token;

/// Middleware state
#[derive(Clone)]
pub struct AuthMiddlewareState<R>
where
    R: AdminRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
}

/// The authenticated admin, stored in request extensions for handlers
#[derive(Clone)]
pub struct CurrentAdmin {
    pub username: String,
}

/// Middleware that requires a valid bearer token
///
/// Verifies signature and expiry, and that the token subject still maps to
/// an existing account. On success the [`CurrentAdmin`] is attached to the
/// request for downstream handlers.
pub async fn require_admin<R>(
    state: AuthMiddlewareState<R>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, Response>
where
    R: AdminRepository + Clone + Send + Sync + 'static,
{
    let token = match bearer_token(req.headers()) {
        Ok(token) => token.to_string(),
        Err(e) => return Err(e.into_response()),
    };

    let use_case = VerifyTokenUseCase::new(state.repo.clone(), state.config.clone());

    let username = match use_case.execute(&token).await {
        Ok(username) => username,
        Err(_) => return Err(AuthError::TokenInvalid.into_response()),
    };

    req.extensions_mut().insert(CurrentAdmin { username });

    Ok(next.run(req).await)
}
