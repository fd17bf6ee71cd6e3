//! HTTP Handlers

use axum::Json;
use axum::extract::State;
use axum::http::HeaderMap;
use std::sync::Arc;

use platform::mailer::Mailer;

use crate::application::config::AuthConfig;
use crate::application::{
    ForgotPasswordUseCase, LoginInput, LoginUseCase, ResetPasswordInput, ResetPasswordUseCase,
    SetupInput, SetupUseCase, UpdateProfileInput, UpdateProfileUseCase, VerifyTokenUseCase,
};
use crate::domain::repository::AdminRepository;
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{
    AdminAccountResponse, ForgotPasswordRequest, LoginRequest, MessageResponse,
    ProfileUpdateRequest, ResetPasswordRequest, SetupRequest, TokenResponse, VerifyResponse,
};
use crate::presentation::middleware::CurrentAdmin;

/// Fixed response for forgot-password, identical for every input so the
/// endpoint cannot be used to probe which emails exist.
pub const FORGOT_PASSWORD_MESSAGE: &str =
    "If an account with that email exists, a password reset link has been sent.";

/// Shared state for auth handlers
#[derive(Clone)]
pub struct AuthAppState<R>
where
    R: AdminRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
    pub mailer: Arc<Mailer>,
}

/// Extract the bearer token from an Authorization header
pub(crate) fn bearer_token(headers: &HeaderMap) -> AuthResult<&str> {
    headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .ok_or(AuthError::TokenInvalid)
}

// ============================================================================
// Setup
// ============================================================================

/// POST /api/admin/setup
pub async fn setup<R>(
    State(state): State<AuthAppState<R>>,
    Json(req): Json<SetupRequest>,
) -> AuthResult<Json<AdminAccountResponse>>
where
    R: AdminRepository + Clone + Send + Sync + 'static,
{
    let use_case = SetupUseCase::new(state.repo.clone(), state.config.clone());

    let account = use_case
        .execute(SetupInput {
            username: req.username,
            password: req.password,
            email: req.email,
        })
        .await?;

    Ok(Json(AdminAccountResponse::from(&account)))
}

// ============================================================================
// Login
// ============================================================================

/// POST /api/admin/login
pub async fn login<R>(
    State(state): State<AuthAppState<R>>,
    Json(req): Json<LoginRequest>,
) -> AuthResult<Json<TokenResponse>>
where
    R: AdminRepository + Clone + Send + Sync + 'static,
{
    let use_case = LoginUseCase::new(state.repo.clone(), state.config.clone());

    let output = use_case
        .execute(LoginInput {
            username: req.username,
            password: req.password,
        })
        .await?;

    Ok(Json(TokenResponse::bearer(output.access_token)))
}

// ============================================================================
// Verify
// ============================================================================

/// GET /api/admin/verify
pub async fn verify<R>(
    State(state): State<AuthAppState<R>>,
    headers: HeaderMap,
) -> AuthResult<Json<VerifyResponse>>
where
    R: AdminRepository + Clone + Send + Sync + 'static,
{
    let token = bearer_token(&headers)?;

    let use_case = VerifyTokenUseCase::new(state.repo.clone(), state.config.clone());
    let username = use_case.execute(token).await?;

    Ok(Json(VerifyResponse {
        valid: true,
        username,
    }))
}

// ============================================================================
// Forgot / Reset password
// ============================================================================

/// POST /api/admin/forgot-password
pub async fn forgot_password<R>(
    State(state): State<AuthAppState<R>>,
    Json(req): Json<ForgotPasswordRequest>,
) -> AuthResult<Json<MessageResponse>>
where
    R: AdminRepository + Clone + Send + Sync + 'static,
{
    let use_case = ForgotPasswordUseCase::new(
        state.repo.clone(),
        state.config.clone(),
        state.mailer.clone(),
    );

    use_case.execute(&req.email).await?;

    Ok(Json(MessageResponse {
        message: FORGOT_PASSWORD_MESSAGE.to_string(),
    }))
}

/// POST /api/admin/reset-password
pub async fn reset_password<R>(
    State(state): State<AuthAppState<R>>,
    Json(req): Json<ResetPasswordRequest>,
) -> AuthResult<Json<MessageResponse>>
where
    R: AdminRepository + Clone + Send + Sync + 'static,
{
    let use_case = ResetPasswordUseCase::new(state.repo.clone(), state.config.clone());

    use_case
        .execute(ResetPasswordInput {
            token: req.token,
            new_password: req.new_password,
        })
        .await?;

    Ok(Json(MessageResponse {
        message: "Password has been reset successfully.".to_string(),
    }))
}

// ============================================================================
// Profile
// ============================================================================

/// PUT /api/admin/profile (requires bearer token)
pub async fn update_profile<R>(
    State(state): State<AuthAppState<R>>,
    axum::Extension(current): axum::Extension<CurrentAdmin>,
    Json(req): Json<ProfileUpdateRequest>,
) -> AuthResult<Json<AdminAccountResponse>>
where
    R: AdminRepository + Clone + Send + Sync + 'static,
{
    let use_case = UpdateProfileUseCase::new(state.repo.clone(), state.config.clone());

    let account = use_case
        .execute(
            &current.username,
            UpdateProfileInput {
                current_password: req.current_password,
                username: req.username,
                email: req.email,
                new_password: req.new_password,
            },
        )
        .await?;

    Ok(Json(AdminAccountResponse::from(&account)))
}
