//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.

use std::env;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use auth::middleware::{AuthMiddlewareState, require_admin};
use auth::{AuthConfig, PgAdminRepository, admin_auth_router};
use axum::{
    Json, Router, http,
    http::{Method, header},
    middleware,
    routing::get,
};
use platform::cache::Cache;
use platform::mailer::Mailer;
use quiz::{PgQuizRepository, admin_quiz_router, public_quiz_router};
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// Re-export unified error types for use in handlers
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,auth=info,quiz=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Database connection
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(5))
        .connect(&database_url)
        .await?;

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    // Cache: Redis when configured, in-process map otherwise.
    // Either way it stays a best-effort accelerator, never authoritative.
    let cache = match env::var("REDIS_URL") {
        Ok(redis_url) => Cache::connect(&redis_url).await,
        Err(_) => {
            tracing::info!("REDIS_URL not set, using memory cache");
            Cache::memory()
        }
    };

    // Auth configuration
    let auth_config = auth_config_from_env();

    // Mailer: without an API key reset links are logged instead of sent
    let mailer = Mailer::new(
        env::var("RESEND_API_KEY").ok(),
        env::var("FROM_EMAIL").unwrap_or_else(|_| "TechKwiz <noreply@techkwiz.com>".to_string()),
        env::var("FRONTEND_URL").unwrap_or_else(|_| "http://localhost:3000".to_string()),
    );

    let admin_repo = PgAdminRepository::new(pool.clone());
    let quiz_repo = PgQuizRepository::new(pool.clone());

    // Bearer enforcement for the admin quiz surface
    let mw_state = AuthMiddlewareState {
        repo: Arc::new(admin_repo.clone()),
        config: Arc::new(auth_config.clone()),
    };

    let admin_routes = admin_auth_router(admin_repo, auth_config, mailer).merge(
        admin_quiz_router(quiz_repo.clone(), cache.clone()).layer(middleware::from_fn(
            move |req, next| require_admin(mw_state.clone(), req, next),
        )),
    );

    // CORS configuration
    let frontend_origins = env::var("CORS_ORIGINS")
        .unwrap_or_else(|_| "http://localhost:3000,http://127.0.0.1:3000".to_string());

    let allowed_origins: Vec<http::HeaderValue> = frontend_origins
        .split(',')
        .filter_map(|origin| origin.trim().parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]))
        .allow_credentials(true);

    // Build router
    let app = Router::new()
        .route("/api", get(root))
        .route("/api/health", get(health))
        .nest("/api/admin", admin_routes)
        .nest("/api/quiz", public_quiz_router(quiz_repo, cache))
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    let port: u16 = env::var("API_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8000);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// GET /api
async fn root() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "message": "TechKwiz API is running" }))
}

/// GET /api/health
async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "message": "TechKwiz API is running"
    }))
}

/// Build the auth configuration from the environment
///
/// Debug builds fall back to a random signing secret and relaxed password
/// policy; production requires an explicit secret.
fn auth_config_from_env() -> AuthConfig {
    let mut config = if cfg!(debug_assertions) {
        AuthConfig::development()
    } else {
        AuthConfig::default()
    };

    match env::var("JWT_SECRET_KEY") {
        Ok(secret) => config.jwt_secret = secret.into_bytes(),
        Err(_) => {
            if cfg!(debug_assertions) {
                tracing::warn!("JWT_SECRET_KEY not set, using a random development secret");
            } else {
                panic!("JWT_SECRET_KEY must be set in production");
            }
        }
    }

    if let Some(minutes) = env::var("ACCESS_TOKEN_EXPIRE_MINUTES")
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
    {
        config.token_ttl = Duration::from_secs(minutes * 60);
    }

    if let Ok(pepper) = env::var("PASSWORD_PEPPER") {
        config.password_pepper = Some(pepper.into_bytes());
    }

    config
}
