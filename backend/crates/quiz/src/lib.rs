//! Quiz (Content & Configuration) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Business logic, entities, repository traits
//! - `application/` - Use cases and application services
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers, DTOs, routers
//!
//! ## Features
//! - Category and question CRUD with cascading category deletion
//! - Fixed-length (5) randomized question selection for the player flow
//! - Rewarded-popup configuration resolver (homepage and per-category
//!   scopes, persisted defaults on first access)
//! - Script-injection and ad-slot registries with placement filtering
//! - Ad analytics events with filtered summaries and CSV export
//! - Site configuration singleton
//! - Quiz data export/import
//!
//! Public reads go through the best-effort cache in `platform::cache`;
//! admin writes invalidate the affected keys.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


// Re-exports for convenience
pub use error::{QuizError, QuizResult};
pub use infra::postgres::PgQuizRepository;
pub use presentation::router::{admin_quiz_router, public_quiz_router};

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::presentation::dto::*;
}

pub mod store {
    pub use crate::infra::postgres::PgQuizRepository as QuizStore;
}

pub mod router {
    pub use crate::presentation::router::*;
}
