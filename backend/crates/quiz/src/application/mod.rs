//! Application Layer
//!
//! Use cases and application services.

pub mod analytics;
pub mod export_import;
pub mod rewarded;
pub mod select_questions;
pub mod site_config;

// Re-exports
pub use analytics::{AnalyticsSummary, AnalyticsUseCase, RecordEventInput};
pub use export_import::{QuizDataSnapshot, QuizDataTransferUseCase};
pub use rewarded::RewardedConfigUseCase;
pub use select_questions::{QUESTION_SET_SIZE, fixed_length_set};
pub use site_config::SiteConfigUseCase;
