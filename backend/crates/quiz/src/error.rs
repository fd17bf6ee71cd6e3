//! Quiz Error Types
//!
//! This module provides quiz-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Quiz-specific result type alias
pub type QuizResult<T> = Result<T, QuizError>;

/// Quiz-specific error variants
#[derive(Debug, Error)]
pub enum QuizError {
    /// Category does not exist
    #[error("Category not found")]
    CategoryNotFound,

    /// Question does not exist
    #[error("Question not found")]
    QuestionNotFound,

    /// Script injection does not exist
    #[error("Script not found")]
    ScriptNotFound,

    /// Ad slot does not exist
    #[error("Ad slot not found")]
    AdSlotNotFound,

    /// A category has no questions to serve
    #[error("No questions found for this category")]
    NoQuestions,

    /// Input validation error
    #[error("{0}")]
    Validation(String),

    /// Malformed filter timestamp
    #[error("Invalid timestamp format")]
    InvalidTimestamp,

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl QuizError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            QuizError::CategoryNotFound
            | QuizError::QuestionNotFound
            | QuizError::ScriptNotFound
            | QuizError::AdSlotNotFound
            | QuizError::NoQuestions => ErrorKind::NotFound,
            QuizError::Validation(_) | QuizError::InvalidTimestamp => ErrorKind::BadRequest,
            QuizError::Database(_) | QuizError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.to_string())
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            QuizError::Database(e) => {
                tracing::error!(error = %e, "Quiz database error");
            }
            QuizError::Internal(msg) => {
                tracing::error!(message = %msg, "Quiz internal error");
            }
            _ => {
                tracing::debug!(error = %self, "Quiz error");
            }
        }
    }
}

impl IntoResponse for QuizError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}
