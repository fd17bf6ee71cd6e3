//! Quiz Data Export / Import
//!
//! Export snapshots all categories and questions; import replaces both
//! collections wholesale. The replace is not transactional: a failure
//! mid-import leaves a partial state and surfaces as an internal error.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::domain::entity::category::QuizCategory;
use crate::domain::entity::question::QuizQuestion;
use crate::domain::repository::{CategoryRepository, QuestionRepository};
use crate::error::QuizResult;

/// Full content snapshot
pub struct QuizDataSnapshot {
    pub categories: Vec<QuizCategory>,
    pub questions: Vec<QuizQuestion>,
    pub export_date: DateTime<Utc>,
}

/// Export/import use case
pub struct QuizDataTransferUseCase<R>
where
    R: CategoryRepository + QuestionRepository,
{
    repo: Arc<R>,
}

impl<R> QuizDataTransferUseCase<R>
where
    R: CategoryRepository + QuestionRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Snapshot all categories and questions
    pub async fn export(&self) -> QuizResult<QuizDataSnapshot> {
        let categories = self.repo.list_categories().await?;
        let questions = self.repo.list_questions(None, None).await?;

        Ok(QuizDataSnapshot {
            categories,
            questions,
            export_date: Utc::now(),
        })
    }

    /// Replace ALL stored categories and questions with the given set
    pub async fn import(
        &self,
        categories: Vec<QuizCategory>,
        questions: Vec<QuizQuestion>,
    ) -> QuizResult<(usize, usize)> {
        let removed_questions = self.repo.delete_all_questions().await?;
        let removed_categories = self.repo.delete_all_categories().await?;

        tracing::info!(
            removed_categories,
            removed_questions,
            "Cleared existing quiz data for import"
        );

        for category in &categories {
            self.repo.create_category(category).await?;
        }
        for question in &questions {
            self.repo.create_question(question).await?;
        }

        tracing::info!(
            categories = categories.len(),
            questions = questions.len(),
            "Quiz data import completed"
        );

        Ok((categories.len(), questions.len()))
    }
}
