// src/store/mod.rs

//! Storage collaborator for uploaded questions.

pub mod postgres;

use async_trait::async_trait;

use crate::{
    error::AppError,
    models::question::{NewQuestion, StoredQuestion},
};

pub use postgres::PgQuestionStore;

#[async_trait]
pub trait QuestionStore: Send + Sync {
    /// Writes every question of one upload for `exam_name`.
    ///
    /// Either all rows are written or none are. Returns the number of rows written.
    async fn save_batch(&self, exam_name: &str, questions: &[NewQuestion]) -> Result<u64, AppError>;

    /// Lists the stored questions of one exam, oldest first.
    async fn list_by_exam(&self, exam_name: &str) -> Result<Vec<StoredQuestion>, AppError>;
}
