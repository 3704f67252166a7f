// src/store/postgres.rs

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};

use super::QuestionStore;
use crate::{
    error::AppError,
    models::question::{NewQuestion, StoredQuestion},
};

/// `QuestionStore` backed by the Postgres `questions` table.
#[derive(Clone)]
pub struct PgQuestionStore {
    pool: PgPool,
}

impl PgQuestionStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

async fn insert_question(
    tx: &mut Transaction<'_, Postgres>,
    exam_name: &str,
    question: &NewQuestion,
) -> Result<i64, sqlx::Error> {
    let (id,): (i64,) = sqlx::query_as(
        r#"
        INSERT INTO questions
        (exam_name, question, option1, option2, option3, option4,
         correct_answer, answer_description, category, level, question_type)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
        RETURNING id
        "#,
    )
    .bind(exam_name)
    .bind(&question.question)
    .bind(&question.option1)
    .bind(&question.option2)
    .bind(&question.option3)
    .bind(&question.option4)
    .bind(&question.correct_answer)
    .bind(&question.answer_description)
    .bind(&question.category)
    .bind(&question.level)
    .bind(&question.question_type)
    .fetch_one(&mut **tx)
    .await?;

    Ok(id)
}

#[async_trait]
impl QuestionStore for PgQuestionStore {
    async fn save_batch(&self, exam_name: &str, questions: &[NewQuestion]) -> Result<u64, AppError> {
        let mut tx = self.pool.begin().await?;

        let mut written = 0;
        for question in questions {
            let id = insert_question(&mut tx, exam_name, question)
                .await
                .map_err(|e| {
                    tracing::error!("Failed to insert question for exam '{}': {:?}", exam_name, e);
                    AppError::from(e)
                })?;
            tracing::debug!("Inserted question {} for exam '{}'", id, exam_name);
            written += 1;
        }

        tx.commit().await?;
        Ok(written)
    }

    async fn list_by_exam(&self, exam_name: &str) -> Result<Vec<StoredQuestion>, AppError> {
        let questions = sqlx::query_as::<_, StoredQuestion>(
            r#"
            SELECT
                id, exam_name, question, option1, option2, option3, option4,
                correct_answer, answer_description, category, level, question_type,
                created_at
            FROM questions
            WHERE exam_name = $1
            ORDER BY id
            "#,
        )
        .bind(exam_name)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list questions: {:?}", e);
            AppError::InternalServerError(e.to_string())
        })?;

        Ok(questions)
    }
}
