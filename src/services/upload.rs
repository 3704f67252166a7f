// src/services/upload.rs

use crate::{
    error::AppError,
    models::question::{NewQuestion, QuestionRecord},
    services::{csv_parser::parse_questions, validation::validate_question},
    store::QuestionStore,
};

/// Validates `records` in file order, stopping at the first invalid one.
///
/// Row numbers in error messages are 1-based and count data rows only.
pub fn validate_batch(records: &[QuestionRecord]) -> Result<Vec<NewQuestion>, AppError> {
    records
        .iter()
        .enumerate()
        .map(|(index, record)| {
            validate_question(record)
                .map_err(|reason| AppError::Validation(format!("Row {}: {}", index + 1, reason)))
        })
        .collect()
}

/// Parses, validates and stores one uploaded CSV file for `exam_name`.
///
/// Nothing is written unless every row is valid. Returns the number of stored questions.
pub async fn upload_questions(
    store: &dyn QuestionStore,
    bytes: &[u8],
    exam_name: &str,
) -> Result<u64, AppError> {
    let records = parse_questions(bytes)?;
    tracing::info!(
        "Parsed {} rows for exam '{}' ({} bytes)",
        records.len(),
        exam_name,
        bytes.len()
    );

    let questions = validate_batch(&records)?;
    if questions.is_empty() {
        return Ok(0);
    }

    let written = store.save_batch(exam_name, &questions).await?;
    tracing::info!("Stored {} questions for exam '{}'", written, exam_name);

    Ok(written)
}
