// src/handlers/admin.rs

use std::sync::Arc;

use axum::{
    Json,
    extract::{Multipart, Query, State},
    response::IntoResponse,
};
use serde::Deserialize;

use crate::{
    error::AppError,
    models::{question::ExamQuery, response::ApiResponse},
    services::upload,
    store::QuestionStore,
};

/// Optional query-string fallback for the exam name.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadParams {
    pub exam_name: Option<String>,
}

/// Uploads a CSV file of questions for one exam.
///
/// Expects a multipart form with a `file` part and an `examName` part.
/// The whole file is rejected if any row is invalid.
pub async fn upload_questions(
    State(store): State<Arc<dyn QuestionStore>>,
    Query(params): Query<UploadParams>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let mut file_data: Option<Vec<u8>> = None;
    let mut file_name: Option<String> = None;
    let mut exam_name = params.exam_name;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or("").to_string();

        match name.as_str() {
            "file" => {
                file_name = field.file_name().map(str::to_string);
                file_data = Some(field.bytes().await?.to_vec());
            }
            "examName" => {
                exam_name = Some(field.text().await?);
            }
            _ => {}
        }
    }

    let bytes = file_data.ok_or_else(|| AppError::BadRequest("No file provided".to_string()))?;
    let exam_name = exam_name
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .ok_or_else(|| AppError::BadRequest("Exam name is required".to_string()))?;

    tracing::info!(
        "Question upload '{}' for exam '{}'",
        file_name.as_deref().unwrap_or("unknown"),
        exam_name
    );

    let count = upload::upload_questions(store.as_ref(), &bytes, &exam_name).await?;

    Ok(Json(ApiResponse::success(format!(
        "Uploaded {} questions successfully",
        count
    ))))
}

/// Lists the stored questions of one exam.
pub async fn list_questions(
    State(store): State<Arc<dyn QuestionStore>>,
    Query(query): Query<ExamQuery>,
) -> Result<impl IntoResponse, AppError> {
    let questions = store.list_by_exam(query.exam_name.trim()).await?;
    Ok(Json(questions))
}
