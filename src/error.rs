// src/error.rs

use axum::{
    Json,
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::fmt;

use crate::models::response::ApiResponse;

/// Global Application Error Enum.
/// Every variant is rendered as an `ApiResponse` with `success: false`.
#[derive(Debug)]
pub enum AppError {
    // 400 Bad Request: a row broke a question rule
    Validation(String),

    // 400 Bad Request: missing form parts, blank exam name
    BadRequest(String),

    // 413 Payload Too Large: upload over the configured body limit
    PayloadTooLarge(String),

    // 500 Internal Server Error: unreadable or malformed CSV
    Csv(String),

    // 500 Internal Server Error
    InternalServerError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Validation(msg)
            | AppError::BadRequest(msg)
            | AppError::PayloadTooLarge(msg) => write!(f, "{}", msg),
            AppError::Csv(msg) | AppError::InternalServerError(msg) => {
                write!(f, "An error occurred: {}", msg)
            }
        }
    }
}

impl std::error::Error for AppError {}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::Csv(_) | AppError::InternalServerError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

/// Converts the error into the `{message, success}` JSON body with the matching status code.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            AppError::Csv(msg) => tracing::error!("Failed to read CSV upload: {}", msg),
            AppError::InternalServerError(msg) => tracing::error!("Internal Server Error: {}", msg),
            AppError::Validation(msg) => tracing::warn!("Rejected upload: {}", msg),
            AppError::BadRequest(_) | AppError::PayloadTooLarge(_) => {}
        }

        (status, Json(ApiResponse::failure(self.to_string()))).into_response()
    }
}

/// Converts `sqlx::Error` into `AppError::InternalServerError`.
/// Allows using `?` operator on database queries.
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::InternalServerError(err.to_string())
    }
}

impl From<csv::Error> for AppError {
    fn from(err: csv::Error) -> Self {
        AppError::Csv(err.to_string())
    }
}

/// Keeps the client-side statuses axum reports for a multipart body;
/// anything else means the upload stream could not be read.
impl From<MultipartError> for AppError {
    fn from(err: MultipartError) -> Self {
        multipart_error(err.status(), err.body_text())
    }
}

fn multipart_error(status: StatusCode, detail: String) -> AppError {
    match status {
        StatusCode::PAYLOAD_TOO_LARGE => {
            AppError::PayloadTooLarge(format!("Upload too large: {}", detail))
        }
        s if s.is_client_error() => AppError::BadRequest(format!("Multipart error: {}", detail)),
        _ => AppError::InternalServerError(format!("Failed to read upload: {}", detail)),
    }
}
