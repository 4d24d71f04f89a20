use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::storage::StorageError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("not found")]
    NotFound,

    #[error("database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("spreadsheet error: {0}")]
    Spreadsheet(#[from] rust_xlsxwriter::XlsxError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

// Convenience `Result` type for handlers
pub type ApiResult<T> = std::result::Result<T, ApiError>;

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(message) => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": message })),
            )
                .into_response(),
            ApiError::NotFound => (
                StatusCode::NOT_FOUND,
                Json(json!({ "error": "Not found" })),
            )
                .into_response(),
            ApiError::Database(err) => {
                tracing::error!(error = %err, "database error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Internal server error" })),
                )
                    .into_response()
            }
            ApiError::Spreadsheet(err) => {
                tracing::error!(error = %err, "failed to build workbook");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to generate report" })),
                )
                    .into_response()
            }
            // Storage errors only surface on the upload path; delete paths
            // swallow them after logging.
            ApiError::Storage(StorageError::Sdk { code, message }) => {
                tracing::error!(code = %code, message = %message, "S3 request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({
                        "error": format!("S3 upload failed: {code}"),
                        "details": message,
                    })),
                )
                    .into_response()
            }
            ApiError::Storage(StorageError::Unexpected(message)) => {
                tracing::error!(message = %message, "unexpected storage error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": format!("Upload failed: {message}") })),
                )
                    .into_response()
            }
        }
    }
}
