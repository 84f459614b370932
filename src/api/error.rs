use crate::services::gemini::GeminiError;
use crate::services::storage::StorageError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Filename cannot contain path traversal characters")]
    InvalidFilename,

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    PayloadTooLarge(String),

    #[error("{0}")]
    Configuration(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Generation(#[from] GeminiError),
}

/// JSON envelope returned for every failed request.
#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound(name) => {
                AppError::NotFound(format!("File '{}' not found in files directory", name))
            }
            StorageError::Io(e) => AppError::Io(e),
        }
    }
}

impl AppError {
    fn status_and_label(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::InvalidFilename => (StatusCode::BAD_REQUEST, "Invalid filename"),
            AppError::BadRequest(_) => (StatusCode::BAD_REQUEST, "Bad request"),
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "File not found"),
            AppError::PayloadTooLarge(_) => (StatusCode::PAYLOAD_TOO_LARGE, "Payload too large"),
            AppError::Configuration(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Configuration error")
            }
            AppError::Io(_) | AppError::Generation(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, label) = self.status_and_label();
        let message = self.to_string();

        if status.is_server_error() {
            tracing::error!(error = ?self, "{}: {}", label, message);
        }

        let body = Json(ErrorResponse {
            error: label.to_string(),
            message,
        });

        (status, body).into_response()
    }
}
