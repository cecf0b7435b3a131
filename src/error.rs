use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

/// Everything a request handler can fail with. Converted to a structured
/// `{"error": ...}` body at the HTTP boundary; never fatal to the process.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid YouTube URL: {0}")]
    InvalidReference(String),

    #[error("{0}")]
    Validation(String),

    #[error("extraction failed: {0}")]
    ExtractionFailure(String),

    #[error("encoding failed: {0}")]
    EncodingFailure(String),

    #[error("{0} not found")]
    NotFound(String),

    #[error("storage failure: {0}")]
    StorageFailure(#[from] std::io::Error),
}

impl ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidReference(_) | ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::ExtractionFailure(_)
            | ApiError::EncodingFailure(_)
            | ApiError::StorageFailure(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}
