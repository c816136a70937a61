// src/error.rs
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Request-level failures of the relay endpoint.
///
/// The two validation variants are client-caused and come back as 400 with a
/// plain-text message; anything the upstream call raises comes back as 500
/// carrying the underlying message. Single attempt, fail fast.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("request body is missing")]
    MissingBody,

    #[error("invalid messages: {0}")]
    InvalidMessages(String),

    #[error("upstream generation failed: {0}")]
    UpstreamFailure(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::MissingBody | AppError::InvalidMessages(_) => StatusCode::BAD_REQUEST,
            AppError::UpstreamFailure(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, self.to_string()).into_response()
    }
}
