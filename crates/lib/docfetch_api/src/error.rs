//! Application error types.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

/// Top-level message for any request that could not complete.
pub const FETCH_ERROR_MESSAGE: &str = "An error occurred while fetching documents.";

/// Convenience alias for handler return types.
pub type AppResult<T> = Result<T, AppError>;

/// Body of every 500 response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub details: String,
}

impl ErrorResponse {
    pub fn new(details: impl Into<String>) -> Self {
        Self {
            error: FETCH_ERROR_MESSAGE.to_string(),
            details: details.into(),
        }
    }
}

/// Errors that escape the fetch pipeline.
///
/// Upstream and per-record failures never get here; they are part of the
/// 200 response body.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Fetcher(#[from] docfetch_core::FetcherError),

    #[error("{0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        error!("request failed: {self}");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::new(self.to_string())),
        )
            .into_response()
    }
}
