use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::completion_client::CompletionError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Every variant renders as `{ "success": false, "error": <message> }`.
/// Diagnostic `details` are attached only through `to_response(true)`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Too many requests")]
    TooManyRequests,

    #[error("Completion error: {0}")]
    Completion(#[from] CompletionError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Renders the error envelope, optionally with the underlying error text.
    pub fn to_response(&self, include_details: bool) -> Response {
        let (status, message) = match self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::TooManyRequests => (
                StatusCode::TOO_MANY_REQUESTS,
                "Too many requests, please try again later".to_string(),
            ),
            AppError::Completion(e) => completion_status(e),
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let mut body = json!({
            "success": false,
            "error": message,
        });
        if include_details {
            body["details"] = json!(self.to_string());
        }

        (status, Json(body)).into_response()
    }
}

fn completion_status(e: &CompletionError) -> (StatusCode, String) {
    match e {
        CompletionError::MissingApiKey => {
            tracing::error!("Completion API key is not configured");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Scholarship search service is not configured".to_string(),
            )
        }
        CompletionError::Unauthorized => {
            tracing::error!("Completion API rejected credentials");
            (
                StatusCode::UNAUTHORIZED,
                "Authentication with the search service failed".to_string(),
            )
        }
        CompletionError::RateLimited => (
            StatusCode::TOO_MANY_REQUESTS,
            "Search service is busy, please try again shortly".to_string(),
        ),
        CompletionError::Timeout => (
            StatusCode::GATEWAY_TIMEOUT,
            "Search timed out, please try again".to_string(),
        ),
        other => {
            tracing::error!("Completion error: {other}");
            (
                StatusCode::BAD_GATEWAY,
                "Failed to fetch scholarships from the search service".to_string(),
            )
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.to_response(false)
    }
}
