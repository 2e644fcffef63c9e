use axum::{Json, http::StatusCode, response::IntoResponse};
use serde_json::json;
use thiserror::Error;

use super::models::ErrorResponse;
use crate::shortener::ShortenError;

/// Body returned for rejected target URLs. Fixed contract text; clients match
/// on it.
pub const INVALID_URL_BODY: &str = "Invalid url parameter.";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid url parameter")]
    InvalidUrl,
    #[error("no free short code after {0} attempts")]
    AllocationExhausted(u32),
    #[error("resource not found: {0}")]
    NotFound(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidUrl => StatusCode::BAD_REQUEST,
            ApiError::AllocationExhausted(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ApiError::InvalidUrl => "INVALID_URL",
            ApiError::AllocationExhausted(_) => "ALLOCATION_EXHAUSTED",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        // The invalid-url response is plain text with a fixed body; everything
        // else uses the structured error shape.
        if matches!(self, ApiError::InvalidUrl) {
            return (StatusCode::BAD_REQUEST, INVALID_URL_BODY).into_response();
        }

        let status = self.status_code();
        let body = ErrorResponse {
            code: self.code(),
            message: match &self {
                // Store fault details are logged, never surfaced
                ApiError::Internal(_) => "internal error".to_string(),
                other => other.to_string(),
            },
        };

        (status, Json(json!(body))).into_response()
    }
}

impl From<ShortenError> for ApiError {
    fn from(value: ShortenError) -> Self {
        match value {
            ShortenError::Exhausted { attempts } => ApiError::AllocationExhausted(attempts),
            ShortenError::Storage(e) => ApiError::Internal(e.to_string()),
        }
    }
}
