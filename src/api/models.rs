//! API models for the shorten and lookup endpoints.
//!
//! The external contract is deliberately small:
//! - `POST /links` accepts a [`ShortenRequest`] and answers with the bare
//!   short link as plain text (`<public_base_url>/<code>`).
//! - `GET /links/{code}` answers with a [`LinkResponse`] describing the
//!   stored record.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Deserialize, Clone)]
pub struct ShortenRequest {
    pub url: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LinkResponse {
    pub code: String,
    pub target_url: String,
    pub short_url: String,
    #[serde(with = "chrono::serde::ts_seconds")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub code: &'static str,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub components: HashMap<String, String>,
    pub version: String,
}
