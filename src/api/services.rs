use axum::{Json, extract::Path, extract::State, http::StatusCode, response::IntoResponse};

use super::{
    models::{LinkResponse, ShortenRequest},
    state::AppState,
    validation,
};
use crate::api::error::ApiError;

/// Link creation endpoint (POST /links)
///
/// ## Flow:
/// 1. Validate the candidate URL (scheme http/https, host present; pure parse)
/// 2. Draw random codes and conditionally create the redirect record, bounded
///    by `shortener.max_attempts`
/// 3. Answer 200 with the plain-text short link
///
/// The caller's URL string is persisted verbatim as the redirect target; two
/// requests for the same URL allocate two distinct codes (no idempotency).
/// Validation failures answer 400 with the fixed body `Invalid url
/// parameter.`; store faults answer 500 with no shortener-specific detail.
pub async fn shorten(
    State(state): State<AppState>,
    Json(request): Json<ShortenRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if let Err(err) = validation::validate_target(&request.url) {
        state.metrics.link_rejected();
        tracing::debug!(error = %err, "Rejected target URL");
        return Err(ApiError::InvalidUrl);
    }

    let link = match state.shortener.shorten(&request.url).await {
        Ok(link) => link,
        Err(err) => {
            state.metrics.shorten_failed();
            tracing::error!(error = %err, "Short link allocation failed");
            return Err(err.into());
        }
    };

    state.metrics.code_collisions(u64::from(link.attempts - 1));
    state.metrics.link_created();

    tracing::info!(code = %link.code, attempts = link.attempts, "Short link created");

    Ok((StatusCode::OK, link.short_url))
}

/// Link lookup endpoint (GET /links/{code})
///
/// Reads the record's metadata from the store; the (empty) object body is
/// never fetched. Unknown codes answer 404.
pub async fn get_link(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let record = state
        .storage
        .fetch_redirect(&code)
        .await
        .map_err(|e| {
            tracing::error!(code, error = %e, "Link lookup failed");
            ApiError::Internal(e.to_string())
        })?
        .ok_or_else(|| ApiError::NotFound(format!("link {code}")))?;

    let response = LinkResponse {
        short_url: state.config.shortener.short_url(&code),
        code,
        target_url: record.target,
        created_at: record.created_at,
    };

    Ok((StatusCode::OK, Json(response)))
}

/// Health check endpoint (GET /health)
///
/// Probes the object store with a metadata read; a missing probe key counts
/// as healthy, any other store fault does not. Returns 503 when a component
/// is unhealthy.
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    use std::collections::HashMap;

    let mut components = HashMap::new();

    components.insert("api".to_string(), "healthy".to_string());

    let storage_status = match state.storage.probe().await {
        Ok(()) => "healthy",
        Err(e) => {
            tracing::warn!(error = %e, "Storage health probe failed");
            "unhealthy"
        }
    };
    components.insert("storage".to_string(), storage_status.to_string());

    let all_healthy = components.values().all(|status| status == "healthy");
    let overall_status = if all_healthy { "healthy" } else { "unhealthy" };

    let status_code = if all_healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let response = super::models::HealthResponse {
        status: overall_status.to_string(),
        components,
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    (status_code, Json(response))
}
