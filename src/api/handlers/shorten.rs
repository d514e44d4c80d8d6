//! Handler for link shortening endpoint.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short link that expires after the requested number of minutes.
///
/// # Endpoint
///
/// `POST /shorten`
///
/// # Request Body
///
/// ```json
/// {
///   "originalUrl": "https://example.com/some/long/path",
///   "expiresInMinutes": 15
/// }
/// ```
///
/// `expiresInMinutes` is optional and may be fractional; missing or
/// non-positive values fall back to the configured default (30 minutes).
///
/// # Response (201 Created)
///
/// ```json
/// {
///   "shortUrl": "http://localhost:5000/aZ3_k9Q",
///   "shortCode": "aZ3_k9Q",
///   "expiresAt": "2026-01-01T12:15:00Z"
/// }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request if the body is malformed or `originalUrl` is
/// missing or empty.
pub async fn shorten_handler(
    State(state): State<AppState>,
    payload: Result<Json<ShortenRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ShortenResponse>), AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let original_url = payload.original_url.unwrap_or_default();

    let link = state
        .link_service
        .create_short_link(&original_url, payload.expires_in_minutes)
        .await?;

    let short_url = state.link_service.short_url(&link.short_code);

    Ok((
        StatusCode::CREATED,
        Json(ShortenResponse::new(link, short_url)),
    ))
}
