//! Handler for link analytics.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::dto::analytics::AnalyticsResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Returns click analytics for a short code.
///
/// # Endpoint
///
/// `GET /analytics/{code}`
///
/// Read-only: looking at analytics never counts as a click. Expired links
/// are still reported, with `isActive: false`.
///
/// # Response
///
/// ```json
/// {
///   "originalUrl": "https://example.com",
///   "shortCode": "aZ3_k9Q",
///   "clicks": 3,
///   "createdAt": "2026-01-01T12:00:00Z",
///   "expiresAt": "2026-01-01T12:30:00Z",
///   "isActive": true
/// }
/// ```
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist.
pub async fn analytics_handler(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<AnalyticsResponse>, AppError> {
    let analytics = state.link_service.get_analytics(&code).await?;

    Ok(Json(analytics.into()))
}
