//! Handler for manual link expiry.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::dto::expire::ExpireResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Deactivates a short link before its expiry time.
///
/// # Endpoint
///
/// `PATCH /expire/{code}`
///
/// Idempotent: expiring an already expired link returns the same response.
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist.
pub async fn expire_handler(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<ExpireResponse>, AppError> {
    state.link_service.expire(&code).await?;

    Ok(Json(ExpireResponse::new(code)))
}
