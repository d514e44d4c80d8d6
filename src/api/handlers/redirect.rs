//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::error::AppError;
use crate::state::AppState;
use crate::utils::location::encode_location;

/// Redirects a short code to its original URL and counts the click.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// # Request Flow
///
/// 1. Atomically increment the click counter if the link is usable
/// 2. Return 307 Temporary Redirect to the stored URL, percent-encoded
///    where it holds characters not allowed in a `Location` header
///
/// # Errors
///
/// Returns 410 Gone if the code is unknown, manually expired, or past its
/// expiry time. The three cases produce the same response.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    let original_url = state.link_service.resolve(&code).await?;

    let location = HeaderValue::try_from(encode_location(&original_url)).map_err(|_| {
        AppError::internal(
            "Stored URL is not a valid Location header",
            json!({ "short_code": code }),
        )
    })?;

    Ok((
        StatusCode::TEMPORARY_REDIRECT,
        [(header::LOCATION, location)],
    )
        .into_response())
}
