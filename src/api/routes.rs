//! API route configuration.

use crate::api::handlers::{analytics_handler, expire_handler, shorten_handler};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, patch, post},
};

/// Link lifecycle routes.
///
/// # Endpoints
///
/// - `POST  /shorten`           - Create a short link
/// - `GET   /analytics/{code}`  - Click analytics for a link
/// - `PATCH /expire/{code}`     - Expire a link manually
pub fn link_routes() -> Router<AppState> {
    Router::new()
        .route("/shorten", post(shorten_handler))
        .route("/analytics/{code}", get(analytics_handler))
        .route("/expire/{code}", patch(expire_handler))
}
