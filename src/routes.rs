//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET   /`                  - Liveness status
//! - `GET   /health`            - Health check with storage probe
//! - `POST  /shorten`           - Create a short link
//! - `GET   /analytics/{code}`  - Click analytics
//! - `PATCH /expire/{code}`     - Manual expiry
//! - `GET   /{code}`            - Short link redirect
//!
//! Static segments take priority over `/{code}`, and generated codes never
//! collide with them.
//!
//! # Middleware
//!
//! - **CORS** - Browser access (any origin, or a configured allow-list)
//! - **Tracing** - Structured request/response logging
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::{health_handler, redirect_handler, root_handler};
use crate::api::middleware::{cors, tracing};
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `cors_allowed_origins` - origins allowed for browser requests; empty
///   means any origin
pub fn app_router(state: AppState, cors_allowed_origins: &[String]) -> NormalizePath<Router> {
    let router = Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .merge(api::routes::link_routes())
        .route("/{code}", get(redirect_handler))
        .with_state(state)
        .layer(cors::layer(cors_allowed_origins))
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::LinkService;
    use crate::domain::repositories::LinkRepository;
    use crate::infrastructure::persistence::InMemoryLinkRepository;
    use crate::utils::code_generator::RandomCodeGenerator;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use chrono::TimeDelta;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn app() -> NormalizePath<Router> {
        let repository: Arc<dyn LinkRepository> = Arc::new(InMemoryLinkRepository::new());
        let link_service = LinkService::new(
            repository,
            Arc::new(RandomCodeGenerator),
            "http://localhost:5000",
            TimeDelta::minutes(30),
        );
        app_router(AppState::new(Arc::new(link_service)), &[])
    }

    async fn status_of(method: &str, uri: &str) -> StatusCode {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap();

        app().oneshot(request).await.unwrap().status()
    }

    #[tokio::test]
    async fn test_trailing_slash_is_trimmed() {
        assert_eq!(status_of("GET", "/health/").await, StatusCode::OK);
        assert_eq!(
            status_of("GET", "/analytics/missing/").await,
            StatusCode::NOT_FOUND
        );
    }

    #[tokio::test]
    async fn test_static_routes_win_over_code() {
        assert_eq!(status_of("GET", "/").await, StatusCode::OK);
        assert_eq!(status_of("GET", "/health").await, StatusCode::OK);
        assert_eq!(
            status_of("GET", "/shorten").await,
            StatusCode::METHOD_NOT_ALLOWED
        );
        assert_eq!(status_of("GET", "/unknown1").await, StatusCode::GONE);
    }

    #[tokio::test]
    async fn test_bare_api_words_fall_through_to_code() {
        assert_eq!(status_of("GET", "/analytics").await, StatusCode::GONE);
        assert_eq!(status_of("GET", "/expire").await, StatusCode::GONE);
    }
}
