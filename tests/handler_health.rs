mod common;

use async_trait::async_trait;
use axum::http::StatusCode;
use axum_test::TestServer;
use chrono::{DateTime, Utc};
use ephemeral_links::domain::entities::{LinkSummary, NewShortLink, ShortLink};
use ephemeral_links::domain::repositories::LinkRepository;
use ephemeral_links::error::AppError;
use serde_json::json;
use std::sync::Arc;

/// Store whose every call fails, as if the database were down.
struct UnreachableRepository;

fn unreachable() -> AppError {
    AppError::storage("Database error", json!({}))
}

#[async_trait]
impl LinkRepository for UnreachableRepository {
    async fn create(&self, _new_link: NewShortLink) -> Result<ShortLink, AppError> {
        Err(unreachable())
    }

    async fn find_by_code(&self, _code: &str) -> Result<Option<ShortLink>, AppError> {
        Err(unreachable())
    }

    async fn record_click(
        &self,
        _code: &str,
        _now: DateTime<Utc>,
    ) -> Result<Option<String>, AppError> {
        Err(unreachable())
    }

    async fn deactivate(&self, _code: &str) -> Result<bool, AppError> {
        Err(unreachable())
    }

    async fn summary(&self, _now: DateTime<Utc>) -> Result<LinkSummary, AppError> {
        Err(unreachable())
    }

    async fn ping(&self) -> Result<(), AppError> {
        Err(unreachable())
    }
}

fn unreachable_server() -> TestServer {
    let state = common::state_with_repository(Arc::new(UnreachableRepository));
    TestServer::new(common::create_test_app(state)).unwrap()
}

#[tokio::test]
async fn test_root_status() {
    let (server, _repo) = common::create_test_server();

    let response = server.get("/").await;

    response.assert_status_ok();
    response.assert_json(&json!({ "status": "API running" }));
}

#[tokio::test]
async fn test_health_endpoint_success() {
    let (server, _repo) = common::create_test_server();

    let response = server.get("/health").await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
    assert_eq!(json["checks"]["storage"]["status"], "ok");
}

#[tokio::test]
async fn test_health_endpoint_degraded() {
    let server = unreachable_server();

    let response = server.get("/health").await;

    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["checks"]["storage"]["status"], "error");
    assert!(json["checks"]["storage"]["message"].is_string());
}

#[tokio::test]
async fn test_storage_failure_is_internal_error() {
    let server = unreachable_server();

    let response = server
        .post("/shorten")
        .json(&json!({ "originalUrl": "https://example.com" }))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "storage_error");
    assert_eq!(json["error"]["details"], json!({}));
}
