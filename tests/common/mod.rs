#![allow(dead_code)]

use axum::{Router, routing::get};
use axum_test::TestServer;
use chrono::TimeDelta;
use ephemeral_links::api::handlers::{health_handler, redirect_handler, root_handler};
use ephemeral_links::api::routes::link_routes;
use ephemeral_links::application::services::LinkService;
use ephemeral_links::domain::repositories::LinkRepository;
use ephemeral_links::infrastructure::persistence::InMemoryLinkRepository;
use ephemeral_links::state::AppState;
use ephemeral_links::utils::code_generator::RandomCodeGenerator;
use std::sync::Arc;

pub const BASE_URL: &str = "http://short.test";

/// State backed by a fresh in-memory store. The store handle is returned so
/// tests can inspect raw records.
pub fn create_test_state() -> (AppState, Arc<InMemoryLinkRepository>) {
    let repo = Arc::new(InMemoryLinkRepository::new());
    let state = state_with_repository(repo.clone());
    (state, repo)
}

pub fn state_with_repository(repo: Arc<dyn LinkRepository>) -> AppState {
    let link_service = LinkService::new(
        repo,
        Arc::new(RandomCodeGenerator),
        BASE_URL,
        TimeDelta::minutes(30),
    );

    AppState::new(Arc::new(link_service))
}

/// All public routes, mounted the same way as in the production router.
pub fn create_test_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .merge(link_routes())
        .route("/{code}", get(redirect_handler))
        .with_state(state)
}

pub fn create_test_server() -> (TestServer, Arc<InMemoryLinkRepository>) {
    let (state, repo) = create_test_state();
    let server = TestServer::new(create_test_app(state)).unwrap();
    (server, repo)
}

/// Shortens `url` through the API and returns the short code.
pub async fn shorten(server: &TestServer, url: &str, minutes: Option<f64>) -> String {
    let body = match minutes {
        Some(m) => serde_json::json!({ "originalUrl": url, "expiresInMinutes": m }),
        None => serde_json::json!({ "originalUrl": url }),
    };

    let response = server.post("/shorten").json(&body).await;
    response.assert_status(axum::http::StatusCode::CREATED);

    response.json::<serde_json::Value>()["shortCode"]
        .as_str()
        .unwrap()
        .to_string()
}
