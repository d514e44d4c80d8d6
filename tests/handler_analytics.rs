mod common;

use axum::http::StatusCode;
use chrono::{DateTime, Utc};

#[tokio::test]
async fn test_analytics_fresh_link() {
    let (server, _repo) = common::create_test_server();
    let code = common::shorten(&server, "https://example.com/page", Some(15.0)).await;

    let response = server.get(&format!("/analytics/{}", code)).await;

    response.assert_status_ok();

    let body = response.json::<serde_json::Value>();
    assert_eq!(body["originalUrl"], "https://example.com/page");
    assert_eq!(body["shortCode"], code.as_str());
    assert_eq!(body["clicks"], 0);
    assert_eq!(body["isActive"], true);

    let created_at: DateTime<Utc> = body["createdAt"].as_str().unwrap().parse().unwrap();
    let expires_at: DateTime<Utc> = body["expiresAt"].as_str().unwrap().parse().unwrap();
    assert_eq!((expires_at - created_at).num_minutes(), 15);
}

#[tokio::test]
async fn test_analytics_counts_redirects_but_not_itself() {
    let (server, _repo) = common::create_test_server();
    let code = common::shorten(&server, "https://example.com", None).await;

    server.get(&format!("/{}", code)).await;
    server.get(&format!("/analytics/{}", code)).await;

    let body = server
        .get(&format!("/analytics/{}", code))
        .await
        .json::<serde_json::Value>();

    assert_eq!(body["clicks"], 1);
}

#[tokio::test]
async fn test_analytics_reports_manual_expiry() {
    let (server, _repo) = common::create_test_server();
    let code = common::shorten(&server, "https://example.com", None).await;
    server.get(&format!("/{}", code)).await;
    server.patch(&format!("/expire/{}", code)).await;

    let response = server.get(&format!("/analytics/{}", code)).await;

    response.assert_status_ok();
    let body = response.json::<serde_json::Value>();
    assert_eq!(body["isActive"], false);
    assert_eq!(body["clicks"], 1);
}

#[tokio::test]
async fn test_analytics_reports_time_expiry() {
    let (server, _repo) = common::create_test_server();
    let code = common::shorten(&server, "https://example.com", Some(0.01)).await;

    tokio::time::sleep(std::time::Duration::from_millis(700)).await;

    let response = server.get(&format!("/analytics/{}", code)).await;

    response.assert_status_ok();
    assert_eq!(response.json::<serde_json::Value>()["isActive"], false);
}

#[tokio::test]
async fn test_analytics_not_found() {
    let (server, _repo) = common::create_test_server();

    let response = server.get("/analytics/doesnotexist").await;

    response.assert_status(StatusCode::NOT_FOUND);
    let body = response.json::<serde_json::Value>();
    assert_eq!(body["error"]["code"], "not_found");
    assert_eq!(body["error"]["message"], "URL not found");
}
