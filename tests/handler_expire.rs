mod common;

use axum::http::StatusCode;
use ephemeral_links::domain::repositories::LinkRepository;

#[tokio::test]
async fn test_expire_success() {
    let (server, repo) = common::create_test_server();
    let code = common::shorten(&server, "https://example.com", None).await;

    let response = server.patch(&format!("/expire/{}", code)).await;

    response.assert_status_ok();
    let body = response.json::<serde_json::Value>();
    assert_eq!(body["message"], "URL expired manually");
    assert_eq!(body["shortCode"], code.as_str());

    let link = repo.find_by_code(&code).await.unwrap().unwrap();
    assert!(!link.is_active);
}

#[tokio::test]
async fn test_expire_twice_is_idempotent() {
    let (server, repo) = common::create_test_server();
    let code = common::shorten(&server, "https://example.com", None).await;

    server
        .patch(&format!("/expire/{}", code))
        .await
        .assert_status_ok();
    let first = repo.find_by_code(&code).await.unwrap().unwrap();

    server
        .patch(&format!("/expire/{}", code))
        .await
        .assert_status_ok();
    let second = repo.find_by_code(&code).await.unwrap().unwrap();

    assert!(!second.is_active);
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_expire_keeps_expiry_time() {
    let (server, repo) = common::create_test_server();
    let code = common::shorten(&server, "https://example.com", Some(60.0)).await;
    let before = repo.find_by_code(&code).await.unwrap().unwrap();

    server.patch(&format!("/expire/{}", code)).await;

    let after = repo.find_by_code(&code).await.unwrap().unwrap();
    assert_eq!(before.expires_at, after.expires_at);
    assert_eq!(before.created_at, after.created_at);
}

#[tokio::test]
async fn test_expire_not_found() {
    let (server, _repo) = common::create_test_server();

    let response = server.patch("/expire/doesnotexist").await;

    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(
        response.json::<serde_json::Value>()["error"]["message"],
        "URL not found"
    );
}

#[tokio::test]
async fn test_expire_requires_patch() {
    let (server, _repo) = common::create_test_server();
    let code = common::shorten(&server, "https://example.com", None).await;

    let response = server.get(&format!("/expire/{}", code)).await;

    response.assert_status(StatusCode::METHOD_NOT_ALLOWED);
}
