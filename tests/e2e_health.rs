//! E2E tests for the root route, fallback and basic server functionality

mod common;

use common::TestServer;
use serde_json::{Value, json};

#[tokio::test]
async fn test_welcome_message() {
    let server = TestServer::new().await;

    let response = server.client.get(server.url("/")).send().await.unwrap();

    assert_eq!(response.status(), 200);
    let json: Value = response.json().await.unwrap();
    assert_eq!(json, json!({ "message": "Welcome to the REST API project!" }));
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let server = TestServer::new().await;

    for path in ["/nope", "/api/nope", "/api/users/1/courses"] {
        let response = server.client.get(server.url(path)).send().await.unwrap();

        assert_eq!(response.status(), 404, "{path}");
        let json: Value = response.json().await.unwrap();
        assert_eq!(json, json!({ "message": "Route Not Found" }));
    }
}

#[tokio::test]
async fn test_metrics_endpoint() {
    let server = TestServer::new().await;

    let response = server
        .client
        .get(server.url("/metrics"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let content_type = response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(content_type.starts_with("text/plain"), "{content_type}");
}

#[tokio::test]
async fn test_cors_headers() {
    let server = TestServer::new().await;

    let response = server
        .client
        .get(server.url("/api/courses"))
        .header("Origin", "https://test.example.com")
        .send()
        .await
        .unwrap();

    assert!(
        response
            .headers()
            .contains_key("access-control-allow-origin")
    );
}
