mod common;

use axum::{Router, routing::post};
use axum_test::TestServer;
use common::{StubThreats, TestBackends};
use goodlink::api::handlers::safety_check_handler;
use goodlink::domain::gateways::GatewayError;
use serde_json::{Value, json};

fn server_with(threats: StubThreats) -> TestServer {
    let backends = TestBackends {
        threats,
        ..TestBackends::default()
    };
    let (state, _rx) = common::create_test_state(backends, &common::test_config());
    let app = Router::new()
        .route("/api/safety/check", post(safety_check_handler))
        .with_state(state);

    TestServer::new(app).unwrap()
}

async fn check(server: &TestServer, url: &str) -> Value {
    server
        .post("/api/safety/check")
        .json(&json!({ "url": url }))
        .await
        .json::<Value>()
}

#[tokio::test]
async fn test_safety_check_clean_url() {
    let body = check(&server_with(StubThreats(Ok(vec![]))), "example.com").await;

    assert_eq!(body["isSafe"], true);
    assert_eq!(body["status"], "safe");
    assert_eq!(body["degraded"], false);
    assert_eq!(body["normalizedUrl"], "https://example.com");
}

#[tokio::test]
async fn test_safety_check_flagged_url() {
    let server = server_with(StubThreats(Ok(vec!["SOCIAL_ENGINEERING".to_string()])));
    let body = check(&server, "https://example.com/login").await;

    assert_eq!(body["isSafe"], false);
    assert_eq!(body["status"], "unsafe");
    assert_eq!(body["threats"], json!(["SOCIAL_ENGINEERING"]));
}

#[tokio::test]
async fn test_safety_check_degrades_without_key() {
    let body = check(&server_with(common::TestBackends::default().threats), "example.com").await;

    assert_eq!(body["isSafe"], true);
    assert_eq!(body["degraded"], true);
    assert_eq!(body["status"], "degraded");
    assert!(body["error"].as_str().unwrap().contains("not configured"));
}

#[tokio::test]
async fn test_safety_check_degrades_on_upstream_error() {
    let server = server_with(StubThreats(Err(GatewayError::Http {
        service: "Safe Browsing",
        status: 503,
    })));
    let body = check(&server, "example.com").await;

    assert_eq!(body["isSafe"], true);
    assert_eq!(body["degraded"], true);
}

#[tokio::test]
async fn test_safety_check_invalid_url() {
    let body = check(&server_with(StubThreats(Ok(vec![]))), "http://a.co/<script>").await;

    assert_eq!(body["isSafe"], false);
    assert_eq!(body["status"], "invalid");
    assert!(body["error"].is_string());
}
