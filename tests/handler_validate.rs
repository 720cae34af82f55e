mod common;

use axum::{Router, routing::post};
use axum_test::TestServer;
use common::TestBackends;
use goodlink::api::handlers::{validate_domain_handler, validate_url_handler};
use serde_json::{Value, json};

fn server() -> TestServer {
    let (state, _rx) = common::create_test_state(TestBackends::default(), &common::test_config());
    let app = Router::new()
        .route("/api/validate/domain", post(validate_domain_handler))
        .route("/api/validate/url", post(validate_url_handler))
        .with_state(state);

    TestServer::new(app).unwrap()
}

#[tokio::test]
async fn test_validate_domain_sanitizes() {
    let response = server()
        .post("/api/validate/domain")
        .json(&json!({ "domain": "https://WWW.Example.COM/path" }))
        .await;

    response.assert_status_ok();
    let body = response.json::<Value>();
    assert_eq!(body["isValid"], true);
    assert_eq!(body["sanitized"], "www.example.com");
    assert!(body["error"].is_null());
}

#[tokio::test]
async fn test_validate_domain_rejects_reserved() {
    let server = server();

    for domain in ["glynk.to", "go.goodlink.ai"] {
        let body = server
            .post("/api/validate/domain")
            .json(&json!({ "domain": domain }))
            .await
            .json::<Value>();

        assert_eq!(body["isValid"], false, "domain {domain}");
        assert!(body["error"].as_str().unwrap().contains("reserved"));
    }
}

#[tokio::test]
async fn test_validate_domain_ip_requires_option() {
    let server = server();

    let body = server
        .post("/api/validate/domain")
        .json(&json!({ "domain": "10.0.0.1" }))
        .await
        .json::<Value>();
    assert_eq!(body["isValid"], false);
    assert!(body["error"].as_str().unwrap().contains("IP addresses"));

    let body = server
        .post("/api/validate/domain")
        .json(&json!({ "domain": "10.0.0.1", "options": { "allowIP": true } }))
        .await
        .json::<Value>();
    assert_eq!(body["isValid"], true);
    assert_eq!(body["sanitized"], "10.0.0.1");
}

#[tokio::test]
async fn test_validate_domain_rejects_oversized_input() {
    let response = server()
        .post("/api/validate/domain")
        .json(&json!({ "domain": "a".repeat(3000) }))
        .await;

    assert_eq!(response.status_code(), 400);
    let body = response.json::<Value>();
    assert_eq!(body["error"]["code"], "validation_error");
    assert!(body["error"]["details"]["fields"]["domain"].is_array());
}

#[tokio::test]
async fn test_validate_url_prepends_scheme() {
    let body = server()
        .post("/api/validate/url")
        .json(&json!({ "url": "example.com" }))
        .await
        .json::<Value>();

    assert_eq!(body["isValid"], true);
    assert_eq!(body["normalizedUrl"], "https://example.com");
}

#[tokio::test]
async fn test_validate_url_rejects_markup() {
    let body = server()
        .post("/api/validate/url")
        .json(&json!({ "url": "http://a.co/<script>" }))
        .await
        .json::<Value>();

    assert_eq!(body["isValid"], false);
    assert!(body["normalizedUrl"].is_null());
    assert!(body["error"].as_str().unwrap().contains("invalid character"));
}
