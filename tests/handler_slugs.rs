mod common;

use axum::{Router, routing::post};
use axum_test::TestServer;
use common::{InMemoryLinks, StubToxicity, TestBackends};
use goodlink::api::handlers::slug_check_handler;
use serde_json::{Value, json};
use std::sync::Arc;

fn server_with(backends: TestBackends) -> TestServer {
    let (state, _rx) = common::create_test_state(backends, &common::test_config());
    let app = Router::new()
        .route("/api/slugs/check", post(slug_check_handler))
        .with_state(state);

    TestServer::new(app).unwrap()
}

fn taken_links() -> Arc<InMemoryLinks> {
    Arc::new(InMemoryLinks::with_links(vec![common::link(
        1,
        "promo1",
        "glynk.to",
        "https://shop.example.com",
    )]))
}

#[tokio::test]
async fn test_slug_check_short_slug() {
    let body = server_with(TestBackends::default())
        .post("/api/slugs/check")
        .json(&json!({ "slug": "ab" }))
        .await
        .json::<Value>();

    assert_eq!(body["isValid"], false);
    assert_eq!(body["isAvailable"], false);
    assert!(body["error"].as_str().unwrap().contains("at least 3"));
    assert!(body["moderation"].is_null());
}

#[tokio::test]
async fn test_slug_check_taken_on_domain() {
    let server = server_with(TestBackends {
        links: taken_links(),
        ..TestBackends::default()
    });

    let body = server
        .post("/api/slugs/check")
        .json(&json!({ "slug": "Promo1", "domain": "glynk.to" }))
        .await
        .json::<Value>();

    assert_eq!(body["isValid"], true);
    assert_eq!(body["isAvailable"], false);
    assert_eq!(body["normalizedSlug"], "promo1");
    assert_eq!(body["error"], "This slug is already taken");

    let body = server
        .post("/api/slugs/check")
        .json(&json!({ "slug": "promo1", "domain": "links.acme.com" }))
        .await
        .json::<Value>();

    assert_eq!(body["isAvailable"], true);
}

#[tokio::test]
async fn test_slug_check_fails_open_without_moderation() {
    let body = server_with(TestBackends::default())
        .post("/api/slugs/check")
        .json(&json!({ "slug": "spring-sale" }))
        .await
        .json::<Value>();

    assert_eq!(body["isValid"], true);
    assert_eq!(body["isAvailable"], true);
    assert_eq!(body["isSafe"], true);
    assert_eq!(body["moderation"]["status"], "uncertain");
    assert!(body["error"].is_null());
}

#[tokio::test]
async fn test_slug_check_blocked_term() {
    let body = server_with(TestBackends::default())
        .post("/api/slugs/check")
        .json(&json!({ "slug": "kill-them" }))
        .await
        .json::<Value>();

    assert_eq!(body["isSafe"], false);
    assert_eq!(body["moderation"]["status"], "blocked");
    assert!(body["error"].as_str().unwrap().contains("blocked term"));
}

#[tokio::test]
async fn test_slug_check_toxicity_scores() {
    let body = server_with(TestBackends {
        toxicity: StubToxicity(Ok(0.95)),
        ..TestBackends::default()
    })
    .post("/api/slugs/check")
    .json(&json!({ "slug": "summer-deals" }))
    .await
    .json::<Value>();
    assert_eq!(body["isSafe"], false);
    assert_eq!(body["moderation"]["status"], "blocked");

    let body = server_with(TestBackends {
        toxicity: StubToxicity(Ok(0.05)),
        ..TestBackends::default()
    })
    .post("/api/slugs/check")
    .json(&json!({ "slug": "summer-deals" }))
    .await
    .json::<Value>();
    assert_eq!(body["isSafe"], true);
    assert_eq!(body["moderation"]["status"], "allowed");
}

#[tokio::test]
async fn test_slug_check_database_failure() {
    let response = server_with(TestBackends {
        links: Arc::new(InMemoryLinks::broken()),
        ..TestBackends::default()
    })
    .post("/api/slugs/check")
    .json(&json!({ "slug": "spring-sale" }))
    .await;

    assert_eq!(response.status_code(), 500);
    assert_eq!(
        response.json::<Value>()["error"]["code"],
        "configuration_error"
    );
}
