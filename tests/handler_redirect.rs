mod common;

use axum::{Router, routing::get};
use axum_test::TestServer;
use common::{InMemoryLinks, MockConnectInfoLayer, TestBackends};
use goodlink::api::handlers::redirect_handler;
use goodlink::config::Config;
use goodlink::domain::click_event::ClickEvent;
use std::sync::Arc;
use tokio::sync::mpsc;

fn server_with(links: InMemoryLinks, config: &Config) -> (TestServer, mpsc::Receiver<ClickEvent>) {
    let backends = TestBackends {
        links: Arc::new(links),
        ..TestBackends::default()
    };
    let (state, rx) = common::create_test_state(backends, config);

    let app = Router::new()
        .route("/{slug}", get(redirect_handler))
        .layer(MockConnectInfoLayer)
        .with_state(state);

    (TestServer::new(app).unwrap(), rx)
}

fn campaign_links() -> InMemoryLinks {
    InMemoryLinks::with_links(vec![
        common::link(1, "promo1", "glynk.to", "https://shop.example.com")
            .with_utm_source("ig")
            .with_pass_through(true),
        common::link(2, "spring", "links.acme.com", "https://acme.com/sale?lang=en")
            .with_utm_campaign("spring"),
        common::link(3, "retired", "glynk.to", "https://example.com/old").with_status(Some(false)),
        common::link(4, "broken", "glynk.to", "not a url"),
    ])
}

#[tokio::test]
async fn test_redirect_applies_utm_and_pass_through() {
    let (server, mut rx) = server_with(campaign_links(), &common::test_config());

    let response = server
        .get("/promo1?ref=abc&utm_source=override")
        .add_header("Host", "glynk.to")
        .await;

    assert_eq!(response.status_code(), 301);
    let location = response.header("location");
    assert_eq!(location, "https://shop.example.com/?utm_source=ig&ref=abc");

    let event = rx.try_recv().expect("click event queued");
    assert_eq!(event.link_id, 1);
    assert_eq!(event.slug, "promo1");
    assert_eq!(event.domain, "glynk.to");
    assert_eq!(event.ip.as_deref(), Some("127.0.0.1"));
}

#[tokio::test]
async fn test_redirect_without_pass_through_drops_inbound_query() {
    let (server, _rx) = server_with(campaign_links(), &common::test_config());

    let response = server
        .get("/spring?ref=abc")
        .add_header("Host", "links.acme.com")
        .await;

    assert_eq!(response.status_code(), 301);
    let location = response.header("location");
    assert_eq!(location, "https://acme.com/sale?lang=en&utm_campaign=spring");
}

#[tokio::test]
async fn test_redirect_normalizes_host_and_slug() {
    let (server, _rx) = server_with(campaign_links(), &common::test_config());

    let response = server
        .get("/PROMO1")
        .add_header("Host", "WWW.Glynk.to:443")
        .await;

    assert_eq!(response.status_code(), 301);
}

#[tokio::test]
async fn test_redirect_not_found() {
    let (server, mut rx) = server_with(campaign_links(), &common::test_config());

    let response = server
        .get("/nonexistent")
        .add_header("Host", "glynk.to")
        .await;

    assert_eq!(response.status_code(), 404);
    assert_eq!(response.text(), "Link not found");
    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn test_redirect_rejects_malformed_slug() {
    let (server, _rx) = server_with(campaign_links(), &common::test_config());

    for path in ["/ab", "/index.html", "/promo_1"] {
        let response = server.get(path).add_header("Host", "glynk.to").await;
        assert_eq!(response.status_code(), 404, "path {path}");
    }
}

#[tokio::test]
async fn test_redirect_inactive_link_is_not_found() {
    let (server, _rx) = server_with(campaign_links(), &common::test_config());

    let response = server.get("/retired").add_header("Host", "glynk.to").await;

    assert_eq!(response.status_code(), 404);
}

#[tokio::test]
async fn test_redirect_other_domain_requires_loose_fallback() {
    let (server, _rx) = server_with(campaign_links(), &common::test_config());
    let response = server.get("/promo1").add_header("Host", "other.example").await;
    assert_eq!(response.status_code(), 404);

    let config = Config {
        loose_slug_fallback: true,
        ..common::test_config()
    };
    let (server, _rx) = server_with(campaign_links(), &config);
    let response = server.get("/promo1").add_header("Host", "other.example").await;
    assert_eq!(response.status_code(), 301);
    assert_eq!(response.header("location"), "https://shop.example.com/?utm_source=ig");
}

#[tokio::test]
async fn test_redirect_configuration_error() {
    let (server, _rx) = server_with(InMemoryLinks::broken(), &common::test_config());

    let response = server.get("/promo1").add_header("Host", "glynk.to").await;

    assert_eq!(response.status_code(), 500);
    assert_eq!(response.text(), "Service configuration error");
}

#[tokio::test]
async fn test_redirect_invalid_stored_target() {
    let (server, _rx) = server_with(campaign_links(), &common::test_config());

    let response = server.get("/broken").add_header("Host", "glynk.to").await;

    assert_eq!(response.status_code(), 500);
    assert_eq!(response.text(), "Internal server error");
}
