#![allow(dead_code)]

use async_trait::async_trait;
use axum::extract::ConnectInfo;
use goodlink::config::Config;
use goodlink::domain::click_event::ClickEvent;
use goodlink::domain::entities::{Link, SubscriptionUpsert};
use goodlink::domain::gateways::{GatewayError, ThreatLookup, ToxicityScore, ToxicityScorer};
use goodlink::domain::repositories::{LinkRepository, SubscriptionRepository};
use goodlink::error::AppError;
use goodlink::infrastructure::cache::MemoryCache;
use goodlink::state::{AppState, Backends};
use serde_json::json;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;
use tower::Layer;

pub const WEBHOOK_SECRET: &str = "whsec-integration";

/// Link store backed by a vector. `fail_with_configuration` makes every call
/// fail the way a missing table would.
#[derive(Default)]
pub struct InMemoryLinks {
    links: Mutex<Vec<Link>>,
    pub fail_with_configuration: bool,
}

impl InMemoryLinks {
    pub fn with_links(links: Vec<Link>) -> Self {
        Self {
            links: Mutex::new(links),
            fail_with_configuration: false,
        }
    }

    pub fn broken() -> Self {
        Self {
            links: Mutex::new(Vec::new()),
            fail_with_configuration: true,
        }
    }

    fn check(&self) -> Result<(), AppError> {
        if self.fail_with_configuration {
            Err(AppError::configuration(
                "Database configuration error",
                json!({ "reason": "relation \"links\" does not exist" }),
            ))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl LinkRepository for InMemoryLinks {
    async fn find_active(&self, slug: &str, domain: &str) -> Result<Option<Link>, AppError> {
        self.check()?;
        Ok(self
            .links
            .lock()
            .unwrap()
            .iter()
            .find(|l| l.slug == slug && l.domain == domain && l.is_active())
            .cloned())
    }

    async fn find_active_by_slug(&self, slug: &str) -> Result<Vec<Link>, AppError> {
        self.check()?;
        Ok(self
            .links
            .lock()
            .unwrap()
            .iter()
            .filter(|l| l.slug == slug && l.is_active())
            .cloned()
            .collect())
    }

    async fn slug_exists(&self, slug: &str, domain: Option<String>) -> Result<bool, AppError> {
        self.check()?;
        Ok(self.links.lock().unwrap().iter().any(|l| {
            l.slug == slug && l.is_active() && domain.as_deref().is_none_or(|d| l.domain == d)
        }))
    }

    async fn ping(&self) -> Result<(), AppError> {
        self.check()
    }
}

#[derive(Default)]
pub struct InMemorySubscriptions {
    pub rows: Mutex<Vec<SubscriptionUpsert>>,
}

#[async_trait]
impl SubscriptionRepository for InMemorySubscriptions {
    async fn upsert(&self, subscription: SubscriptionUpsert) -> Result<(), AppError> {
        let mut rows = self.rows.lock().unwrap();
        rows.retain(|s| s.lemon_subscription_id != subscription.lemon_subscription_id);
        rows.push(subscription);
        Ok(())
    }
}

/// Threat lookup returning a fixed answer.
pub struct StubThreats(pub Result<Vec<String>, GatewayError>);

#[async_trait]
impl ThreatLookup for StubThreats {
    async fn find_threats(&self, _url: &str) -> Result<Vec<String>, GatewayError> {
        self.0.clone()
    }
}

/// Toxicity scorer returning a fixed answer.
pub struct StubToxicity(pub Result<f64, GatewayError>);

#[async_trait]
impl ToxicityScorer for StubToxicity {
    async fn score(&self, _text: &str) -> Result<ToxicityScore, GatewayError> {
        self.0.clone().map(|value| ToxicityScore {
            attribute: "TOXICITY".to_string(),
            value,
        })
    }
}

pub struct TestBackends {
    pub links: Arc<InMemoryLinks>,
    pub subscriptions: Arc<InMemorySubscriptions>,
    pub threats: StubThreats,
    pub toxicity: StubToxicity,
}

impl Default for TestBackends {
    fn default() -> Self {
        Self {
            links: Arc::new(InMemoryLinks::default()),
            subscriptions: Arc::new(InMemorySubscriptions::default()),
            threats: StubThreats(Err(GatewayError::NotConfigured {
                service: "Safe Browsing",
            })),
            toxicity: StubToxicity(Err(GatewayError::NotConfigured {
                service: "Perspective",
            })),
        }
    }
}

pub fn test_config() -> Config {
    Config {
        webhook_secret: Some(WEBHOOK_SECRET.to_string()),
        moderation_max_retries: 0,
        ..Config::default()
    }
}

pub fn create_test_state(
    backends: TestBackends,
    config: &Config,
) -> (AppState, mpsc::Receiver<ClickEvent>) {
    let (tx, rx) = mpsc::channel(100);

    let backends = Backends {
        links: backends.links,
        subscriptions: backends.subscriptions,
        threats: Arc::new(backends.threats),
        toxicity: Arc::new(backends.toxicity),
        cache: Arc::new(MemoryCache::new(100, 60)),
    };

    (AppState::new(backends, tx, config), rx)
}

pub fn link(id: i64, slug: &str, domain: &str, target: &str) -> Link {
    Link::new(id, slug.to_string(), domain.to_string(), target.to_string())
}

/// Inserts `ConnectInfo` so handlers and the peer-IP rate limiter work under
/// the in-process test transport.
#[derive(Clone)]
pub struct MockConnectInfoLayer;

impl<S> Layer<S> for MockConnectInfoLayer {
    type Service = MockConnectInfoService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        MockConnectInfoService { inner }
    }
}

#[derive(Clone)]
pub struct MockConnectInfoService<S> {
    inner: S,
}

impl<S, B> tower::Service<axum::http::Request<B>> for MockConnectInfoService<S>
where
    S: tower::Service<axum::http::Request<B>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    B: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: axum::http::Request<B>) -> Self::Future {
        let addr: SocketAddr = "127.0.0.1:12345".parse().unwrap();
        req.extensions_mut().insert(ConnectInfo(addr));
        self.inner.call(req)
    }
}
