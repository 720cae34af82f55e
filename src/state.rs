//! Shared application state injected into every handler.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;

use crate::application::services::{
    BlockedTerms, ModerationService, ModerationSettings, RedirectService, SafetyService,
    SlugService, WebhookService,
};
use crate::config::Config;
use crate::domain::click_event::ClickEvent;
use crate::domain::gateways::{ThreatLookup, ToxicityScorer};
use crate::domain::repositories::{LinkRepository, SubscriptionRepository};
use crate::infrastructure::cache::VerdictCache;

/// Storage and third-party backends the services are built on.
///
/// Production wiring lives in [`crate::server`]; tests pass in-memory
/// implementations.
#[derive(Clone)]
pub struct Backends {
    pub links: Arc<dyn LinkRepository>,
    pub subscriptions: Arc<dyn SubscriptionRepository>,
    pub threats: Arc<dyn ThreatLookup>,
    pub toxicity: Arc<dyn ToxicityScorer>,
    pub cache: Arc<dyn VerdictCache>,
}

#[derive(Clone)]
pub struct AppState {
    pub redirect_service: Arc<RedirectService>,
    pub slug_service: Arc<SlugService>,
    pub safety_service: Arc<SafetyService>,
    pub webhook_service: Arc<WebhookService>,
    pub links: Arc<dyn LinkRepository>,
    pub cache: Arc<dyn VerdictCache>,
    pub click_sender: mpsc::Sender<ClickEvent>,
    /// Trust proxy headers for client IPs.
    pub behind_proxy: bool,
}

impl AppState {
    /// Builds every service from `backends` and the relevant config values.
    pub fn new(backends: Backends, click_sender: mpsc::Sender<ClickEvent>, config: &Config) -> Self {
        let moderation = Arc::new(ModerationService::new(
            backends.toxicity,
            backends.cache.clone(),
            BlockedTerms::default(),
            ModerationSettings {
                threshold: config.moderation_threshold,
                max_retries: config.moderation_max_retries,
                cache_ttl_seconds: config.moderation_cache_ttl_seconds,
                base_backoff: Duration::from_millis(100),
            },
        ));

        Self {
            redirect_service: Arc::new(RedirectService::new(
                backends.links.clone(),
                config.loose_slug_fallback,
            )),
            slug_service: Arc::new(SlugService::new(backends.links.clone(), moderation)),
            safety_service: Arc::new(SafetyService::new(backends.threats)),
            webhook_service: Arc::new(WebhookService::new(
                backends.subscriptions,
                config.webhook_secret.clone(),
            )),
            links: backends.links,
            cache: backends.cache,
            click_sender,
            behind_proxy: config.behind_proxy,
        }
    }
}
