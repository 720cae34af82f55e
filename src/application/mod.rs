//! Application layer services implementing business logic.
//!
//! Services coordinate repositories, gateways and validators and expose a
//! small API to HTTP handlers and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::redirect_service::RedirectService`] - Slug + domain resolution
//! - [`services::slug_service::SlugService`] - Slug format, availability and moderation
//! - [`services::moderation::ModerationService`] - Blocked terms and remote toxicity scoring
//! - [`services::safety_service::SafetyService`] - Destination URL threat lookups
//! - [`services::webhook_service::WebhookService`] - Signed payment webhooks

pub mod services;
