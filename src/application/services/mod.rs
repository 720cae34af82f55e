//! Business logic services for the application layer.

pub mod moderation;
pub mod redirect_service;
pub mod safety_service;
pub mod slug_service;
pub mod webhook_service;

pub use moderation::{BlockedTerms, ModerationService, ModerationSettings, ModerationVerdict};
pub use redirect_service::RedirectService;
pub use safety_service::{SafetyReport, SafetyService, SafetyVerdict};
pub use slug_service::{SlugCheck, SlugService};
pub use webhook_service::{WebhookOutcome, WebhookService};
