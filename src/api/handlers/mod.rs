//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod health;
pub mod redirect;
pub mod safety;
pub mod slugs;
pub mod validate;
pub mod webhook;

pub use health::health_handler;
pub use redirect::redirect_handler;
pub use safety::safety_check_handler;
pub use slugs::slug_check_handler;
pub use validate::{validate_domain_handler, validate_url_handler};
pub use webhook::lemon_squeezy_webhook_handler;
