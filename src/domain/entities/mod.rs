//! Core domain entities.
//!
//! - [`Link`] - A short link on a domain, with its UTM settings
//! - [`NewClick`] - A redirect event to be persisted
//! - [`SubscriptionUpsert`] - Subscription state pushed by the payment provider

pub mod click;
pub mod link;
pub mod subscription;

pub use click::NewClick;
pub use link::{Link, UTM_KEYS};
pub use subscription::SubscriptionUpsert;
