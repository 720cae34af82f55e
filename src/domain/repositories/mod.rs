//! Repository trait definitions for the domain layer.
//!
//! Traits define the data contracts; PostgreSQL implementations live in
//! `crate::infrastructure::persistence`. Mock implementations are generated
//! with `mockall` for unit tests.
//!
//! - [`LinkRepository`] - Short link lookups for the resolver and slug checks
//! - [`ClickRepository`] - Click persistence for the background worker
//! - [`SubscriptionRepository`] - Subscription upserts from webhooks

pub mod click_repository;
pub mod link_repository;
pub mod subscription_repository;

pub use click_repository::ClickRepository;
pub use link_repository::LinkRepository;
pub use subscription_repository::SubscriptionRepository;

#[cfg(test)]
pub use click_repository::MockClickRepository;
#[cfg(test)]
pub use link_repository::MockLinkRepository;
#[cfg(test)]
pub use subscription_repository::MockSubscriptionRepository;
