//! PostgreSQL repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx with
//! runtime-checked, parameter-bound queries.
//!
//! - [`PgLinkRepository`] - Link lookups
//! - [`PgClickRepository`] - Click inserts
//! - [`PgSubscriptionRepository`] - Subscription upserts

pub mod pg_click_repository;
pub mod pg_link_repository;
pub mod pg_subscription_repository;

pub use pg_click_repository::PgClickRepository;
pub use pg_link_repository::PgLinkRepository;
pub use pg_subscription_repository::PgSubscriptionRepository;
