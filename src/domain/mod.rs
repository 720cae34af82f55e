//! Domain layer containing business entities and repository contracts.
//!
//! - [`entities`] - Core data structures
//! - [`repositories`] - Data access trait definitions
//! - [`click_event`] - Click tracking event model
//! - [`click_worker`] - Asynchronous click persistence
//! - [`gateways`] - Third-party check contracts (threat lookup, toxicity)
//!
//! # Click Processing Flow
//!
//! 1. The redirect handler resolves a link and answers with a 301
//! 2. A [`click_event::ClickEvent`] is pushed to a bounded channel (dropped if full)
//! 3. [`click_worker::run_click_worker`] persists it via [`repositories::ClickRepository`]

pub mod click_event;
pub mod click_worker;
pub mod entities;
pub mod gateways;
pub mod repositories;
