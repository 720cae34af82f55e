//! Infrastructure layer for external integrations.
//!
//! Implements the contracts defined by the domain layer.
//!
//! # Modules
//!
//! - [`cache`] - Moderation verdict caches (in-memory and Redis)
//! - [`http`] - Safe Browsing and Perspective clients
//! - [`persistence`] - PostgreSQL repository implementations

pub mod cache;
pub mod http;
pub mod persistence;
