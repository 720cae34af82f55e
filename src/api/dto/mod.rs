//! Data Transfer Objects for API requests and responses.
//!
//! Requests derive `validator::Validate` for size limits; the domain rules
//! themselves live in [`crate::validation`]. Responses use camelCase keys.

pub mod health;
pub mod safety;
pub mod slugs;
pub mod validate;
pub mod webhook;
