//! Request helpers shared by handlers and services.
//!
//! - [`extract_domain`] - Serving domain and client IP from request headers

pub mod extract_domain;
