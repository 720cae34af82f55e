//! API route configuration.
//!
//! The router is nested under `/api` and rate limited per client IP by
//! [`crate::routes::app_router`].

use crate::api::handlers::{
    safety_check_handler, slug_check_handler, validate_domain_handler, validate_url_handler,
};
use crate::state::AppState;
use axum::{Router, routing::post};

/// Validation, slug and safety endpoints.
///
/// # Endpoints
///
/// - `POST /validate/domain` - Validate a custom domain
/// - `POST /validate/url`    - Validate a destination URL
/// - `POST /slugs/check`     - Format, availability and moderation check
/// - `POST /safety/check`    - Threat-list lookup for a destination URL
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/validate/domain", post(validate_domain_handler))
        .route("/validate/url", post(validate_url_handler))
        .route("/slugs/check", post(slug_check_handler))
        .route("/safety/check", post(safety_check_handler))
}
