//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /{slug}`                  - Short link redirect
//! - `GET  /health`                  - Health check: DB, cache, click queue
//! - `POST /webhooks/lemon-squeezy`  - Signed payment events
//! - `/api/*`                        - Validation, slug and safety checks
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket on `/api`
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::{health_handler, lemon_squeezy_webhook_handler, redirect_handler};
use crate::api::middleware::{rate_limit, tracing};
use crate::state::AppState;
use axum::Router;
use axum::routing::{get, post};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
///
/// The rate limiter reads proxy headers when `state.behind_proxy` is set,
/// the peer socket address otherwise.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    let api_router = if state.behind_proxy {
        api::routes::api_routes().layer(rate_limit::proxy_layer())
    } else {
        api::routes::api_routes().layer(rate_limit::layer())
    };

    let router = Router::new()
        .route("/{slug}", get(redirect_handler))
        .route("/health", get(health_handler))
        .route("/webhooks/lemon-squeezy", post(lemon_squeezy_webhook_handler))
        .nest("/api", api_router)
        .with_state(state)
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
