//! Handler for short link redirects.

use axum::{
    extract::{ConnectInfo, State},
    http::{HeaderMap, StatusCode, Uri, header},
    response::{IntoResponse, Response},
};
use std::net::SocketAddr;
use tracing::{debug, error};

use crate::application::services::redirect_service::{build_target_url, extract_slug};
use crate::domain::click_event::ClickEvent;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::extract_domain::{client_ip, extract_domain_from_headers};

/// Redirects a slug on the requesting domain to its campaign target.
///
/// # Endpoint
///
/// `GET /{slug}`
///
/// # Request Flow
///
/// 1. Extract the slug from the path and the domain from the `Host` header
/// 2. Look up the active link for `(slug, domain)`
/// 3. Build the target URL with UTM values and pass-through parameters
/// 4. Queue a click event for the background worker
/// 5. Return 301 Moved Permanently
///
/// # Click Tracking
///
/// Click events go to a bounded channel. If the queue is full, the click is
/// dropped and the redirect is still served.
///
/// # Responses
///
/// Bodies are plain text:
///
/// - **404** `Link not found` for a bad slug, missing host or unknown link
/// - **500** `Service configuration error` when the schema or database
///   configuration is broken
/// - **500** `Internal server error` for anything else
pub async fn redirect_handler(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    uri: Uri,
) -> Response {
    let (Some(slug), Some(domain)) = (extract_slug(uri.path()), extract_domain_from_headers(&headers))
    else {
        debug!(path = %uri.path(), "Rejected redirect request");
        return not_found();
    };

    let link = match state.redirect_service.resolve(&slug, &domain).await {
        Ok(Some(link)) => link,
        Ok(None) => {
            debug!(slug = %slug, domain = %domain, "Link not found");
            return not_found();
        }
        Err(e) => return failure(&slug, &domain, e),
    };

    let location = match build_target_url(&link, uri.query()) {
        Ok(location) => location,
        Err(e) => return failure(&slug, &domain, e),
    };

    let click_event = ClickEvent::new(
        link.id,
        link.slug,
        link.domain,
        client_ip(&headers, Some(addr), state.behind_proxy),
        headers
            .get(header::USER_AGENT)
            .and_then(|v| v.to_str().ok()),
        headers.get(header::REFERER).and_then(|v| v.to_str().ok()),
    );

    if state.click_sender.try_send(click_event).is_err() {
        debug!("Click queue full, dropping click");
        metrics::counter!("click_queue_full_total").increment(1);
    }

    metrics::counter!("redirects_total", "outcome" => "redirected").increment(1);

    (
        StatusCode::MOVED_PERMANENTLY,
        [(header::LOCATION, location)],
    )
        .into_response()
}

fn not_found() -> Response {
    metrics::counter!("redirects_total", "outcome" => "not_found").increment(1);
    (StatusCode::NOT_FOUND, "Link not found").into_response()
}

fn failure(slug: &str, domain: &str, err: AppError) -> Response {
    error!(slug = %slug, domain = %domain, "Redirect failed: {}", err);

    let body = match err {
        AppError::Configuration { .. } => {
            metrics::counter!("redirects_total", "outcome" => "misconfigured").increment(1);
            "Service configuration error"
        }
        _ => {
            metrics::counter!("redirects_total", "outcome" => "error").increment(1);
            "Internal server error"
        }
    };

    (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
}
