//! Per-IP rate limiting for the `/api` endpoints.

use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use tower_governor::{
    GovernorLayer,
    governor::GovernorConfigBuilder,
    key_extractor::{PeerIpKeyExtractor, SmartIpKeyExtractor},
};

/// One request is replenished every 200 ms, i.e. 5 per second sustained.
const REPLENISH_MILLIS: u64 = 200;
/// Requests a client may burst before being throttled.
const BURST_SIZE: u32 = 30;

/// Rate limiter keyed on the socket peer address.
///
/// # Limits
///
/// - **Rate**: 5 requests per second
/// - **Burst**: 30 requests
///
/// Requests exceeding the limit receive `429 Too Many Requests`.
///
/// The router must be served with connect info
/// (`into_make_service_with_connect_info::<SocketAddr>`).
pub fn layer() -> GovernorLayer<PeerIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body>
{
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_millisecond(REPLENISH_MILLIS)
            .burst_size(BURST_SIZE)
            .finish()
            .expect("rate limit quota is non-zero"),
    );

    GovernorLayer::new(governor_conf)
}

/// Same limits as [`layer`], keyed on `X-Forwarded-For`, `X-Real-IP` or
/// `Forwarded` before falling back to the peer address.
///
/// Only for deployments behind a trusted reverse proxy; otherwise clients
/// can pick their own key.
pub fn proxy_layer()
-> GovernorLayer<SmartIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body> {
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .key_extractor(SmartIpKeyExtractor)
            .per_millisecond(REPLENISH_MILLIS)
            .burst_size(BURST_SIZE)
            .finish()
            .expect("rate limit quota is non-zero"),
    );

    GovernorLayer::new(governor_conf)
}
