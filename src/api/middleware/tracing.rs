//! HTTP request/response tracing middleware.

use axum::{body::Body, http::Request};
use tower_http::LatencyUnit;
use tower_http::classify::{ServerErrorsAsFailures, SharedClassifier};
use tower_http::trace::{DefaultOnResponse, TraceLayer};
use tracing::{Level, Span};

type SpanFn = fn(&Request<Body>) -> Span;

/// Creates a tracing middleware for HTTP requests.
///
/// Spans carry the method and path only. Query strings are left out since
/// redirect requests pass campaign parameters through them.
///
/// # Example Logs
///
/// ```text
/// INFO request{method=GET path=/promo1}: finished processing request latency=2 ms status=301
/// ```
pub fn layer() -> TraceLayer<SharedClassifier<ServerErrorsAsFailures>, SpanFn> {
    TraceLayer::new_for_http()
        .make_span_with(make_span as SpanFn)
        .on_response(
            DefaultOnResponse::new()
                .level(Level::INFO)
                .latency_unit(LatencyUnit::Millis),
        )
}

fn make_span(request: &Request<Body>) -> Span {
    tracing::info_span!(
        "request",
        method = %request.method(),
        path = %request.uri().path(),
    )
}
