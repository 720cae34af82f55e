//! Handler for Lemon Squeezy webhooks.

use axum::{
    Json,
    body::Bytes,
    extract::State,
    http::HeaderMap,
};

use crate::api::dto::webhook::WebhookAck;
use crate::application::services::WebhookOutcome;
use crate::error::AppError;
use crate::state::AppState;

/// Header carrying the hex HMAC-SHA256 of the raw body.
pub const SIGNATURE_HEADER: &str = "x-signature";

/// Receives a signed payment event.
///
/// # Endpoint
///
/// `POST /webhooks/lemon-squeezy`
///
/// The signature is checked against the raw body before it is parsed.
///
/// # Errors
///
/// - **401** missing or invalid `X-Signature`
/// - **400** body is not a valid event
/// - **500** no webhook secret configured, or the upsert failed
pub async fn lemon_squeezy_webhook_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<WebhookAck>, AppError> {
    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok());

    match state.webhook_service.handle(&body, signature).await? {
        WebhookOutcome::SubscriptionSynced { event, .. } => {
            metrics::counter!("webhooks_total", "event" => event, "outcome" => "synced")
                .increment(1);
        }
        WebhookOutcome::Ignored { event } => {
            metrics::counter!("webhooks_total", "event" => event, "outcome" => "ignored")
                .increment(1);
        }
    }

    Ok(Json(WebhookAck { received: true }))
}
