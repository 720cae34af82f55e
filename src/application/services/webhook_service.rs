//! Lemon Squeezy webhook verification and subscription sync.

use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use serde::Deserialize;
use serde_json::{Value, json};
use sha2::Sha256;
use std::sync::Arc;

use crate::domain::entities::SubscriptionUpsert;
use crate::domain::repositories::SubscriptionRepository;
use crate::error::AppError;

type HmacSha256 = Hmac<Sha256>;

/// Computes the lowercase hex HMAC-SHA256 of `payload`.
pub fn sign_payload(secret: &str, payload: &[u8]) -> String {
    let Ok(mut mac) = HmacSha256::new_from_slice(secret.as_bytes()) else {
        return String::new();
    };
    mac.update(payload);
    hex::encode(mac.finalize().into_bytes())
}

/// Checks a hex HMAC-SHA256 signature of `payload`.
///
/// The hex digest is compared case-insensitively; the MAC itself is compared
/// in constant time.
pub fn verify_signature(secret: &str, payload: &[u8], signature: &str) -> bool {
    let Ok(expected) = hex::decode(signature.trim()) else {
        return false;
    };
    let Ok(mut mac) = HmacSha256::new_from_slice(secret.as_bytes()) else {
        return false;
    };
    mac.update(payload);
    mac.verify_slice(&expected).is_ok()
}

#[derive(Debug, Deserialize)]
struct WebhookPayload {
    meta: Meta,
    #[serde(default)]
    data: Option<Data>,
}

#[derive(Debug, Deserialize)]
struct Meta {
    event_name: String,
    #[serde(default)]
    custom_data: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct Data {
    id: Value,
    #[serde(default)]
    attributes: Attributes,
}

#[derive(Debug, Default, Deserialize)]
struct Attributes {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    customer_id: Option<Value>,
    #[serde(default)]
    variant_id: Option<Value>,
    #[serde(default)]
    product_name: Option<String>,
    #[serde(default)]
    variant_name: Option<String>,
    #[serde(default)]
    user_email: Option<String>,
    #[serde(default)]
    renews_at: Option<DateTime<Utc>>,
    #[serde(default)]
    ends_at: Option<DateTime<Utc>>,
}

/// Lemon Squeezy sends numeric ids as numbers; they are stored as text.
fn id_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// What the receiver did with an accepted event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebhookOutcome {
    SubscriptionSynced { event: String, subscription_id: String },
    Ignored { event: String },
}

pub struct WebhookService {
    subscriptions: Arc<dyn SubscriptionRepository>,
    secret: Option<String>,
}

impl WebhookService {
    pub fn new(subscriptions: Arc<dyn SubscriptionRepository>, secret: Option<String>) -> Self {
        Self {
            subscriptions,
            secret,
        }
    }

    /// Verifies and applies a webhook delivery.
    ///
    /// # Errors
    ///
    /// - [`AppError::Configuration`] if no signing secret is configured
    /// - [`AppError::Unauthorized`] if the signature is missing or wrong
    /// - [`AppError::Validation`] if the body is not a valid event
    /// - Repository errors from the subscription upsert
    pub async fn handle(
        &self,
        body: &[u8],
        signature: Option<&str>,
    ) -> Result<WebhookOutcome, AppError> {
        let secret = self.secret.as_deref().ok_or_else(|| {
            tracing::error!("LEMON_SQUEEZY_WEBHOOK_SECRET is not configured");
            AppError::configuration("Webhook secret is not configured", json!({}))
        })?;

        let signature = signature
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| AppError::unauthorized("Missing signature", json!({})))?;

        if !verify_signature(secret, body, signature) {
            tracing::warn!("Rejected webhook with invalid signature");
            return Err(AppError::unauthorized("Invalid signature", json!({})));
        }

        let payload: WebhookPayload = serde_json::from_slice(body).map_err(|e| {
            AppError::bad_request("Invalid webhook payload", json!({ "reason": e.to_string() }))
        })?;

        let event = payload.meta.event_name.clone();
        if !event.starts_with("subscription_") {
            tracing::info!(event = %event, "Ignoring webhook event");
            return Ok(WebhookOutcome::Ignored { event });
        }

        let upsert = Self::to_upsert(payload)?;
        let subscription_id = upsert.lemon_subscription_id.clone();

        tracing::info!(
            event = %event,
            subscription_id = %subscription_id,
            status = %upsert.status,
            entitled = upsert.is_entitled(),
            "Syncing subscription"
        );
        self.subscriptions.upsert(upsert).await?;

        Ok(WebhookOutcome::SubscriptionSynced {
            event,
            subscription_id,
        })
    }

    fn to_upsert(payload: WebhookPayload) -> Result<SubscriptionUpsert, AppError> {
        let data = payload
            .data
            .ok_or_else(|| AppError::bad_request("Missing subscription data", json!({})))?;

        let lemon_subscription_id = id_to_string(&data.id)
            .ok_or_else(|| AppError::bad_request("Missing subscription id", json!({})))?;

        let user_id = payload
            .meta
            .custom_data
            .as_ref()
            .and_then(|c| c.get("user_id"))
            .and_then(id_to_string);

        let attributes = data.attributes;

        Ok(SubscriptionUpsert {
            lemon_subscription_id,
            user_id,
            customer_id: attributes.customer_id.as_ref().and_then(id_to_string),
            status: attributes.status.unwrap_or_else(|| "unknown".to_string()),
            variant_id: attributes.variant_id.as_ref().and_then(id_to_string),
            product_name: attributes.product_name,
            variant_name: attributes.variant_name,
            user_email: attributes.user_email,
            renews_at: attributes.renews_at,
            ends_at: attributes.ends_at,
        })
    }
}
