//! DTOs for the payment webhook endpoint.

use serde::Serialize;

/// Acknowledgement returned for every accepted delivery.
#[derive(Debug, Serialize)]
pub struct WebhookAck {
    pub received: bool,
}
