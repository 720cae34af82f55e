//! Subscription entity synced from Lemon Squeezy webhooks.

use chrono::{DateTime, Utc};

/// Subscription state as reported by the payment provider.
///
/// Keyed by `lemon_subscription_id`; every `subscription_*` event overwrites
/// the stored row with the latest attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct SubscriptionUpsert {
    pub lemon_subscription_id: String,
    pub user_id: Option<String>,
    pub customer_id: Option<String>,
    pub status: String,
    pub variant_id: Option<String>,
    pub product_name: Option<String>,
    pub variant_name: Option<String>,
    pub user_email: Option<String>,
    pub renews_at: Option<DateTime<Utc>>,
    pub ends_at: Option<DateTime<Utc>>,
}

impl SubscriptionUpsert {
    /// Returns true if the subscription currently grants access.
    pub fn is_entitled(&self) -> bool {
        matches!(self.status.as_str(), "active" | "on_trial" | "past_due")
    }
}
