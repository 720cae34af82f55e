//! Link entity representing a short link served on a domain.

use chrono::{DateTime, Utc};

/// The four UTM query parameters a link can carry.
pub const UTM_KEYS: [&str; 4] = ["utm_source", "utm_medium", "utm_campaign", "utm_content"];

/// A short link as stored by the dashboard.
///
/// Links are created and edited outside this service; the resolver only reads
/// them. `status` is nullable in storage and a link counts as active unless it
/// is explicitly `false`.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Link {
    pub id: i64,
    pub slug: String,
    pub domain: String,
    pub target_url: String,
    pub utm_source: Option<String>,
    pub utm_medium: Option<String>,
    pub utm_campaign: Option<String>,
    pub utm_content: Option<String>,
    pub parameter_pass_through: bool,
    pub status: Option<bool>,
    pub created_at: DateTime<Utc>,
}

impl Link {
    /// Creates an active link without UTM parameters.
    pub fn new(id: i64, slug: String, domain: String, target_url: String) -> Self {
        Self {
            id,
            slug,
            domain,
            target_url,
            utm_source: None,
            utm_medium: None,
            utm_campaign: None,
            utm_content: None,
            parameter_pass_through: false,
            status: Some(true),
            created_at: Utc::now(),
        }
    }

    /// Sets the UTM source.
    pub fn with_utm_source(mut self, value: impl Into<String>) -> Self {
        self.utm_source = Some(value.into());
        self
    }

    /// Sets the UTM medium.
    pub fn with_utm_medium(mut self, value: impl Into<String>) -> Self {
        self.utm_medium = Some(value.into());
        self
    }

    /// Sets the UTM campaign.
    pub fn with_utm_campaign(mut self, value: impl Into<String>) -> Self {
        self.utm_campaign = Some(value.into());
        self
    }

    /// Sets the UTM content.
    pub fn with_utm_content(mut self, value: impl Into<String>) -> Self {
        self.utm_content = Some(value.into());
        self
    }

    /// Enables or disables copying inbound query parameters to the target.
    pub fn with_pass_through(mut self, enabled: bool) -> Self {
        self.parameter_pass_through = enabled;
        self
    }

    /// Sets the raw status column value.
    pub fn with_status(mut self, status: Option<bool>) -> Self {
        self.status = status;
        self
    }

    /// Returns true unless the link has been explicitly deactivated.
    pub fn is_active(&self) -> bool {
        self.status != Some(false)
    }

    /// UTM parameters stored on the link, in [`UTM_KEYS`] order, skipping
    /// empty values.
    pub fn utm_parameters(&self) -> Vec<(&'static str, &str)> {
        let values = [
            &self.utm_source,
            &self.utm_medium,
            &self.utm_campaign,
            &self.utm_content,
        ];

        UTM_KEYS
            .iter()
            .zip(values)
            .filter_map(|(key, value)| {
                value
                    .as_deref()
                    .filter(|v| !v.trim().is_empty())
                    .map(|v| (*key, v))
            })
            .collect()
    }
}
