//! URL safety checks against a threat-intelligence list.

use std::sync::Arc;

use crate::domain::gateways::{GatewayError, ThreatLookup};
use crate::validation::{UrlError, UrlRules, validate_url_with};

/// Result of a safety lookup.
///
/// `Degraded` means the lookup could not run. The URL is let through, but
/// callers can see that nothing was actually checked.
#[derive(Debug, Clone, PartialEq)]
pub enum SafetyVerdict {
    Safe,
    Unsafe { threats: Vec<String> },
    Degraded { reason: String },
}

impl SafetyVerdict {
    /// False only for [`SafetyVerdict::Unsafe`].
    pub fn is_safe(&self) -> bool {
        !matches!(self, Self::Unsafe { .. })
    }

    pub fn status(&self) -> &'static str {
        match self {
            Self::Safe => "safe",
            Self::Unsafe { .. } => "unsafe",
            Self::Degraded { .. } => "degraded",
        }
    }
}

/// A checked URL with its verdict.
#[derive(Debug, Clone, PartialEq)]
pub struct SafetyReport {
    pub normalized_url: String,
    pub verdict: SafetyVerdict,
}

pub struct SafetyService {
    lookup: Arc<dyn ThreatLookup>,
    rules: UrlRules,
}

impl SafetyService {
    pub fn new(lookup: Arc<dyn ThreatLookup>) -> Self {
        Self {
            lookup,
            rules: UrlRules::default(),
        }
    }

    /// Validates `url` and looks it up.
    ///
    /// # Errors
    ///
    /// Returns the [`UrlError`] if the URL is malformed; lookup failures are
    /// reported as [`SafetyVerdict::Degraded`] instead.
    pub async fn check(&self, url: &str) -> Result<SafetyReport, UrlError> {
        let normalized_url = validate_url_with(url, &self.rules)?;

        let verdict = match self.lookup.find_threats(&normalized_url).await {
            Ok(threats) if threats.is_empty() => SafetyVerdict::Safe,
            Ok(threats) => {
                tracing::warn!(url = %normalized_url, ?threats, "URL flagged as unsafe");
                SafetyVerdict::Unsafe { threats }
            }
            Err(e @ GatewayError::NotConfigured { .. }) => {
                tracing::debug!("Skipping safety lookup: {}", e);
                SafetyVerdict::Degraded {
                    reason: e.to_string(),
                }
            }
            Err(e) => {
                tracing::warn!(url = %normalized_url, "Safety lookup failed: {}", e);
                SafetyVerdict::Degraded {
                    reason: e.to_string(),
                }
            }
        };

        metrics::counter!("safety_checks_total", "verdict" => verdict.status()).increment(1);

        Ok(SafetyReport {
            normalized_url,
            verdict,
        })
    }
}
