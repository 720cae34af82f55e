//! DTOs for the safety check endpoint.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::application::services::{SafetyReport, SafetyVerdict};

#[derive(Debug, Deserialize, Validate)]
pub struct SafetyCheckRequest {
    #[validate(length(max = 2048, message = "URL is too long"))]
    pub url: String,
}

/// `isSafe` stays `true` when the lookup could not run; `degraded` tells
/// the two cases apart.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SafetyCheckResponse {
    pub is_safe: bool,
    pub status: &'static str,
    pub degraded: bool,
    pub threats: Vec<String>,
    pub error: Option<String>,
    pub normalized_url: Option<String>,
}

impl SafetyCheckResponse {
    /// Response for a URL that failed validation before any lookup.
    pub fn invalid(error: String) -> Self {
        Self {
            is_safe: false,
            status: "invalid",
            degraded: false,
            threats: Vec::new(),
            error: Some(error),
            normalized_url: None,
        }
    }
}

impl From<SafetyReport> for SafetyCheckResponse {
    fn from(report: SafetyReport) -> Self {
        let status = report.verdict.status();
        let is_safe = report.verdict.is_safe();

        let (degraded, threats, error) = match report.verdict {
            SafetyVerdict::Safe => (false, Vec::new(), None),
            SafetyVerdict::Unsafe { threats } => (
                false,
                threats,
                Some("This URL has been flagged as unsafe".to_string()),
            ),
            SafetyVerdict::Degraded { reason } => (true, Vec::new(), Some(reason)),
        };

        Self {
            is_safe,
            status,
            degraded,
            threats,
            error,
            normalized_url: Some(report.normalized_url),
        }
    }
}
