//! DTOs for the slug check endpoint.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::application::services::{ModerationVerdict, SlugCheck};

#[derive(Debug, Deserialize, Validate)]
pub struct SlugCheckRequest {
    #[validate(length(max = 256, message = "Slug input is too long"))]
    pub slug: String,

    /// Domain the slug will be served on; omitted means any domain.
    #[validate(length(max = 253))]
    pub domain: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ModerationDto {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl From<&ModerationVerdict> for ModerationDto {
    fn from(verdict: &ModerationVerdict) -> Self {
        Self {
            status: verdict.status(),
            reason: verdict.reason().map(str::to_string),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SlugCheckResponse {
    pub is_valid: bool,
    pub is_available: bool,
    pub is_safe: bool,
    pub moderation: Option<ModerationDto>,
    pub error: Option<String>,
    pub normalized_slug: Option<String>,
}

impl From<SlugCheck> for SlugCheckResponse {
    fn from(check: SlugCheck) -> Self {
        let error = if let Some(ref e) = check.format_error {
            Some(e.clone())
        } else if !check.is_available {
            Some("This slug is already taken".to_string())
        } else if let Some(ModerationVerdict::Blocked { reason }) = &check.moderation {
            Some(reason.clone())
        } else {
            None
        };

        Self {
            is_valid: check.is_valid(),
            is_available: check.is_available,
            is_safe: check.is_safe(),
            moderation: check.moderation.as_ref().map(ModerationDto::from),
            error,
            normalized_slug: check.normalized_slug,
        }
    }
}
