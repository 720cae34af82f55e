//! Slug format, availability and moderation checks.

use std::sync::Arc;

use crate::application::services::moderation::{ModerationService, ModerationVerdict};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::extract_domain::normalize_host;
use crate::validation::validate_slug_format;

/// Combined result of a slug check.
///
/// Later stages only run when earlier ones pass: an invalid slug is never
/// looked up, a taken slug is never moderated.
#[derive(Debug, Clone, PartialEq)]
pub struct SlugCheck {
    pub normalized_slug: Option<String>,
    pub format_error: Option<String>,
    pub is_available: bool,
    pub moderation: Option<ModerationVerdict>,
}

impl SlugCheck {
    fn invalid(error: String) -> Self {
        Self {
            normalized_slug: None,
            format_error: Some(error),
            is_available: false,
            moderation: None,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.format_error.is_none()
    }

    /// True unless moderation blocked the slug.
    pub fn is_safe(&self) -> bool {
        self.moderation
            .as_ref()
            .is_none_or(ModerationVerdict::is_allowed)
    }

    /// True when the slug can be used right now.
    pub fn is_usable(&self) -> bool {
        self.is_valid() && self.is_available && self.is_safe()
    }
}

pub struct SlugService {
    links: Arc<dyn LinkRepository>,
    moderation: Arc<ModerationService>,
}

impl SlugService {
    pub fn new(links: Arc<dyn LinkRepository>, moderation: Arc<ModerationService>) -> Self {
        Self { links, moderation }
    }

    /// Checks whether `input` can be used as a slug on `domain`.
    ///
    /// Without a domain, availability is checked across all domains.
    ///
    /// # Errors
    ///
    /// Returns repository errors from the availability lookup. Moderation
    /// never fails.
    pub async fn check(&self, input: &str, domain: Option<&str>) -> Result<SlugCheck, AppError> {
        let slug = match validate_slug_format(input) {
            Ok(slug) => slug,
            Err(e) => return Ok(SlugCheck::invalid(e.to_string())),
        };

        let domain = domain.and_then(normalize_host);
        let taken = self.links.slug_exists(&slug, domain).await?;

        if taken {
            return Ok(SlugCheck {
                normalized_slug: Some(slug),
                format_error: None,
                is_available: false,
                moderation: None,
            });
        }

        let verdict = self.moderation.moderate(&slug).await;

        Ok(SlugCheck {
            normalized_slug: Some(slug),
            format_error: None,
            is_available: true,
            moderation: Some(verdict),
        })
    }
}
