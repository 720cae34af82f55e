//! Repository trait for short link lookups.

use crate::domain::entities::Link;
use crate::error::AppError;
use async_trait::async_trait;

/// Read access to short links.
///
/// Links are owned by the dashboard; this service never writes them.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Finds the active link for an exact `slug` + `domain` pair.
    ///
    /// A link is active unless its `status` is explicitly `false`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Configuration`] if the schema is missing and
    /// [`AppError::Internal`] on other database errors.
    async fn find_active(&self, slug: &str, domain: &str) -> Result<Option<Link>, AppError>;

    /// Finds active links with the given slug on any domain, oldest first.
    ///
    /// Only used by the loose slug fallback.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_active_by_slug(&self, slug: &str) -> Result<Vec<Link>, AppError>;

    /// Checks whether an active link already uses `slug`.
    ///
    /// With `domain = None` the slug is checked across all domains.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn slug_exists(&self, slug: &str, domain: Option<String>) -> Result<bool, AppError>;

    /// Round-trips to the database. Used by health checks.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the database is unreachable.
    async fn ping(&self) -> Result<(), AppError>;
}
