//! Repository trait for click persistence.

use crate::domain::entities::NewClick;
use crate::error::AppError;
use async_trait::async_trait;

/// Append-only storage for redirect clicks.
///
/// Called from [`crate::domain::click_worker::run_click_worker`], never from
/// request handlers directly.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClickRepository: Send + Sync {
    /// Inserts a single click.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn insert_click(&self, click: NewClick) -> Result<(), AppError>;
}
