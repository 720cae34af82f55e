//! Repository trait for subscription state.

use crate::domain::entities::SubscriptionUpsert;
use crate::error::AppError;
use async_trait::async_trait;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubscriptionRepository: Send + Sync {
    /// Inserts or replaces the subscription keyed by its Lemon Squeezy id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn upsert(&self, subscription: SubscriptionUpsert) -> Result<(), AppError>;
}
