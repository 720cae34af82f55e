//! PostgreSQL implementation of subscription repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::SubscriptionUpsert;
use crate::domain::repositories::SubscriptionRepository;
use crate::error::AppError;

pub struct PgSubscriptionRepository {
    pool: Arc<PgPool>,
}

impl PgSubscriptionRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SubscriptionRepository for PgSubscriptionRepository {
    async fn upsert(&self, s: SubscriptionUpsert) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO subscriptions (
                lemon_subscription_id, user_id, customer_id, status, variant_id,
                product_name, variant_name, user_email, renews_at, ends_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, now())
            ON CONFLICT (lemon_subscription_id) DO UPDATE SET
                user_id = COALESCE(EXCLUDED.user_id, subscriptions.user_id),
                customer_id = EXCLUDED.customer_id,
                status = EXCLUDED.status,
                variant_id = EXCLUDED.variant_id,
                product_name = EXCLUDED.product_name,
                variant_name = EXCLUDED.variant_name,
                user_email = EXCLUDED.user_email,
                renews_at = EXCLUDED.renews_at,
                ends_at = EXCLUDED.ends_at,
                updated_at = now()
            "#,
        )
        .bind(s.lemon_subscription_id)
        .bind(s.user_id)
        .bind(s.customer_id)
        .bind(s.status)
        .bind(s.variant_id)
        .bind(s.product_name)
        .bind(s.variant_name)
        .bind(s.user_email)
        .bind(s.renews_at)
        .bind(s.ends_at)
        .execute(self.pool.as_ref())
        .await?;

        Ok(())
    }
}
