//! PostgreSQL implementation of click repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::NewClick;
use crate::domain::repositories::ClickRepository;
use crate::error::AppError;

pub struct PgClickRepository {
    pool: Arc<PgPool>,
}

impl PgClickRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ClickRepository for PgClickRepository {
    async fn insert_click(&self, click: NewClick) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO link_clicks (link_id, slug, domain, clicked_at, user_agent, referer, ip)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(click.link_id)
        .bind(click.slug)
        .bind(click.domain)
        .bind(click.clicked_at)
        .bind(click.user_agent)
        .bind(click.referer)
        .bind(click.ip)
        .execute(self.pool.as_ref())
        .await?;

        Ok(())
    }
}
