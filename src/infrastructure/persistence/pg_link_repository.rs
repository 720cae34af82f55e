//! PostgreSQL implementation of link repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::Link;
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

const LINK_COLUMNS: &str = r#"
    id, slug, domain, target_url,
    utm_source, utm_medium, utm_campaign, utm_content,
    parameter_pass_through, status, created_at
"#;

/// PostgreSQL repository for short link lookups.
///
/// Queries are checked at runtime and bound as parameters.
pub struct PgLinkRepository {
    pool: Arc<PgPool>,
}

impl PgLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LinkRepository for PgLinkRepository {
    async fn find_active(&self, slug: &str, domain: &str) -> Result<Option<Link>, AppError> {
        let sql = format!(
            "SELECT {LINK_COLUMNS} FROM links
             WHERE slug = $1 AND domain = $2 AND status IS DISTINCT FROM FALSE
             ORDER BY id
             LIMIT 1"
        );

        let link = sqlx::query_as::<_, Link>(&sql)
            .bind(slug)
            .bind(domain)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(link)
    }

    async fn find_active_by_slug(&self, slug: &str) -> Result<Vec<Link>, AppError> {
        let sql = format!(
            "SELECT {LINK_COLUMNS} FROM links
             WHERE slug = $1 AND status IS DISTINCT FROM FALSE
             ORDER BY id"
        );

        let links = sqlx::query_as::<_, Link>(&sql)
            .bind(slug)
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(links)
    }

    async fn slug_exists(&self, slug: &str, domain: Option<String>) -> Result<bool, AppError> {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM links
                WHERE slug = $1
                  AND ($2::text IS NULL OR domain = $2)
                  AND status IS DISTINCT FROM FALSE
            )
            "#,
        )
        .bind(slug)
        .bind(domain)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(exists)
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(self.pool.as_ref())
            .await?;
        Ok(())
    }
}
