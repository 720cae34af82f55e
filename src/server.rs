//! HTTP server initialization and runtime setup.
//!
//! Handles database connections, cache setup, outbound clients, worker
//! spawning, and Axum server lifecycle.

use crate::config::Config;
use crate::domain::click_worker::run_click_worker;
use crate::infrastructure::cache::{MemoryCache, RedisCache, VerdictCache};
use crate::infrastructure::http::{PerspectiveClient, SafeBrowsingClient, build_http_client};
use crate::infrastructure::persistence::{
    PgClickRepository, PgLinkRepository, PgSubscriptionRepository,
};
use crate::routes::app_router;
use crate::state::{AppState, Backends};

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool
/// - Apply migrations
/// - Verdict cache (Redis, or the in-memory cache as fallback)
/// - Safe Browsing and Perspective clients
/// - Background click worker
/// - Axum HTTP server
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - The HTTP client cannot be built
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let pool = connect_pool(&config).await?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;

    let cache = build_cache(&config).await;

    let http = build_http_client(Duration::from_secs(config.http_timeout_seconds))
        .context("Failed to build HTTP client")?;

    let pool = Arc::new(pool);
    let backends = Backends {
        links: Arc::new(PgLinkRepository::new(pool.clone())),
        subscriptions: Arc::new(PgSubscriptionRepository::new(pool.clone())),
        threats: Arc::new(SafeBrowsingClient::new(
            http.clone(),
            config.safe_browsing_api_key.clone(),
        )),
        toxicity: Arc::new(PerspectiveClient::new(
            http,
            config.perspective_api_key.clone(),
        )),
        cache,
    };

    let (click_tx, click_rx) = mpsc::channel(config.click_queue_capacity);
    tokio::spawn(run_click_worker(
        click_rx,
        Arc::new(PgClickRepository::new(pool)),
    ));
    tracing::info!("Click worker started");

    let state = AppState::new(backends, click_tx, &config);

    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn connect_pool(config: &Config) -> Result<PgPool> {
    PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")
}

/// Redis when configured and reachable, the bounded in-memory cache otherwise.
async fn build_cache(config: &Config) -> Arc<dyn VerdictCache> {
    let memory = || {
        Arc::new(MemoryCache::new(
            config.moderation_cache_capacity,
            config.moderation_cache_ttl_seconds,
        ))
    };

    let Some(redis_url) = &config.redis_url else {
        tracing::info!("Verdict cache: in-memory");
        return memory();
    };

    match RedisCache::connect(redis_url, config.moderation_cache_ttl_seconds).await {
        Ok(redis) => {
            tracing::info!("Verdict cache: Redis");
            Arc::new(redis)
        }
        Err(e) => {
            tracing::warn!("Failed to connect to Redis: {}. Using in-memory cache.", e);
            memory()
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
