//! Redis-backed verdict cache.

use super::service::{CacheError, CacheResult, VerdictCache};
use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use tracing::{debug, error, info, warn};

/// Redis cache shared across service instances.
///
/// Uses `ConnectionManager` for connection reuse. All operations are
/// fail-open: errors are logged and reported as misses.
pub struct RedisCache {
    client: ConnectionManager,
    default_ttl: u64,
    key_prefix: String,
}

impl RedisCache {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::ConnectionError`] if the URL is invalid, the connection cannot
    /// be established, or the PING fails.
    pub async fn connect(redis_url: &str, default_ttl_seconds: u64) -> CacheResult<Self> {
        info!("Connecting to Redis");

        let client = Client::open(redis_url).map_err(|e| {
            CacheError::ConnectionError(format!("Failed to create Redis client: {}", e))
        })?;

        let manager = ConnectionManager::new(client).await.map_err(|e| {
            CacheError::ConnectionError(format!("Failed to connect to Redis: {}", e))
        })?;

        let mut test_conn = manager.clone();
        test_conn
            .ping::<()>()
            .await
            .map_err(|e| CacheError::ConnectionError(format!("Redis PING failed: {}", e)))?;

        info!("✓ Connected to Redis");

        Ok(Self {
            client: manager,
            default_ttl: default_ttl_seconds,
            key_prefix: "moderation:".to_string(),
        })
    }

    fn build_key(&self, key: &str) -> String {
        format!("{}{}", self.key_prefix, key)
    }
}

#[async_trait]
impl VerdictCache for RedisCache {
    async fn get_verdict(&self, key: &str) -> CacheResult<Option<String>> {
        let full_key = self.build_key(key);
        let mut conn = self.client.clone();

        match conn.get::<_, Option<String>>(&full_key).await {
            Ok(value) => {
                debug!("Cache {}: {}", if value.is_some() { "HIT" } else { "MISS" }, key);
                Ok(value)
            }
            Err(e) => {
                error!("Redis GET error for {}: {}", key, e);
                Ok(None)
            }
        }
    }

    async fn set_verdict(
        &self,
        key: &str,
        value: &str,
        ttl_seconds: Option<u64>,
    ) -> CacheResult<()> {
        let full_key = self.build_key(key);
        let mut conn = self.client.clone();
        let ttl = ttl_seconds.unwrap_or(self.default_ttl).max(1);

        if let Err(e) = conn.set_ex::<_, _, ()>(&full_key, value, ttl).await {
            warn!("Redis SET error for {}: {}", key, e);
        } else {
            debug!("Cache SET: {} (TTL: {}s)", key, ttl);
        }
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "redis"
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.client.clone();
        conn.ping::<()>().await.is_ok()
    }
}
