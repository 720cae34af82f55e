//! Verdict cache trait and error types.

use async_trait::async_trait;

/// Errors that can occur during cache operations.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("Cache connection error: {0}")]
    ConnectionError(String),
    #[error("Cache operation error: {0}")]
    OperationError(String),
}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Keyed cache for moderation verdicts.
///
/// Values are opaque strings; callers own the encoding. Implementations must
/// be thread-safe and must not let backend failures reach the request path:
/// a broken cache behaves like an empty one.
///
/// # Implementations
///
/// - [`crate::infrastructure::cache::MemoryCache`] - Capped in-process TTL map
/// - [`crate::infrastructure::cache::RedisCache`] - Redis-backed cache with TTL support
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VerdictCache: Send + Sync {
    /// Returns the cached value for `key`.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(value))` on cache hit
    /// - `Ok(None)` on miss, expiry, or backend error (fail-open)
    async fn get_verdict(&self, key: &str) -> CacheResult<Option<String>>;

    /// Stores `value` under `key`.
    ///
    /// `ttl_seconds = None` uses the implementation default.
    async fn set_verdict(&self, key: &str, value: &str, ttl_seconds: Option<u64>)
    -> CacheResult<()>;

    /// Short backend name for health reporting.
    fn backend(&self) -> &'static str;

    /// Checks if the cache backend is healthy.
    async fn health_check(&self) -> bool;
}
