//! Caching layer for moderation verdicts.
//!
//! Provides a [`VerdictCache`] trait with two implementations:
//! - [`MemoryCache`] - Capped in-process TTL map, used when Redis is not configured
//! - [`RedisCache`] - Redis-backed cache shared across instances

mod memory_cache;
mod redis_cache;
mod service;

pub use memory_cache::MemoryCache;
pub use redis_cache::RedisCache;
pub use service::{CacheError, CacheResult, VerdictCache};

#[cfg(test)]
pub use service::MockVerdictCache;
