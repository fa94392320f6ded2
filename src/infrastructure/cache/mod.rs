//! Caching layer for fast redirect lookups.
//!
//! Provides a [`CacheStore`] trait with two implementations:
//! - [`RedisCache`] - Production Redis-backed cache with per-call retries
//! - [`NullCache`] - No-op implementation for testing/disabled caching

mod null_cache;
mod redis_cache;
mod store;

pub use null_cache::NullCache;
pub use redis_cache::RedisCache;
pub use store::{CacheError, CacheResult, CacheStore, RetryPolicy};
