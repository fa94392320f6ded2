//! No-op cache implementation for testing or disabled caching.

use super::store::{CacheError, CacheResult, CacheStore};
use async_trait::async_trait;
use tracing::debug;

/// A cache implementation that stores nothing.
///
/// Every read misses and every write succeeds immediately, which exercises
/// exactly the degraded path the services are required to survive.
///
/// # Use Cases
///
/// - Development environments without Redis
/// - Fallback when the Redis connection fails at startup
pub struct NullCache;

impl NullCache {
    /// Creates a new NullCache instance.
    pub fn new() -> Self {
        debug!("Using NullCache (caching disabled)");
        Self
    }
}

impl Default for NullCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CacheStore for NullCache {
    async fn get_with_retry(&self, _key: &str) -> CacheResult<String> {
        Err(CacheError::Miss)
    }

    async fn set_with_retry(&self, _key: &str, _value: &str) -> CacheResult<()> {
        Ok(())
    }
}
