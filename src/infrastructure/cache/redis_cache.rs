//! Redis-backed cache implementation.

use super::store::{CacheError, CacheResult, CacheStore, RetryPolicy};
use async_trait::async_trait;
use metrics::counter;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use tokio_retry::{
    Retry,
    strategy::{ExponentialBackoff, jitter},
};
use tracing::{debug, info};

/// Redis cache for serialized link and summary payloads.
///
/// Uses `ConnectionManager` for connection reuse. Every operation runs under
/// the configured [`RetryPolicy`]; a GET that still fails after the retry
/// budget surfaces a transport error distinct from [`CacheError::Miss`], so
/// callers can degrade to the durable store.
pub struct RedisCache {
    conn: ConnectionManager,
    ttl_seconds: u64,
    policy: RetryPolicy,
}

impl RedisCache {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// # Arguments
    ///
    /// - `redis_url` - Redis connection string (e.g., `"redis://localhost:6379"`)
    /// - `ttl_seconds` - TTL applied to every cached entry
    /// - `policy` - per-call retry policy
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::ConnectionError`] if the URL is invalid, the
    /// connection cannot be established, or the PING fails.
    pub async fn connect(
        redis_url: &str,
        ttl_seconds: u64,
        policy: RetryPolicy,
    ) -> CacheResult<Self> {
        info!("Connecting to Redis at {}", redis_url);

        let client = Client::open(redis_url).map_err(|e| {
            CacheError::ConnectionError(format!("Failed to create Redis client: {}", e))
        })?;

        let conn = ConnectionManager::new(client).await.map_err(|e| {
            CacheError::ConnectionError(format!("Failed to connect to Redis: {}", e))
        })?;

        let mut test_conn = conn.clone();
        test_conn
            .ping::<()>()
            .await
            .map_err(|e| CacheError::ConnectionError(format!("Redis PING failed: {}", e)))?;

        info!("✓ Connected to Redis");

        Ok(Self {
            conn,
            ttl_seconds,
            policy,
        })
    }

    fn backoff(&self) -> impl Iterator<Item = std::time::Duration> {
        ExponentialBackoff::from_millis(self.policy.base_delay.as_millis().max(1) as u64)
            .map(jitter)
            .take(self.policy.attempts)
    }
}

#[async_trait]
impl CacheStore for RedisCache {
    async fn get_with_retry(&self, key: &str) -> CacheResult<String> {
        let value = Retry::spawn(self.backoff(), || {
            let mut conn = self.conn.clone();
            async move { conn.get::<_, Option<String>>(key).await }
        })
        .await
        .map_err(|e| {
            counter!("cache_errors_total", "op" => "get").increment(1);
            CacheError::OperationError(e.to_string())
        })?;

        match value {
            Some(payload) => {
                debug!("Cache HIT: {}", key);
                counter!("cache_hits_total").increment(1);
                Ok(payload)
            }
            None => {
                debug!("Cache MISS: {}", key);
                counter!("cache_misses_total").increment(1);
                Err(CacheError::Miss)
            }
        }
    }

    async fn set_with_retry(&self, key: &str, value: &str) -> CacheResult<()> {
        Retry::spawn(self.backoff(), || {
            let mut conn = self.conn.clone();
            async move { conn.set_ex::<_, _, ()>(key, value, self.ttl_seconds).await }
        })
        .await
        .map_err(|e| {
            counter!("cache_errors_total", "op" => "set").increment(1);
            CacheError::OperationError(e.to_string())
        })?;

        debug!("Cache SET: {} (TTL: {}s)", key, self.ttl_seconds);
        Ok(())
    }
}
