//! Cache store trait, error types, and retry policy.

use async_trait::async_trait;
use std::fmt;
use std::time::Duration;

/// Errors that can occur during cache operations.
///
/// A miss is modelled as an error variant so callers can always distinguish
/// "the key is absent" from "the cache is unreachable": the former means the
/// store should be consulted and the entry repopulated, the latter means the
/// store serves as fallback without touching the cache state.
#[derive(Debug)]
pub enum CacheError {
    /// The key is not present. Not a failure of the cache itself.
    Miss,
    ConnectionError(String),
    OperationError(String),
}

impl CacheError {
    /// True for an explicit miss, false for transport-level failures.
    pub fn is_miss(&self) -> bool {
        matches!(self, Self::Miss)
    }
}

impl fmt::Display for CacheError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Miss => write!(f, "cache miss"),
            Self::ConnectionError(e) => write!(f, "cache connection error: {}", e),
            Self::OperationError(e) => write!(f, "cache operation error: {}", e),
        }
    }
}

impl std::error::Error for CacheError {}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Bounded retry policy applied uniformly to every cache access.
///
/// Delays follow an exponential backoff with jitter, starting from
/// `base_delay`. Once the attempt budget is exhausted the call fails with a
/// transport error and the caller degrades to miss behavior.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub attempts: usize,
    pub base_delay: Duration,
}

impl RetryPolicy {
    pub fn new(attempts: usize, base_delay_ms: u64) -> Self {
        Self {
            attempts,
            base_delay: Duration::from_millis(base_delay_ms),
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3, 10)
    }
}

/// Trait for the key-value cache holding serialized projections.
///
/// Entries are disposable: any one may be evicted or lost without data loss,
/// only latency cost. Implementations must be thread-safe and must never be
/// the sole reason a read path fails; the durable store is always the
/// fallback of record.
///
/// # Implementations
///
/// - [`crate::infrastructure::cache::RedisCache`] - Redis-backed cache with TTL support
/// - [`crate::infrastructure::cache::NullCache`] - No-op implementation for disabled caching
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Retrieves the serialized value under `key`, retrying transport
    /// failures per the configured [`RetryPolicy`].
    ///
    /// # Errors
    ///
    /// - [`CacheError::Miss`] when the key is absent
    /// - [`CacheError::OperationError`] / [`CacheError::ConnectionError`]
    ///   once the retry budget is exhausted
    async fn get_with_retry(&self, key: &str) -> CacheResult<String>;

    /// Stores a serialized value under `key`, retrying transport failures
    /// per the configured [`RetryPolicy`].
    async fn set_with_retry(&self, key: &str, value: &str) -> CacheResult<()>;
}
