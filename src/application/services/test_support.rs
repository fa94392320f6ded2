//! Cache doubles shared by the service unit tests.

use crate::infrastructure::cache::{CacheError, CacheResult, CacheStore};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

/// In-memory cache with externally inspectable contents.
#[derive(Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, key: &str, value: &str) {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().unwrap().get(key).cloned()
    }

    pub fn evict(&self, key: &str) {
        self.entries.lock().unwrap().remove(key);
    }
}

#[async_trait]
impl CacheStore for MemoryCache {
    async fn get_with_retry(&self, key: &str) -> CacheResult<String> {
        self.entries
            .lock()
            .unwrap()
            .get(key)
            .cloned()
            .ok_or(CacheError::Miss)
    }

    async fn set_with_retry(&self, key: &str, value: &str) -> CacheResult<()> {
        self.insert(key, value);
        Ok(())
    }
}

/// Cache whose every access fails with a transport error, as if Redis were
/// unreachable with the retry budget exhausted.
pub struct FailingCache;

#[async_trait]
impl CacheStore for FailingCache {
    async fn get_with_retry(&self, _key: &str) -> CacheResult<String> {
        Err(CacheError::ConnectionError("connection refused".to_string()))
    }

    async fn set_with_retry(&self, _key: &str, _value: &str) -> CacheResult<()> {
        Err(CacheError::ConnectionError("connection refused".to_string()))
    }
}
