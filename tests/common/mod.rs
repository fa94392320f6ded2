//! In-memory store and cache doubles for integration tests.
//!
//! These implement the same repository and cache traits as the PostgreSQL
//! and Redis adapters, so the services can be exercised end to end without
//! external processes.

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::Utc;
use std::collections::{BTreeMap, HashMap};
use std::net::SocketAddr;
use std::sync::Mutex;
use std::sync::atomic::{AtomicI64, Ordering};

use shortlink::domain::entities::{Link, NewLink, NewVisit, Visit};
use shortlink::domain::repositories::{AnalyticsRepository, LinkRepository};
use shortlink::error::AppError;
use shortlink::infrastructure::cache::{CacheError, CacheResult, CacheStore};

/// Link store backed by a map keyed by alias, enforcing alias uniqueness the
/// way the database unique constraint does.
#[derive(Default)]
pub struct MemoryLinkRepository {
    links: Mutex<HashMap<String, Link>>,
    next_id: AtomicI64,
}

impl MemoryLinkRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LinkRepository for MemoryLinkRepository {
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError> {
        let mut links = self.links.lock().unwrap();

        if links.contains_key(&new_link.alias) {
            return Err(AppError::AliasConflict(new_link.alias));
        }

        let link = Link::new(
            self.next_id.fetch_add(1, Ordering::SeqCst) + 1,
            new_link.url,
            new_link.alias.clone(),
            Utc::now(),
        );
        links.insert(new_link.alias, link.clone());

        Ok(link)
    }

    async fn find_by_alias(&self, alias: &str) -> Result<Option<Link>, AppError> {
        Ok(self.links.lock().unwrap().get(alias).cloned())
    }
}

/// Append-only visit log with in-memory aggregate queries.
#[derive(Default)]
pub struct MemoryAnalyticsRepository {
    visits: Mutex<Vec<Visit>>,
    next_id: AtomicI64,
}

impl MemoryAnalyticsRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AnalyticsRepository for MemoryAnalyticsRepository {
    async fn save_event(&self, event: NewVisit) -> Result<Visit, AppError> {
        let visit = Visit {
            id: self.next_id.fetch_add(1, Ordering::SeqCst) + 1,
            alias: event.alias,
            user_agent: event.user_agent,
            device: event.device,
            os: event.os,
            browser: event.browser,
            ip: event.ip,
            created_at: Utc::now(),
        };

        self.visits.lock().unwrap().push(visit.clone());

        Ok(visit)
    }

    async fn count_clicks(&self, alias: &str) -> Result<i64, AppError> {
        let visits = self.visits.lock().unwrap();
        Ok(visits.iter().filter(|v| v.alias == alias).count() as i64)
    }

    async fn clicks_by_day(&self, alias: &str) -> Result<BTreeMap<String, i64>, AppError> {
        let visits = self.visits.lock().unwrap();

        let mut result = BTreeMap::new();
        for visit in visits.iter().filter(|v| v.alias == alias) {
            let day = visit.created_at.format("%Y-%m-%d").to_string();
            *result.entry(day).or_insert(0) += 1;
        }

        Ok(result)
    }

    async fn clicks_by_user_agent(&self, alias: &str) -> Result<BTreeMap<String, i64>, AppError> {
        let visits = self.visits.lock().unwrap();

        let mut result = BTreeMap::new();
        for visit in visits.iter().filter(|v| v.alias == alias) {
            *result.entry(visit.user_agent.clone()).or_insert(0) += 1;
        }

        Ok(result)
    }
}

/// In-memory cache with externally inspectable contents, so tests can evict
/// entries and observe repopulation.
#[derive(Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().unwrap().get(key).cloned()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.lock().unwrap().contains_key(key)
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
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Cache whose every access fails with a transport error, modelling Redis
/// being unreachable with the retry budget exhausted.
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

/// Spawns the full application on an ephemeral local port and returns its
/// base URL. Used by tests that need a real socket (the redirect handler
/// reads the peer address).
pub async fn spawn_app(state: shortlink::AppState) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind test listener");
    let addr = listener.local_addr().unwrap();

    let app = shortlink::routes::app_router(state);

    tokio::spawn(async move {
        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await
        .unwrap();
    });

    format!("http://{addr}")
}
