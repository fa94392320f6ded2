//! Link creation and cache-aside alias resolution.

use std::sync::Arc;

use crate::application::alias_allocator::AliasAllocator;
use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::infrastructure::cache::CacheStore;
use tracing::warn;

/// Service for creating and resolving shortened links.
///
/// Resolution is the hot path and is cache-aside: the cache is consulted
/// first, the store on miss, and the entry is repopulated afterwards. Cache
/// entries are keyed by alias (never by store id) because alias lookup is
/// the only access pattern that matters on this path. Correctness never
/// depends on the cache: every cache write is best-effort and a missing
/// entry self-heals on the next read.
pub struct LinkService {
    repo: Arc<dyn LinkRepository>,
    cache: Arc<dyn CacheStore>,
    allocator: AliasAllocator,
}

impl LinkService {
    /// Creates a new link service.
    pub fn new(
        repo: Arc<dyn LinkRepository>,
        cache: Arc<dyn CacheStore>,
        alias_max_attempts: u32,
    ) -> Self {
        let allocator = AliasAllocator::new(repo.clone(), alias_max_attempts);
        Self {
            repo,
            cache,
            allocator,
        }
    }

    /// Creates a short link.
    ///
    /// Allocates or validates the alias, persists the link, then populates
    /// the cache best-effort.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::AliasConflict`] if the requested alias is taken.
    /// Returns [`AppError::AliasSpaceExhausted`] if alias generation fails
    /// within its attempt budget.
    /// Returns [`AppError::Store`] on persistence failures.
    pub async fn create_link(
        &self,
        url: String,
        requested_alias: Option<String>,
    ) -> Result<Link, AppError> {
        let alias = self.allocator.allocate(requested_alias.as_deref()).await?;

        let link = self.repo.create(NewLink { url, alias }).await?;

        self.cache_link(&link).await;

        Ok(link)
    }

    /// Resolves an alias to its link, cache-aside.
    ///
    /// A transport-level cache failure is treated like a miss: the read path
    /// must never fail solely because the cache is unavailable. A corrupt
    /// cached payload, however, is a hard error; treating it as a miss would
    /// silently mask data corruption.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::AliasNotFound`] if no link exists for the alias.
    /// Returns [`AppError::Serialization`] on a corrupt cache entry.
    /// Returns [`AppError::Store`] on database errors.
    pub async fn resolve_alias(&self, alias: &str) -> Result<Link, AppError> {
        match self.cache.get_with_retry(alias).await {
            Ok(payload) => {
                let link =
                    serde_json::from_str(&payload).map_err(|e| AppError::Serialization {
                        key: alias.to_string(),
                        source: e,
                    })?;
                return Ok(link);
            }
            Err(e) if e.is_miss() => {}
            Err(e) => {
                warn!(alias, error = %e, "cache unavailable, falling back to store");
            }
        }

        let link = self
            .repo
            .find_by_alias(alias)
            .await?
            .ok_or_else(|| AppError::AliasNotFound(alias.to_string()))?;

        self.cache_link(&link).await;

        Ok(link)
    }

    /// Best-effort cache population, keyed by alias. Failures are logged and
    /// never propagated.
    async fn cache_link(&self, link: &Link) {
        let payload = match serde_json::to_string(link) {
            Ok(payload) => payload,
            Err(e) => {
                warn!(alias = %link.alias, error = %e, "failed to serialize link for cache");
                return;
            }
        };

        if let Err(e) = self.cache.set_with_retry(&link.alias, &payload).await {
            warn!(alias = %link.alias, error = %e, "failed to cache link");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::test_support::{FailingCache, MemoryCache};
    use crate::domain::repositories::MockLinkRepository;
    use crate::utils::alias::ALIAS_LENGTH;
    use chrono::Utc;

    fn stored_link(id: i64, url: &str, alias: &str) -> Link {
        Link::new(id, url.to_string(), alias.to_string(), Utc::now())
    }

    #[tokio::test]
    async fn test_create_link_with_generated_alias() {
        let mut mock_repo = MockLinkRepository::new();
        mock_repo
            .expect_find_by_alias()
            .times(1)
            .returning(|_| Ok(None));
        mock_repo
            .expect_create()
            .withf(|new_link| new_link.alias.len() == ALIAS_LENGTH)
            .times(1)
            .returning(|new_link| Ok(stored_link(1, &new_link.url, &new_link.alias)));

        let cache = Arc::new(MemoryCache::new());
        let service = LinkService::new(Arc::new(mock_repo), cache.clone(), 10);

        let link = service
            .create_link("https://example.com/page".to_string(), None)
            .await
            .unwrap();

        assert_eq!(link.url, "https://example.com/page");
        assert_eq!(link.alias.len(), ALIAS_LENGTH);

        // cache populated under the alias key with the stored link
        let cached: Link = serde_json::from_str(&cache.get(&link.alias).unwrap()).unwrap();
        assert_eq!(cached, link);
    }

    #[tokio::test]
    async fn test_create_link_requested_alias_conflict() {
        let mut mock_repo = MockLinkRepository::new();
        mock_repo
            .expect_find_by_alias()
            .times(1)
            .returning(|alias| Ok(Some(stored_link(5, "https://other.com", alias))));
        mock_repo.expect_create().times(0);

        let service = LinkService::new(Arc::new(mock_repo), Arc::new(MemoryCache::new()), 10);

        let result = service
            .create_link(
                "https://example.com".to_string(),
                Some("taken1".to_string()),
            )
            .await;

        assert!(matches!(result, Err(AppError::AliasConflict(_))));
    }

    #[tokio::test]
    async fn test_create_link_survives_cache_outage() {
        let mut mock_repo = MockLinkRepository::new();
        mock_repo
            .expect_find_by_alias()
            .times(1)
            .returning(|_| Ok(None));
        mock_repo
            .expect_create()
            .times(1)
            .returning(|new_link| Ok(stored_link(1, &new_link.url, &new_link.alias)));

        let service = LinkService::new(Arc::new(mock_repo), Arc::new(FailingCache), 10);

        // cache write failure must not fail the create
        let link = service
            .create_link("https://example.com".to_string(), None)
            .await
            .unwrap();
        assert_eq!(link.url, "https://example.com");
    }

    #[tokio::test]
    async fn test_resolve_alias_cache_hit_skips_store() {
        let mut mock_repo = MockLinkRepository::new();
        mock_repo.expect_find_by_alias().times(0);

        let cache = Arc::new(MemoryCache::new());
        let link = stored_link(1, "https://example.com", "abc123");
        cache.insert("abc123", &serde_json::to_string(&link).unwrap());

        let service = LinkService::new(Arc::new(mock_repo), cache, 10);

        let resolved = service.resolve_alias("abc123").await.unwrap();
        assert_eq!(resolved, link);
    }

    #[tokio::test]
    async fn test_resolve_alias_corrupt_payload_is_hard_error() {
        let mut mock_repo = MockLinkRepository::new();
        mock_repo.expect_find_by_alias().times(0);

        let cache = Arc::new(MemoryCache::new());
        cache.insert("abc123", "{not json");

        let service = LinkService::new(Arc::new(mock_repo), cache, 10);

        let result = service.resolve_alias("abc123").await;
        assert!(matches!(result, Err(AppError::Serialization { .. })));
    }

    #[tokio::test]
    async fn test_resolve_alias_miss_falls_back_and_repopulates() {
        let mut mock_repo = MockLinkRepository::new();
        mock_repo
            .expect_find_by_alias()
            .withf(|alias| alias == "abc123")
            .times(1)
            .returning(|alias| Ok(Some(stored_link(1, "https://example.com", alias))));

        let cache = Arc::new(MemoryCache::new());
        let service = LinkService::new(Arc::new(mock_repo), cache.clone(), 10);

        let resolved = service.resolve_alias("abc123").await.unwrap();
        assert_eq!(resolved.url, "https://example.com");

        // self-healing: the entry is present afterwards
        let cached: Link = serde_json::from_str(&cache.get("abc123").unwrap()).unwrap();
        assert_eq!(cached, resolved);
    }

    #[tokio::test]
    async fn test_resolve_alias_not_found() {
        let mut mock_repo = MockLinkRepository::new();
        mock_repo
            .expect_find_by_alias()
            .times(1)
            .returning(|_| Ok(None));

        let service = LinkService::new(Arc::new(mock_repo), Arc::new(MemoryCache::new()), 10);

        let result = service.resolve_alias("ghost1").await;
        assert!(matches!(result, Err(AppError::AliasNotFound(a)) if a == "ghost1"));
    }

    #[tokio::test]
    async fn test_resolve_alias_cache_outage_falls_back_to_store() {
        let mut mock_repo = MockLinkRepository::new();
        mock_repo
            .expect_find_by_alias()
            .times(1)
            .returning(|alias| Ok(Some(stored_link(1, "https://example.com", alias))));

        let service = LinkService::new(Arc::new(mock_repo), Arc::new(FailingCache), 10);

        let resolved = service.resolve_alias("abc123").await.unwrap();
        assert_eq!(resolved.url, "https://example.com");
    }
}
