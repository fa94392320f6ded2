//! Visit recording and incremental analytics aggregation.

use std::sync::Arc;
use std::time::Duration;

use crate::domain::entities::{NewVisit, Summary};
use crate::domain::repositories::AnalyticsRepository;
use crate::error::AppError;
use crate::infrastructure::cache::CacheStore;
use metrics::counter;
use tracing::{debug, error, warn};

/// Prefix for cached summary keys, keeping them disjoint from link entries
/// which are keyed by bare alias.
pub const SUMMARY_KEY_PREFIX: &str = "analytics:";

fn summary_key(alias: &str) -> String {
    format!("{SUMMARY_KEY_PREFIX}{alias}")
}

/// Service recording raw visit events and maintaining the cached summary.
///
/// The aggregate queries (count / group-by) are more expensive than a point
/// read, so `record_visit` never runs them inline: it persists the raw event
/// and hands the recompute to a detached task. Summary staleness is bounded
/// to one visit's worth of lag under light load, and the summary is never
/// treated as authoritative.
pub struct AnalyticsService {
    repo: Arc<dyn AnalyticsRepository>,
    cache: Arc<dyn CacheStore>,
    refresh_deadline: Duration,
}

impl AnalyticsService {
    /// Creates a new analytics service.
    ///
    /// `refresh_deadline` bounds each background summary refresh. It is
    /// independent of any request deadline; the triggering request has
    /// already been answered when the refresh runs.
    pub fn new(
        repo: Arc<dyn AnalyticsRepository>,
        cache: Arc<dyn CacheStore>,
        refresh_deadline: Duration,
    ) -> Self {
        Self {
            repo,
            cache,
            refresh_deadline,
        }
    }

    /// Persists a raw visit event and triggers a detached summary refresh.
    ///
    /// The event write is synchronous and authoritative; the refresh is
    /// fire-and-forget and its failure never reaches the caller, only the
    /// log and metrics.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Store`] if the event cannot be persisted.
    pub async fn record_visit(&self, event: NewVisit) -> Result<i64, AppError> {
        let visit = self.repo.save_event(event).await?;
        debug!(alias = %visit.alias, id = visit.id, "visit recorded");

        let repo = self.repo.clone();
        let cache = self.cache.clone();
        let alias = visit.alias.clone();
        let deadline = self.refresh_deadline;

        tokio::spawn(async move {
            match tokio::time::timeout(deadline, refresh_summary(&*repo, &*cache, &alias)).await {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    counter!("summary_refresh_failures_total").increment(1);
                    error!(alias = %alias, error = %e, "summary refresh failed");
                }
                Err(_) => {
                    counter!("summary_refresh_failures_total").increment(1);
                    error!(alias = %alias, "summary refresh timed out");
                }
            }
        });

        Ok(visit.id)
    }

    /// Returns the aggregated summary for an alias, cache-aside.
    ///
    /// Only an actual hit with a valid payload short-circuits the recompute;
    /// a miss or an unavailable cache recomputes synchronously from the
    /// store and caches the result best-effort. A reader racing a concurrent
    /// refresh may observe either the pre- or post-visit summary.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Serialization`] on a corrupt cache entry.
    /// Returns [`AppError::Store`] on database errors.
    pub async fn get_summary(&self, alias: &str) -> Result<Summary, AppError> {
        let key = summary_key(alias);

        match self.cache.get_with_retry(&key).await {
            Ok(payload) => {
                return serde_json::from_str(&payload)
                    .map_err(|e| AppError::Serialization { key, source: e });
            }
            Err(e) if e.is_miss() => {}
            Err(e) => {
                warn!(alias, error = %e, "cache unavailable, recomputing summary from store");
            }
        }

        let summary = compute_summary(&*self.repo, alias).await?;
        store_summary(&*self.cache, &summary).await;

        Ok(summary)
    }
}

/// Recomputes the three aggregates from the store. The queries are read
/// independently; slight inconsistency between them is accepted.
async fn compute_summary(
    repo: &dyn AnalyticsRepository,
    alias: &str,
) -> Result<Summary, AppError> {
    let total_clicks = repo.count_clicks(alias).await?;
    let daily = repo.clicks_by_day(alias).await?;
    let user_agent = repo.clicks_by_user_agent(alias).await?;

    Ok(Summary {
        alias: alias.to_string(),
        total_clicks,
        daily,
        user_agent,
    })
}

/// Best-effort write of the serialized summary; failures are logged only.
async fn store_summary(cache: &dyn CacheStore, summary: &Summary) {
    let key = summary_key(&summary.alias);

    let payload = match serde_json::to_string(summary) {
        Ok(payload) => payload,
        Err(e) => {
            warn!(key, error = %e, "failed to serialize analytics summary");
            return;
        }
    };

    if let Err(e) = cache.set_with_retry(&key, &payload).await {
        warn!(key, error = %e, "failed to cache analytics summary");
    }
}

async fn refresh_summary(
    repo: &dyn AnalyticsRepository,
    cache: &dyn CacheStore,
    alias: &str,
) -> Result<(), AppError> {
    let summary = compute_summary(repo, alias).await?;
    store_summary(cache, &summary).await;
    Ok(())
}
