//! Repository trait for the visit event log and its aggregates.

use crate::domain::entities::{NewVisit, Visit};
use crate::error::AppError;
use async_trait::async_trait;
use std::collections::BTreeMap;

/// Repository interface for visit events and aggregate queries.
///
/// The three aggregate queries are read independently; this system does not
/// require transactional consistency across them.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgAnalyticsRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AnalyticsRepository: Send + Sync {
    /// Appends a raw visit event; the store assigns id and timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Store`] on database errors.
    async fn save_event(&self, event: NewVisit) -> Result<Visit, AppError>;

    /// Total number of recorded visits for the alias.
    async fn count_clicks(&self, alias: &str) -> Result<i64, AppError>;

    /// Visit counts grouped by calendar day (`YYYY-MM-DD`).
    async fn clicks_by_day(&self, alias: &str) -> Result<BTreeMap<String, i64>, AppError>;

    /// Visit counts grouped by raw user-agent string.
    async fn clicks_by_user_agent(&self, alias: &str) -> Result<BTreeMap<String, i64>, AppError>;
}
