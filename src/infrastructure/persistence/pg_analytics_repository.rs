//! PostgreSQL implementation of the analytics repository.

use async_trait::async_trait;
use sqlx::{PgPool, Row};
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::domain::entities::{NewVisit, Visit};
use crate::domain::repositories::AnalyticsRepository;
use crate::error::AppError;

/// PostgreSQL repository for the visit event log.
///
/// Raw events are append-only; the aggregate queries compute the summary
/// projections directly in SQL (count / group-by), which is why callers
/// cache their combined result rather than re-running them per read.
pub struct PgAnalyticsRepository {
    pool: Arc<PgPool>,
}

impl PgAnalyticsRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AnalyticsRepository for PgAnalyticsRepository {
    async fn save_event(&self, event: NewVisit) -> Result<Visit, AppError> {
        let row = sqlx::query(
            r#"
            INSERT INTO visits (alias, user_agent, device, os, browser, ip)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, alias, user_agent, device, os, browser, ip, created_at
            "#,
        )
        .bind(&event.alias)
        .bind(&event.user_agent)
        .bind(&event.device)
        .bind(&event.os)
        .bind(&event.browser)
        .bind(&event.ip)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(Visit {
            id: row.try_get("id")?,
            alias: row.try_get("alias")?,
            user_agent: row.try_get("user_agent")?,
            device: row.try_get("device")?,
            os: row.try_get("os")?,
            browser: row.try_get("browser")?,
            ip: row.try_get("ip")?,
            created_at: row.try_get("created_at")?,
        })
    }

    async fn count_clicks(&self, alias: &str) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM visits WHERE alias = $1")
            .bind(alias)
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }

    async fn clicks_by_day(&self, alias: &str) -> Result<BTreeMap<String, i64>, AppError> {
        let rows = sqlx::query(
            r#"
            SELECT TO_CHAR(created_at, 'YYYY-MM-DD') AS day, COUNT(*) AS clicks
            FROM visits
            WHERE alias = $1
            GROUP BY day
            ORDER BY day DESC
            "#,
        )
        .bind(alias)
        .fetch_all(self.pool.as_ref())
        .await?;

        let mut result = BTreeMap::new();
        for row in rows {
            result.insert(row.try_get::<String, _>("day")?, row.try_get("clicks")?);
        }

        Ok(result)
    }

    async fn clicks_by_user_agent(&self, alias: &str) -> Result<BTreeMap<String, i64>, AppError> {
        let rows = sqlx::query(
            r#"
            SELECT user_agent, COUNT(*) AS clicks
            FROM visits
            WHERE alias = $1
            GROUP BY user_agent
            ORDER BY clicks DESC
            "#,
        )
        .bind(alias)
        .fetch_all(self.pool.as_ref())
        .await?;

        let mut result = BTreeMap::new();
        for row in rows {
            result.insert(
                row.try_get::<String, _>("user_agent")?,
                row.try_get("clicks")?,
            );
        }

        Ok(result)
    }
}
