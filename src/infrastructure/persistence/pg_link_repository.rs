//! PostgreSQL implementation of the link repository.

use async_trait::async_trait;
use sqlx::{PgPool, Row};
use std::sync::Arc;

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

/// PostgreSQL repository for link storage and retrieval.
///
/// The `links_alias_key` unique constraint is the arbiter of alias
/// ownership: when two creates race the same alias, the database admits
/// exactly one and the other surfaces as [`AppError::AliasConflict`].
pub struct PgLinkRepository {
    pool: Arc<PgPool>,
}

impl PgLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

fn row_to_link(row: &sqlx::postgres::PgRow) -> Result<Link, sqlx::Error> {
    Ok(Link {
        id: row.try_get("id")?,
        url: row.try_get("url")?,
        alias: row.try_get("alias")?,
        created_at: row.try_get("created_at")?,
    })
}

#[async_trait]
impl LinkRepository for PgLinkRepository {
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError> {
        let row = sqlx::query(
            r#"
            INSERT INTO links (url, alias)
            VALUES ($1, $2)
            RETURNING id, url, alias, created_at
            "#,
        )
        .bind(&new_link.url)
        .bind(&new_link.alias)
        .fetch_one(self.pool.as_ref())
        .await
        .map_err(|e| {
            if e.as_database_error()
                .is_some_and(|db| db.is_unique_violation())
            {
                AppError::AliasConflict(new_link.alias.clone())
            } else {
                AppError::Store(e)
            }
        })?;

        Ok(row_to_link(&row)?)
    }

    async fn find_by_alias(&self, alias: &str) -> Result<Option<Link>, AppError> {
        let row = sqlx::query(
            r#"
            SELECT id, url, alias, created_at
            FROM links
            WHERE alias = $1
            "#,
        )
        .bind(alias)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.as_ref().map(row_to_link).transpose()?)
    }
}
