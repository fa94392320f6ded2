//! PostgreSQL persistence layer.

mod pg_analytics_repository;
mod pg_link_repository;

pub use pg_analytics_repository::PgAnalyticsRepository;
pub use pg_link_repository::PgLinkRepository;
