//! Repository traits abstracting the durable store.

mod analytics_repository;
mod link_repository;

pub use analytics_repository::AnalyticsRepository;
pub use link_repository::LinkRepository;

#[cfg(test)]
pub use analytics_repository::MockAnalyticsRepository;
#[cfg(test)]
pub use link_repository::MockLinkRepository;
