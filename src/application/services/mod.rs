//! Application services.

mod analytics_service;
mod link_service;

pub use analytics_service::{AnalyticsService, SUMMARY_KEY_PREFIX};
pub use link_service::LinkService;

#[cfg(test)]
pub(crate) mod test_support;
