//! Shared application state injected into handlers.

use std::sync::Arc;

use crate::application::services::{AnalyticsService, LinkService};

/// Application state shared across all request handlers.
///
/// Services are behind `Arc` and safe for concurrent use; each request is
/// handled by an independently scheduled task with no in-process locking in
/// this core.
#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService>,
    pub analytics_service: Arc<AnalyticsService>,
}

impl AppState {
    /// Creates application state from the constructed services.
    pub fn new(link_service: Arc<LinkService>, analytics_service: Arc<AnalyticsService>) -> Self {
        Self {
            link_service,
            analytics_service,
        }
    }
}
