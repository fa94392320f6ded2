//! Link entity representing a shortened URL mapping.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A shortened URL link.
///
/// The alias uniquely determines at most one link; `id` and `created_at` are
/// assigned by the durable store at creation and immutable thereafter.
/// Serialized as JSON when stored in the cache, keyed by alias.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    pub id: i64,
    pub url: String,
    pub alias: String,
    pub created_at: DateTime<Utc>,
}

impl Link {
    /// Creates a new Link instance.
    pub fn new(id: i64, url: String, alias: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            url,
            alias,
            created_at,
        }
    }
}

/// Input data for creating a new link. The alias must already be allocated.
#[derive(Debug, Clone)]
pub struct NewLink {
    pub url: String,
    pub alias: String,
}
