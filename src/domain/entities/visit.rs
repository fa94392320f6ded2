//! Visit entity representing a single redirect event.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A visit recorded when a shortened link is accessed.
///
/// Visits reference their link by alias only, with no ownership: a link may
/// be deleted without erasing its historical visits. Once written a visit is
/// never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Visit {
    pub id: i64,
    pub alias: String,
    pub user_agent: String,
    pub device: String,
    pub os: String,
    pub browser: String,
    pub ip: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Input data for recording a new visit.
///
/// Client attributes are derived from the request at the HTTP boundary; the
/// id and timestamp are assigned by the store.
#[derive(Debug, Clone)]
pub struct NewVisit {
    pub alias: String,
    pub user_agent: String,
    pub device: String,
    pub os: String,
    pub browser: String,
    pub ip: Option<String>,
}
