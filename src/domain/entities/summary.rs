//! Aggregated analytics summary for a single alias.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Derived click aggregates for one alias.
///
/// Not an independent entity: a summary is a cached projection recomputed
/// from the visit log and may be stale by up to one refresh. It is never
/// treated as authoritative.
///
/// `daily` maps `YYYY-MM-DD` day strings to click counts; `user_agent` maps
/// raw user-agent strings to click counts. Display ordering of either
/// histogram is a presentation concern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub alias: String,
    pub total_clicks: i64,
    pub daily: BTreeMap<String, i64>,
    pub user_agent: BTreeMap<String, i64>,
}

impl Summary {
    /// A summary for an alias with no recorded visits.
    pub fn empty(alias: impl Into<String>) -> Self {
        Self {
            alias: alias.into(),
            total_clicks: 0,
            daily: BTreeMap::new(),
            user_agent: BTreeMap::new(),
        }
    }
}
