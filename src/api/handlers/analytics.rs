//! Handler for aggregated link analytics.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::domain::entities::Summary;
use crate::error::AppError;
use crate::state::AppState;

/// Retrieves the aggregated visit summary for an alias.
///
/// # Endpoint
///
/// `GET /analytics/{alias}`
///
/// # Response
///
/// Total click count plus per-day and per-user-agent histograms. The summary
/// may lag the most recent visit by one background refresh; an alias with no
/// recorded visits yields an all-zero summary.
pub async fn analytics_handler(
    Path(alias): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Summary>, AppError> {
    let summary = state.analytics_service.get_summary(&alias).await?;

    Ok(Json(summary))
}
