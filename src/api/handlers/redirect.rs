//! Handler for short URL redirect.

use axum::{
    extract::{ConnectInfo, Path, State},
    http::{HeaderMap, StatusCode, header},
    response::IntoResponse,
};
use std::net::SocketAddr;
use std::time::Duration;
use tracing::{debug, error};

use crate::api::client_info::build_visit;
use crate::error::AppError;
use crate::state::AppState;

/// Deadline for the detached visit recording. The redirect has already been
/// issued, so this bounds background work only.
const VISIT_RECORD_DEADLINE: Duration = Duration::from_secs(2);

/// Redirects an alias to its original URL.
///
/// # Endpoint
///
/// `GET /{alias}`
///
/// # Request Flow
///
/// 1. Resolve the alias (cache-aside; DB fallback on miss or cache outage)
/// 2. Spawn a detached task recording the visit and refreshing the summary
/// 3. Return `302 Found` without waiting for the recording
///
/// Visit recording is fire-and-forget: its failure is logged, never surfaced
/// to the visitor.
///
/// # Errors
///
/// Returns 404 Not Found if the alias doesn't exist.
pub async fn redirect_handler(
    Path(alias): Path<String>,
    State(state): State<AppState>,
    headers: HeaderMap,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
) -> Result<impl IntoResponse, AppError> {
    let link = state.link_service.resolve_alias(&alias).await?;

    let event = build_visit(&link.alias, &headers, Some(addr.ip()));
    let analytics = state.analytics_service.clone();

    tokio::spawn(async move {
        match tokio::time::timeout(VISIT_RECORD_DEADLINE, analytics.record_visit(event)).await {
            Ok(Ok(id)) => debug!(id, "visit recorded"),
            Ok(Err(e)) => error!(error = %e, "failed to record visit"),
            Err(_) => error!("visit recording timed out"),
        }
    });

    Ok((StatusCode::FOUND, [(header::LOCATION, link.url)]))
}
