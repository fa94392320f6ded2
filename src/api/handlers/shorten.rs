//! Handler for link shortening.

use axum::{Json, extract::State, http::StatusCode};
use validator::Validate;

use crate::api::dto::ShortenRequest;
use crate::domain::entities::Link;
use crate::error::AppError;
use crate::state::AppState;

/// Creates a shortened link.
///
/// # Endpoint
///
/// `POST /shorten`
///
/// # Request Body
///
/// ```json
/// { "url": "https://example.com/page", "alias": "docs01" }
/// ```
///
/// The `alias` field is optional; when absent a random 6-character alias is
/// generated.
///
/// # Errors
///
/// Returns 400 Bad Request if the URL is invalid.
/// Returns 409 Conflict if the requested alias is already taken.
pub async fn shorten_handler(
    State(state): State<AppState>,
    Json(payload): Json<ShortenRequest>,
) -> Result<(StatusCode, Json<Link>), AppError> {
    payload.validate()?;

    let link = state
        .link_service
        .create_link(payload.url, payload.alias)
        .await?;

    Ok((StatusCode::CREATED, Json(link)))
}
