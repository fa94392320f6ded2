//! Application error types and their HTTP mapping.
//!
//! Alias conflicts and missing aliases map to distinct client-visible
//! outcomes; everything else collapses to a generic internal error so no
//! internal detail leaks outward.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

#[derive(Serialize)]
struct ErrorInfo {
    code: &'static str,
    message: String,
}

/// Error taxonomy of the alias resolution and analytics core.
#[derive(Debug, Error)]
pub enum AppError {
    /// The requested alias is already taken. User-correctable, never retried
    /// internally.
    #[error("alias already exists: {0}")]
    AliasConflict(String),

    /// No link exists for the alias. Terminal, surfaced to the caller.
    #[error("alias not found: {0}")]
    AliasNotFound(String),

    /// The bounded generation loop failed to find a free alias.
    #[error("alias space exhausted after {0} attempts")]
    AliasSpaceExhausted(u32),

    /// A cached payload failed to deserialize. Treating this as a miss would
    /// mask data corruption, so it is a hard error.
    #[error("corrupt cache payload under key {key}")]
    Serialization {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// The durable store failed. Never masked; surfaced as a generic
    /// internal failure.
    #[error("store error: {0}")]
    Store(#[from] sqlx::Error),

    #[error("validation error: {0}")]
    Validation(String),
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Validation(errors.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::AliasConflict(alias) => (
                StatusCode::CONFLICT,
                "conflict",
                format!("alias already exists: {alias}"),
            ),
            AppError::AliasNotFound(alias) => (
                StatusCode::NOT_FOUND,
                "not_found",
                format!("alias not found: {alias}"),
            ),
            AppError::Validation(message) => {
                (StatusCode::BAD_REQUEST, "validation_error", message.clone())
            }
            AppError::AliasSpaceExhausted(_)
            | AppError::Serialization { .. }
            | AppError::Store(_) => {
                tracing::error!(error = %self, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "internal server error".to_string(),
                )
            }
        };

        let body = ErrorBody {
            error: ErrorInfo { code, message },
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conflict_maps_to_409() {
        let response = AppError::AliasConflict("docs".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn not_found_maps_to_404() {
        let response = AppError::AliasNotFound("gone".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn internal_failures_collapse_to_500() {
        for err in [
            AppError::AliasSpaceExhausted(10),
            AppError::Store(sqlx::Error::PoolTimedOut),
        ] {
            let response = err.into_response();
            assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        }
    }
}
