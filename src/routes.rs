//! Router configuration.
//!
//! # Route Structure
//!
//! - `POST /shorten`            - Create a shortened link
//! - `GET  /{alias}`            - Short link redirect (hot path)
//! - `GET  /analytics/{alias}`  - Aggregated visit summary
//! - `GET  /health`             - Liveness check

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{
    LatencyUnit,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::api::handlers::{
    analytics_handler, health_handler, redirect_handler, shorten_handler,
};
use crate::state::AppState;

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/shorten", post(shorten_handler))
        .route("/analytics/{alias}", get(analytics_handler))
        .route("/health", get(health_handler))
        .route("/{alias}", get(redirect_handler))
        .with_state(state)
        .layer(trace_layer())
}

/// Structured request/response logging: an `INFO` span per request with the
/// response status and latency in milliseconds.
fn trace_layer()
-> TraceLayer<tower_http::classify::SharedClassifier<tower_http::classify::ServerErrorsAsFailures>>
{
    TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(
            DefaultOnResponse::new()
                .level(Level::INFO)
                .latency_unit(LatencyUnit::Millis),
        )
}
