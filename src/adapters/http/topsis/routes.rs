//! Axum router configuration for TOPSIS endpoints.

use std::time::Duration;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::{limit::RequestBodyLimitLayer, timeout::TimeoutLayer, trace::TraceLayer};

use super::handlers::{health, submit, TopsisAppState};

/// Create the TOPSIS API router.
///
/// # Routes
///
/// - `POST /submit` - Rank an uploaded table (multipart form)
/// - `GET /health` - Liveness probe
pub fn topsis_router() -> Router<TopsisAppState> {
    Router::new()
        .route("/submit", post(submit))
        .route("/health", get(health))
}

/// Build the complete application with state and middleware.
///
/// `max_upload_bytes` caps the whole request body; `timeout` bounds each
/// request end to end.
///
/// # Example
///
/// ```ignore
/// let app = build_app(state, config.server.max_upload_bytes, config.server.request_timeout());
/// axum::serve(listener, app).await?;
/// ```
pub fn build_app(state: TopsisAppState, max_upload_bytes: usize, timeout: Duration) -> Router {
    topsis_router()
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(RequestBodyLimitLayer::new(max_upload_bytes))
        .layer(TimeoutLayer::new(timeout))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
