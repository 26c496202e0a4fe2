//! Axum Router Configuration
//!
//! The voice platform posts every request to a single webhook endpoint; a
//! bare liveness route sits alongside it for deployment checks.

use crate::{handlers, state::AppState};
use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

/// Creates the main Axum router for the application.
pub fn create_router(app_state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", post(handlers::webhook))
        .route("/health", get(|| async { "ok" }))
        .with_state(app_state)
}
