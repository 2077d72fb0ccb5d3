//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Liveness check
//! POST /orders/generate        - Run a seeding job and return its report
//! ```

pub mod orders;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Build the complete router (without state).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/orders/generate", post(orders::generate))
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check Shopify.
async fn health() -> &'static str {
    "ok"
}
