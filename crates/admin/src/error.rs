//! Unified error handling for the seeder service.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::seeding::SeedError;

/// Application-level error type for HTTP handlers.
///
/// Only request problems surface here; per-order failures are part of the
/// run report.
#[derive(Debug, Error)]
pub enum AppError {
    /// Seeding run could not start.
    #[error("{0}")]
    Seed(#[from] SeedError),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::warn!(error = %self, "Rejected seeding request");

        (StatusCode::BAD_REQUEST, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
