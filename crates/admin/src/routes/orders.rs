//! Order seeding route handlers.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{Instrument, info, info_span};
use uuid::Uuid;

use crate::error::AppError;
use crate::seeding::{ReferenceData, ReportSummary, RunRequest, SubmissionOutcome};
use crate::state::AppState;

/// Body of `POST /orders/generate`.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateOrdersRequest {
    /// Number of orders to create.
    pub count: i64,
    /// Orders per batch (defaults to `ORDER_SEED_BATCH_SIZE`).
    pub batch_size: Option<usize>,
    /// Pause between batches in milliseconds (defaults to `ORDER_SEED_BATCH_DELAY_MS`).
    pub inter_batch_delay_ms: Option<u64>,
}

impl From<&GenerateOrdersRequest> for RunRequest {
    fn from(body: &GenerateOrdersRequest) -> Self {
        Self {
            count: body.count,
            batch_size: body.batch_size,
            inter_batch_delay: body.inter_batch_delay_ms.map(Duration::from_millis),
        }
    }
}

/// Response of `POST /orders/generate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateOrdersResponse {
    /// Correlation ID of the run, also attached to its log lines.
    pub run_id: Uuid,
    /// When reference data loading began.
    pub started_at: DateTime<Utc>,
    /// When the last batch resolved.
    pub finished_at: DateTime<Utc>,
    /// Counts by outcome kind.
    pub summary: ReportSummary,
    /// One outcome per requested order, in batch order.
    pub outcomes: Vec<SubmissionOutcome>,
}

/// Fetch reference data, then create `count` synthetic orders in paced batches.
///
/// Invalid input is rejected with 400 before anything is sent to Shopify.
/// Per-order failures are part of the 200 response, not errors.
pub async fn generate(
    State(state): State<AppState>,
    body: Result<Json<GenerateOrdersRequest>, JsonRejection>,
) -> Result<Json<GenerateOrdersResponse>, AppError> {
    let Json(body) = body?;
    let request = RunRequest::from(&body);
    request.plan(state.config())?;

    let run_id = Uuid::new_v4();
    let span = info_span!("seeding_run", %run_id, count = request.count);

    async move {
        let started_at = Utc::now();
        let reference =
            Arc::new(ReferenceData::load(state.references(), state.config().limits).await);

        let cancel = state.shutdown_token().child_token();
        let report = state.orchestrator().run(request, reference, &cancel).await?;

        let summary = report.summary();
        info!(
            succeeded = summary.succeeded,
            failed = summary.failed(),
            "Order generation finished"
        );

        Ok(Json(GenerateOrdersResponse {
            run_id,
            started_at,
            finished_at: Utc::now(),
            summary,
            outcomes: report.into_outcomes(),
        }))
    }
    .instrument(span)
    .await
}
