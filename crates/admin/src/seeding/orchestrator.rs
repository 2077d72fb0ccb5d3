//! Splits a seeding run into batches and paces them.

use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use tokio_util::sync::CancellationToken;
use tracing::{Instrument, info, info_span, instrument, warn};

use super::error::SeedError;
use super::gateway::OrderGateway;
use super::random::RandomSource;
use super::reference::ReferenceData;
use super::report::{BatchReport, ReportSummary, SubmissionOutcome};
use super::submitter::Submitter;
use super::synthesizer::OrderSynthesizer;
use crate::config::SeedingConfig;

/// Parameters of one seeding run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunRequest {
    /// Number of orders to create.
    pub count: i64,
    /// Orders per batch; the configured default when `None`.
    pub batch_size: Option<usize>,
    /// Pause between batches; the configured default when `None`.
    pub inter_batch_delay: Option<Duration>,
}

impl RunRequest {
    /// A request using the configured batch size and delay.
    #[must_use]
    pub const fn new(count: i64) -> Self {
        Self {
            count,
            batch_size: None,
            inter_batch_delay: None,
        }
    }

    /// Validate this request against `config` and plan its batches.
    ///
    /// # Errors
    ///
    /// Returns `SeedError::InvalidRequest` if the count is not positive,
    /// exceeds `config.max_count`, or the batch size is zero.
    pub fn plan(&self, config: &SeedingConfig) -> Result<BatchPlan, SeedError> {
        BatchPlan::new(self.count, self.batch_size.unwrap_or(config.batch_size))?
            .limited_to(config.max_count)
    }
}

/// Sizes of the batches a run is split into.
///
/// Every batch holds `batch_size` units except the last, which holds the
/// remainder. Sizes are computed on demand, so a plan costs the same for any
/// count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchPlan {
    count: usize,
    batch_size: usize,
}

impl BatchPlan {
    /// Plan `count` units in batches of `batch_size`.
    ///
    /// # Errors
    ///
    /// Returns `SeedError::InvalidRequest` if `count` is not positive or
    /// `batch_size` is zero.
    pub fn new(count: i64, batch_size: usize) -> Result<Self, SeedError> {
        if count <= 0 {
            return Err(SeedError::InvalidRequest(format!(
                "count must be positive, got {count}"
            )));
        }
        if batch_size == 0 {
            return Err(SeedError::InvalidRequest(
                "batch size must be positive".to_string(),
            ));
        }
        let count = usize::try_from(count)
            .map_err(|_| SeedError::InvalidRequest(format!("count {count} is too large")))?;

        Ok(Self { count, batch_size })
    }

    /// Reject the plan if it holds more than `max_count` units.
    ///
    /// # Errors
    ///
    /// Returns `SeedError::InvalidRequest` when the count exceeds the limit.
    pub fn limited_to(self, max_count: usize) -> Result<Self, SeedError> {
        if self.count > max_count {
            return Err(SeedError::InvalidRequest(format!(
                "count {} exceeds the limit of {max_count} orders per run",
                self.count
            )));
        }
        Ok(self)
    }

    /// Batch sizes in submission order.
    pub fn sizes(&self) -> impl Iterator<Item = usize> + use<> {
        let Self { count, batch_size } = *self;
        (0..self.len()).map(move |index| batch_size.min(count - index * batch_size))
    }

    /// Number of batches.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.count.div_ceil(self.batch_size)
    }

    /// Whether the plan has no batches.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Total number of units.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.count
    }
}

/// Drives a seeding run: batches in sequence, units within a batch concurrently.
pub struct BatchOrchestrator {
    submitter: Submitter,
    synthesizer: OrderSynthesizer,
    rng: Arc<dyn RandomSource>,
    batch_size: usize,
    inter_batch_delay: Duration,
    max_count: usize,
}

impl BatchOrchestrator {
    /// Build an orchestrator from seeding configuration.
    #[must_use]
    pub fn new(
        gateway: Arc<dyn OrderGateway>,
        rng: Arc<dyn RandomSource>,
        config: &SeedingConfig,
    ) -> Self {
        Self {
            submitter: Submitter::new(gateway, config.retry),
            synthesizer: OrderSynthesizer::new(config.synthesizer),
            rng,
            batch_size: config.batch_size,
            inter_batch_delay: config.inter_batch_delay,
            max_count: config.max_count,
        }
    }

    /// Synthesize and submit `request.count` orders.
    ///
    /// Batch `k + 1` starts only after every unit of batch `k` has
    /// resolved and the inter-batch delay has elapsed. There is no delay
    /// after the last batch. Once `cancel` fires, remaining units are
    /// reported as [`SubmissionOutcome::Cancelled`], so the report always
    /// holds exactly `count` outcomes.
    ///
    /// # Errors
    ///
    /// Returns `SeedError::InvalidRequest` before any remote call if the
    /// count or batch size is not positive, or the count exceeds the
    /// configured maximum.
    #[instrument(skip_all, fields(count = request.count))]
    pub async fn run(
        &self,
        request: RunRequest,
        reference: Arc<ReferenceData>,
        cancel: &CancellationToken,
    ) -> Result<BatchReport, SeedError> {
        let batch_size = request.batch_size.unwrap_or(self.batch_size);
        let delay = request.inter_batch_delay.unwrap_or(self.inter_batch_delay);
        let plan = BatchPlan::new(request.count, batch_size)?.limited_to(self.max_count)?;

        info!(
            batches = plan.len(),
            batch_size,
            delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
            "Starting seeding run"
        );

        let mut outcomes = Vec::new();
        for (index, size) in plan.sizes().enumerate() {
            if index > 0 {
                tokio::select! {
                    () = cancel.cancelled() => {}
                    () = tokio::time::sleep(delay) => {}
                }
            }

            if cancel.is_cancelled() {
                let skipped = plan.total() - outcomes.len();
                warn!(batch = index + 1, skipped, "Run cancelled");
                outcomes.extend(std::iter::repeat_n(SubmissionOutcome::Cancelled, skipped));
                break;
            }

            let units = (0..size).map(|unit| {
                self.run_unit(&reference, cancel)
                    .instrument(info_span!("unit", batch = index + 1, unit))
            });
            let batch = join_all(units).await;

            let summary = ReportSummary::from_outcomes(&batch);
            info!(
                batch = index + 1,
                batches = plan.len(),
                succeeded = summary.succeeded,
                failed = summary.failed(),
                "Batch completed"
            );
            outcomes.extend(batch);
        }

        let report = BatchReport::aggregate(outcomes);
        let summary = report.summary();
        info!(
            total = summary.total,
            succeeded = summary.succeeded,
            rejected = summary.rejected,
            transport_failed = summary.transport_failed,
            cancelled = summary.cancelled,
            "Seeding run finished"
        );
        Ok(report)
    }

    async fn run_unit(
        &self,
        reference: &ReferenceData,
        cancel: &CancellationToken,
    ) -> SubmissionOutcome {
        let synthesize = || self.synthesizer.synthesize(reference, self.rng.as_ref());

        match synthesize() {
            Ok(request) => self.submitter.submit(request, synthesize, cancel).await,
            Err(e) => {
                warn!(error = %e, "Could not synthesize order");
                SubmissionOutcome::InsufficientReferenceData {
                    reason: e.to_string(),
                }
            }
        }
    }
}
