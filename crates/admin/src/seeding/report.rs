//! Per-order outcomes and the aggregated run report.

use order_seeder_core::OrderId;
use serde::{Deserialize, Serialize};

use super::gateway::UserError;

/// Final result of one requested order, after retries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SubmissionOutcome {
    /// The order was created.
    Succeeded {
        /// ID of the created order.
        order_id: OrderId,
        /// Remote calls made, including the successful one.
        attempts: u32,
    },
    /// Shopify rejected the input (`userErrors`).
    RejectedByServer {
        /// Validation errors returned by the mutation.
        field_errors: Vec<UserError>,
    },
    /// No structured response could be obtained.
    TransportFailed {
        /// Description of the last failure.
        cause: String,
    },
    /// No valid order could be synthesized from the reference pools.
    InsufficientReferenceData {
        /// Why synthesis failed.
        reason: String,
    },
    /// The run was cancelled before this order was created.
    Cancelled,
}

impl SubmissionOutcome {
    /// Whether an order was created.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded { .. })
    }

    /// ID of the created order, if any.
    #[must_use]
    pub const fn order_id(&self) -> Option<&OrderId> {
        match self {
            Self::Succeeded { order_id, .. } => Some(order_id),
            _ => None,
        }
    }
}

/// Counts of outcomes by kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub total: usize,
    pub succeeded: usize,
    pub rejected: usize,
    pub transport_failed: usize,
    pub insufficient_reference_data: usize,
    pub cancelled: usize,
}

impl ReportSummary {
    /// Tally a slice of outcomes.
    #[must_use]
    pub fn from_outcomes(outcomes: &[SubmissionOutcome]) -> Self {
        outcomes.iter().fold(
            Self {
                total: outcomes.len(),
                ..Self::default()
            },
            |mut summary, outcome| {
                match outcome {
                    SubmissionOutcome::Succeeded { .. } => summary.succeeded += 1,
                    SubmissionOutcome::RejectedByServer { .. } => summary.rejected += 1,
                    SubmissionOutcome::TransportFailed { .. } => summary.transport_failed += 1,
                    SubmissionOutcome::InsufficientReferenceData { .. } => {
                        summary.insufficient_reference_data += 1;
                    }
                    SubmissionOutcome::Cancelled => summary.cancelled += 1,
                }
                summary
            },
        )
    }

    /// Number of orders that were not created.
    #[must_use]
    pub const fn failed(&self) -> usize {
        self.total - self.succeeded
    }
}

/// Ordered outcomes of one seeding run, one entry per requested order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchReport {
    outcomes: Vec<SubmissionOutcome>,
}

impl BatchReport {
    /// Package outcomes, preserving emission order.
    #[must_use]
    pub fn aggregate(outcomes: impl IntoIterator<Item = SubmissionOutcome>) -> Self {
        Self {
            outcomes: outcomes.into_iter().collect(),
        }
    }

    /// Outcomes in batch order.
    #[must_use]
    pub fn outcomes(&self) -> &[SubmissionOutcome] {
        &self.outcomes
    }

    /// Consume the report, returning its outcomes.
    #[must_use]
    pub fn into_outcomes(self) -> Vec<SubmissionOutcome> {
        self.outcomes
    }

    /// Number of outcomes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    /// Whether the report has no outcomes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Counts of outcomes by kind.
    #[must_use]
    pub fn summary(&self) -> ReportSummary {
        ReportSummary::from_outcomes(&self.outcomes)
    }

    /// IDs of every created order, in report order.
    pub fn created_order_ids(&self) -> impl Iterator<Item = &OrderId> {
        self.outcomes.iter().filter_map(SubmissionOutcome::order_id)
    }
}
