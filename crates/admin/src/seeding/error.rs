//! Errors raised by the seeding pipeline itself.

use thiserror::Error;

/// Errors that can occur while planning or synthesizing orders.
///
/// Remote failures are not errors at this level: they are recorded as
/// [`SubmissionOutcome`](super::SubmissionOutcome)s in the report.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SeedError {
    /// The run request is malformed (non-positive count, zero batch size).
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The reference pools cannot produce a valid order.
    #[error("Insufficient reference data: {0}")]
    InsufficientReferenceData(String),
}
