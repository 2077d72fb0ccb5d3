//! Batched, rate-limited synthetic order seeding.
//!
//! # Pipeline
//!
//! ```text
//! ReferenceSource ──► ReferenceData (one fetch per run, read-only)
//!                          │
//!                          ▼
//! BatchOrchestrator ── per batch, concurrently per unit ──►
//!     OrderSynthesizer ──► Submitter ──► OrderGateway (orderCreate)
//!                                 │
//!                                 ▼
//!                        SubmissionOutcome ──► BatchReport
//! ```
//!
//! Batches are submitted one after another with a fixed pause between
//! them; units inside a batch run concurrently and are always joined before
//! the next batch starts. A failing unit never aborts the run: every
//! requested order is represented in the report.
//!
//! # Duplicates
//!
//! Order creation is not idempotent. When a response is lost after Shopify
//! accepted the order (timeout, dropped connection, spurious throttle), a
//! retry creates a second order. Generic transport errors and timeouts are
//! therefore terminal by default; only throttling is retried.

mod error;
mod gateway;
mod orchestrator;
mod random;
mod reference;
mod report;
mod submitter;
mod synthesizer;

pub use error::SeedError;
pub use gateway::{CreateOrderResult, GatewayError, OrderGateway, ReferenceSource, UserError};
pub use orchestrator::{BatchOrchestrator, BatchPlan, RunRequest};
pub use random::{RandomSource, SeededRandom, ThreadRandom};
pub use reference::{ReferenceData, ReferenceLimits};
pub use report::{BatchReport, ReportSummary, SubmissionOutcome};
pub use submitter::{RetryPolicy, Submitter};
pub use synthesizer::{OrderSynthesizer, SynthesizerSettings};

#[cfg(test)]
pub(crate) mod testing;
