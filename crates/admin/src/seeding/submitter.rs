//! Single-order submission with error classification and bounded retry.

use std::sync::Arc;
use std::time::Duration;

use order_seeder_core::OrderRequest;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use super::error::SeedError;
use super::gateway::{CreateOrderResult, GatewayError, OrderGateway};
use super::report::SubmissionOutcome;

/// Retry behavior of the [`Submitter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Maximum remote calls per order, including the first.
    pub max_attempts: u32,
    /// Backoff before the first retry; doubled for each further retry.
    pub initial_backoff: Duration,
    /// Upper bound on the computed backoff.
    pub max_backoff: Duration,
    /// Upper bound on a single remote call.
    pub call_timeout: Duration,
    /// Whether validation rejections are retried.
    pub retry_rejections: bool,
    /// Fixed backoff before retrying a rejection.
    pub rejection_backoff: Duration,
    /// Whether transport errors other than throttling are retried.
    pub retry_transport_errors: bool,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            initial_backoff: Duration::from_secs(2),
            max_backoff: Duration::from_secs(60),
            call_timeout: Duration::from_secs(30),
            retry_rejections: false,
            rejection_backoff: Duration::from_secs(1),
            retry_transport_errors: false,
        }
    }
}

impl RetryPolicy {
    /// Backoff before retry number `retry` (1-based), capped at `max_backoff`.
    #[must_use]
    pub fn backoff(&self, retry: u32) -> Duration {
        let factor = 2_u32.saturating_pow(retry.saturating_sub(1));
        self.initial_backoff
            .saturating_mul(factor)
            .min(self.max_backoff)
    }
}

/// Submits orders through an [`OrderGateway`].
#[derive(Clone)]
pub struct Submitter {
    gateway: Arc<dyn OrderGateway>,
    policy: RetryPolicy,
}

impl Submitter {
    /// Create a submitter.
    #[must_use]
    pub fn new(gateway: Arc<dyn OrderGateway>, policy: RetryPolicy) -> Self {
        Self { gateway, policy }
    }

    /// Submit `request`, retrying according to the policy.
    ///
    /// Every retry sends a fresh request from `resynthesize`, never the same
    /// payload twice. Throttling is retried until `max_attempts` calls have
    /// been made, waiting at least as long as the server's hint. Rejections
    /// and other transport errors are terminal unless the policy enables
    /// retrying them. A call exceeding `call_timeout` is terminal, since
    /// the order may already exist.
    ///
    /// Cancellation is checked before every call and during backoff.
    pub async fn submit<F>(
        &self,
        request: OrderRequest,
        mut resynthesize: F,
        cancel: &CancellationToken,
    ) -> SubmissionOutcome
    where
        F: FnMut() -> Result<OrderRequest, SeedError> + Send,
    {
        let max_attempts = self.policy.max_attempts.max(1);
        let mut request = request;
        let mut attempt: u32 = 1;

        loop {
            if cancel.is_cancelled() {
                return SubmissionOutcome::Cancelled;
            }

            let call = self.gateway.create_order(&request);
            let Ok(result) = tokio::time::timeout(self.policy.call_timeout, call).await else {
                warn!(attempt, "Order creation timed out");
                return SubmissionOutcome::TransportFailed {
                    cause: format!(
                        "timed out after {} ms",
                        self.policy.call_timeout.as_millis()
                    ),
                };
            };

            let delay = match result {
                Ok(CreateOrderResult::Created { order_id }) => {
                    debug!(%order_id, attempt, "Order created");
                    return SubmissionOutcome::Succeeded {
                        order_id,
                        attempts: attempt,
                    };
                }
                Ok(CreateOrderResult::Rejected { user_errors }) => {
                    if !self.policy.retry_rejections || attempt >= max_attempts {
                        warn!(attempt, errors = ?user_errors, "Order rejected");
                        return SubmissionOutcome::RejectedByServer {
                            field_errors: user_errors,
                        };
                    }
                    warn!(attempt, errors = ?user_errors, "Order rejected, retrying");
                    self.policy.rejection_backoff
                }
                Err(GatewayError::RateLimited { retry_after }) => {
                    if attempt >= max_attempts {
                        warn!(attempt, "Rate limited, retry budget exhausted");
                        return SubmissionOutcome::TransportFailed {
                            cause: format!("rate limited after {attempt} attempts"),
                        };
                    }
                    let delay = self
                        .policy
                        .backoff(attempt)
                        .max(retry_after.unwrap_or_default());
                    warn!(
                        attempt,
                        delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                        "Rate limit hit, retrying after delay"
                    );
                    delay
                }
                Err(GatewayError::Transport(cause)) => {
                    if !self.policy.retry_transport_errors || attempt >= max_attempts {
                        warn!(attempt, %cause, "Order creation failed");
                        return SubmissionOutcome::TransportFailed { cause };
                    }
                    warn!(attempt, %cause, "Order creation failed, retrying");
                    self.policy.backoff(attempt)
                }
            };

            tokio::select! {
                () = cancel.cancelled() => return SubmissionOutcome::Cancelled,
                () = tokio::time::sleep(delay) => {}
            }

            request = match resynthesize() {
                Ok(request) => request,
                Err(e) => {
                    return SubmissionOutcome::InsufficientReferenceData {
                        reason: e.to_string(),
                    };
                }
            };
            attempt += 1;
        }
    }
}
