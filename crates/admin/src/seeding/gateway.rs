//! Collaborator seams: where reference data comes from and where orders go.
//!
//! The production implementation of both traits is
//! [`AdminClient`](crate::shopify::AdminClient); tests substitute in-memory
//! fakes.

use std::time::Duration;

use async_trait::async_trait;
use order_seeder_core::{Customer, OrderId, OrderRequest, Product};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Transport-level failure of a collaborator call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    /// The remote side is throttling requests.
    #[error("Rate limited{}", format_retry_after(*.retry_after))]
    RateLimited {
        /// Server hint for how long to wait before the next attempt.
        retry_after: Option<Duration>,
    },

    /// Any other failure to obtain a structured response.
    #[error("Transport error: {0}")]
    Transport(String),
}

fn format_retry_after(retry_after: Option<Duration>) -> String {
    retry_after.map_or_else(String::new, |d| {
        format!(", retry after {} seconds", d.as_secs())
    })
}

/// A validation error reported by `orderCreate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserError {
    /// Path to the offending input field.
    pub field: Vec<String>,
    /// Human-readable message.
    pub message: String,
}

/// Structured response of the order-creation mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateOrderResult {
    /// The order was created.
    Created {
        /// ID of the new order.
        order_id: OrderId,
    },
    /// The server rejected the input.
    Rejected {
        /// Validation errors, never empty.
        user_errors: Vec<UserError>,
    },
}

/// Source of the reference collections used to synthesize orders.
#[async_trait]
pub trait ReferenceSource: Send + Sync {
    /// Fetch up to `limit` customers.
    async fn fetch_customers(&self, limit: i64) -> Result<Vec<Customer>, GatewayError>;

    /// Fetch up to `limit` products, each with up to `variant_limit` variants.
    async fn fetch_products(
        &self,
        limit: i64,
        variant_limit: i64,
    ) -> Result<Vec<Product>, GatewayError>;
}

/// Remote order-creation capability.
///
/// Calls mutate external state and are not idempotent.
#[async_trait]
pub trait OrderGateway: Send + Sync {
    /// Submit one order-creation request.
    async fn create_order(&self, request: &OrderRequest)
    -> Result<CreateOrderResult, GatewayError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gateway_error_display() {
        let err = GatewayError::RateLimited {
            retry_after: Some(Duration::from_secs(2)),
        };
        assert_eq!(err.to_string(), "Rate limited, retry after 2 seconds");

        let err = GatewayError::RateLimited { retry_after: None };
        assert_eq!(err.to_string(), "Rate limited");

        let err = GatewayError::Transport("connection reset".to_string());
        assert_eq!(err.to_string(), "Transport error: connection reset");
    }
}
