//! Shopify Admin API client (HIGH PRIVILEGE).
//!
//! # Security
//!
//! **This module holds the Admin API access token.** Orders created through
//! it are real orders in the target store; point it at a development store.
//!
//! # Architecture
//!
//! - Queries implement `graphql_client::GraphQLQuery` and live in [`queries`]
//! - Responses are converted into `order_seeder_core` domain types
//! - Throttling is surfaced as [`AdminShopifyError::RateLimited`], both for
//!   HTTP 429 and for GraphQL `THROTTLED` errors
//!
//! # Example
//!
//! ```rust,ignore
//! use order_seeder_admin::shopify::AdminClient;
//!
//! let client = AdminClient::new(&config.shopify)?;
//! let customers = client.get_customers(10).await?;
//! let products = client.get_products(50, 100).await?;
//! ```

mod client;
mod conversions;
pub mod queries;

pub use client::AdminClient;

use std::time::Duration;

use thiserror::Error;

use crate::seeding::GatewayError;

/// Errors that can occur when interacting with Shopify Admin API.
#[derive(Debug, Error)]
pub enum AdminShopifyError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// GraphQL query returned errors.
    #[error("GraphQL errors: {}", format_graphql_errors(.0))]
    GraphQL(Vec<GraphQLError>),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Rate limited by Shopify.
    #[error("Rate limited, retry after {} seconds", .0.as_secs())]
    RateLimited(Duration),

    /// Authentication/authorization failed.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// The configured store does not form a valid endpoint URL.
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(#[from] url::ParseError),

    /// Unexpected HTTP status.
    #[error("Unexpected status {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Truncated response body.
        body: String,
    },
}

/// A GraphQL error returned by the Shopify Admin API.
#[derive(Debug, Clone)]
pub struct GraphQLError {
    /// Error message.
    pub message: String,
    /// `extensions.code`, e.g. `THROTTLED` or `ACCESS_DENIED`.
    pub code: Option<String>,
    /// Path to the error in the response.
    pub path: Vec<serde_json::Value>,
}

fn format_graphql_errors(errors: &[GraphQLError]) -> String {
    errors
        .iter()
        .map(|e| e.message.clone())
        .collect::<Vec<_>>()
        .join("; ")
}

impl From<AdminShopifyError> for GatewayError {
    fn from(err: AdminShopifyError) -> Self {
        match err {
            AdminShopifyError::RateLimited(retry_after) => Self::RateLimited {
                retry_after: Some(retry_after),
            },
            other => Self::Transport(other.to_string()),
        }
    }
}
