//! Status enums sent with order-creation requests.

use serde::{Deserialize, Serialize};

/// Order financial status.
///
/// Maps to Shopify's `OrderCreateFinancialStatus` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FinancialStatus {
    Pending,
    Authorized,
    PartiallyPaid,
    #[default]
    Paid,
    PartiallyRefunded,
    Refunded,
    Voided,
}

/// Kind of an order transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionKind {
    #[default]
    Sale,
    Authorization,
    Capture,
    Refund,
    Void,
}

/// Status of an order transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionStatus {
    #[default]
    Success,
    Pending,
    Failure,
    Error,
}
