//! Order-creation request value objects.
//!
//! An [`OrderRequest`] is built once per submission attempt and never
//! mutated afterwards: fields are private and only exposed through getters.

use serde::{Deserialize, Serialize};

use super::id::{CustomerId, ProductId, VariantId};
use super::price::{CurrencyCode, Price};
use super::status::{FinancialStatus, TransactionKind, TransactionStatus};

/// A single line of an order-creation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Product the variant belongs to.
    pub product_id: ProductId,
    /// Variant being ordered.
    pub variant_id: VariantId,
    /// Variant SKU.
    pub sku: Option<String>,
    /// Product vendor.
    pub vendor: Option<String>,
    /// Number of units, always at least 1.
    pub quantity: u32,
    /// Price of one unit.
    pub unit_price: Price,
}

/// A transaction attached to an order-creation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Transaction kind.
    pub kind: TransactionKind,
    /// Transaction status.
    pub status: TransactionStatus,
    /// Transaction amount.
    pub amount: Price,
}

/// An immutable order-creation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRequest {
    currency: CurrencyCode,
    line_items: Vec<LineItem>,
    customer: CustomerId,
    financial_status: FinancialStatus,
    transactions: Vec<Transaction>,
}

impl OrderRequest {
    /// Create a new order request.
    #[must_use]
    pub const fn new(
        currency: CurrencyCode,
        line_items: Vec<LineItem>,
        customer: CustomerId,
        financial_status: FinancialStatus,
        transactions: Vec<Transaction>,
    ) -> Self {
        Self {
            currency,
            line_items,
            customer,
            financial_status,
            transactions,
        }
    }

    /// Presentment currency.
    #[must_use]
    pub const fn currency(&self) -> CurrencyCode {
        self.currency
    }

    /// Line items in order.
    #[must_use]
    pub fn line_items(&self) -> &[LineItem] {
        &self.line_items
    }

    /// Customer the order is associated with.
    #[must_use]
    pub const fn customer(&self) -> &CustomerId {
        &self.customer
    }

    /// Financial status tag.
    #[must_use]
    pub const fn financial_status(&self) -> FinancialStatus {
        self.financial_status
    }

    /// Attached transactions.
    #[must_use]
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Total number of units across all line items.
    #[must_use]
    pub fn total_quantity(&self) -> u32 {
        self.line_items.iter().map(|item| item.quantity).sum()
    }
}
