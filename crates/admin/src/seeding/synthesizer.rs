//! Synthesizes order-creation requests from reference data.

use order_seeder_core::{
    CurrencyCode, FinancialStatus, LineItem, OrderRequest, Price, Product, Transaction,
    TransactionKind, TransactionStatus,
};
use rust_decimal::Decimal;

use super::error::SeedError;
use super::random::RandomSource;
use super::reference::ReferenceData;

/// Largest number of line items per synthesized order.
const MAX_LINE_ITEMS: usize = 2;
/// Largest quantity per line item.
const MAX_QUANTITY: usize = 10;

/// Placeholder pricing attached to every synthesized order.
///
/// Shopify computes real totals; these values only have to be well-formed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SynthesizerSettings {
    /// Presentment currency.
    pub currency: CurrencyCode,
    /// Unit price of every line item.
    pub unit_price: Decimal,
    /// Amount of the single `SALE` transaction.
    pub transaction_amount: Decimal,
}

impl Default for SynthesizerSettings {
    fn default() -> Self {
        Self {
            currency: CurrencyCode::EUR,
            unit_price: Decimal::new(11_924, 2),
            transaction_amount: Decimal::new(23_847, 2),
        }
    }
}

/// Builds randomized, syntactically valid order-creation requests.
#[derive(Debug, Clone, Default)]
pub struct OrderSynthesizer {
    settings: SynthesizerSettings,
}

impl OrderSynthesizer {
    /// Create a synthesizer with the given placeholder pricing.
    #[must_use]
    pub const fn new(settings: SynthesizerSettings) -> Self {
        Self { settings }
    }

    /// Synthesize one order.
    ///
    /// Draws, in this order: a customer index, a line-item count in
    /// `1..=2`, then for each line item a product index (with replacement,
    /// over products that have variants) and a quantity in `1..=10`. Each
    /// selected product is ordered through its first variant.
    ///
    /// # Errors
    ///
    /// Returns `SeedError::InsufficientReferenceData` if there are no
    /// customers or no product with at least one variant.
    pub fn synthesize(
        &self,
        reference: &ReferenceData,
        rng: &dyn RandomSource,
    ) -> Result<OrderRequest, SeedError> {
        let customers = reference.customers();
        if customers.is_empty() {
            return Err(SeedError::InsufficientReferenceData(
                "customer pool is empty".to_string(),
            ));
        }

        let products: Vec<&Product> = reference.orderable_products().collect();
        if products.is_empty() {
            return Err(SeedError::InsufficientReferenceData(
                "no product with at least one variant".to_string(),
            ));
        }

        let customer = customers
            .get(rng.pick(customers.len()))
            .ok_or_else(|| out_of_range("customer"))?;

        let line_count = rng.pick(MAX_LINE_ITEMS) + 1;
        let unit_price = Price::new(self.settings.unit_price, self.settings.currency);

        let line_items = (0..line_count)
            .map(|_| {
                let product = products
                    .get(rng.pick(products.len()))
                    .ok_or_else(|| out_of_range("product"))?;
                let quantity = u32::try_from(rng.pick(MAX_QUANTITY) + 1)
                    .map_err(|_| out_of_range("quantity"))?;
                line_item(product, quantity, unit_price)
            })
            .collect::<Result<Vec<_>, _>>()?;

        let transaction = Transaction {
            kind: TransactionKind::Sale,
            status: TransactionStatus::Success,
            amount: Price::new(self.settings.transaction_amount, self.settings.currency),
        };

        Ok(OrderRequest::new(
            self.settings.currency,
            line_items,
            customer.id.clone(),
            FinancialStatus::Paid,
            vec![transaction],
        ))
    }
}

fn line_item(product: &Product, quantity: u32, unit_price: Price) -> Result<LineItem, SeedError> {
    let variant = product.orderable_variant().ok_or_else(|| {
        SeedError::InsufficientReferenceData(format!("product {} has no variants", product.id))
    })?;

    Ok(LineItem {
        product_id: product.id.clone(),
        variant_id: variant.id.clone(),
        sku: variant.sku.clone(),
        vendor: product.vendor.clone(),
        quantity,
        unit_price,
    })
}

fn out_of_range(what: &str) -> SeedError {
    SeedError::InsufficientReferenceData(format!("random {what} index out of range"))
}
