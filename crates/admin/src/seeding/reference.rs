//! Reference data fetched once per seeding run.

use order_seeder_core::{Customer, Product};
use tracing::{info, instrument, warn};

use super::gateway::ReferenceSource;

/// How many reference entities to fetch per run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReferenceLimits {
    /// Maximum customers.
    pub customers: i64,
    /// Maximum products.
    pub products: i64,
    /// Maximum variants per product.
    pub variants: i64,
}

impl Default for ReferenceLimits {
    fn default() -> Self {
        Self {
            customers: 10,
            products: 50,
            variants: 100,
        }
    }
}

/// Customer and product pools for one run.
///
/// Read-only once built. Products without variants are kept as fetched but
/// never sampled.
#[derive(Debug, Clone, Default)]
pub struct ReferenceData {
    customers: Vec<Customer>,
    products: Vec<Product>,
}

impl ReferenceData {
    /// Build reference data from already-fetched collections.
    #[must_use]
    pub const fn new(customers: Vec<Customer>, products: Vec<Product>) -> Self {
        Self {
            customers,
            products,
        }
    }

    /// Fetch customers and products concurrently.
    ///
    /// A failing sub-query is logged and treated as an empty collection;
    /// empty pools surface later, per unit, as insufficient reference data.
    #[instrument(skip(source))]
    pub async fn load(source: &dyn ReferenceSource, limits: ReferenceLimits) -> Self {
        let (customers, products) = tokio::join!(
            source.fetch_customers(limits.customers),
            source.fetch_products(limits.products, limits.variants),
        );

        let customers = customers.unwrap_or_else(|e| {
            warn!(error = %e, "Customer fetch failed, continuing with no customers");
            Vec::new()
        });
        let products = products.unwrap_or_else(|e| {
            warn!(error = %e, "Product fetch failed, continuing with no products");
            Vec::new()
        });

        let data = Self::new(customers, products);
        info!(
            customers = data.customers.len(),
            products = data.products.len(),
            orderable_products = data.orderable_products().count(),
            "Reference data loaded"
        );
        data
    }

    /// All customers.
    #[must_use]
    pub fn customers(&self) -> &[Customer] {
        &self.customers
    }

    /// All products, including those without variants.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Products eligible for sampling (at least one variant).
    pub fn orderable_products(&self) -> impl Iterator<Item = &Product> {
        self.products.iter().filter(|p| p.is_orderable())
    }
}

#[cfg(test)]
mod tests {
    use order_seeder_core::CustomerId;

    use super::*;
    use crate::seeding::gateway::GatewayError;
    use crate::seeding::testing::{FakeReferenceSource, product};

    #[tokio::test]
    async fn test_load_fetches_both_collections() {
        let source = FakeReferenceSource::new(
            Ok(vec![Customer::new(CustomerId::from_numeric(1))]),
            Ok(vec![product(1, 2), product(2, 0)]),
        );

        let data = ReferenceData::load(&source, ReferenceLimits::default()).await;

        assert_eq!(data.customers().len(), 1);
        assert_eq!(data.products().len(), 2);
        assert_eq!(data.orderable_products().count(), 1);
        assert_eq!(source.requested_limits(), Some((10, 50, 100)));
    }

    #[tokio::test]
    async fn test_load_tolerates_failed_sub_query() {
        let source = FakeReferenceSource::new(
            Err(GatewayError::Transport("boom".to_string())),
            Ok(vec![product(1, 1)]),
        );

        let data = ReferenceData::load(&source, ReferenceLimits::default()).await;

        assert!(data.customers().is_empty());
        assert_eq!(data.products().len(), 1);
    }
}
