//! Reference entities fetched from the store before a seeding run.

use serde::{Deserialize, Serialize};

use super::id::{CustomerId, ProductId, VariantId};

/// A customer that synthesized orders can be associated with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    /// Customer global ID.
    pub id: CustomerId,
    /// Display name, when the store exposes one.
    pub display_name: Option<String>,
}

impl Customer {
    /// Create a customer with only an ID.
    #[must_use]
    pub const fn new(id: CustomerId) -> Self {
        Self {
            id,
            display_name: None,
        }
    }
}

/// An orderable variant of a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variant {
    /// Variant global ID.
    pub id: VariantId,
    /// Variant title (combination of option values).
    pub title: String,
    /// SKU code.
    pub sku: Option<String>,
}

/// A product together with its variants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Product global ID.
    pub id: ProductId,
    /// Product title.
    pub title: String,
    /// Vendor name.
    pub vendor: Option<String>,
    /// Variants, in the order the store returned them.
    pub variants: Vec<Variant>,
}

impl Product {
    /// The variant used when this product is added to a synthesized order.
    ///
    /// Always the first variant; `None` for products without variants.
    #[must_use]
    pub fn orderable_variant(&self) -> Option<&Variant> {
        self.variants.first()
    }

    /// Whether the product can be sampled into an order.
    #[must_use]
    pub fn is_orderable(&self) -> bool {
        !self.variants.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn variant(n: u64) -> Variant {
        Variant {
            id: VariantId::from_numeric(n),
            title: format!("Variant {n}"),
            sku: Some(format!("SKU-{n}")),
        }
    }

    #[test]
    fn test_orderable_variant_is_first() {
        let product = Product {
            id: ProductId::from_numeric(1),
            title: "Dried Mango".to_string(),
            vendor: Some("Orchard Snacks".to_string()),
            variants: vec![variant(10), variant(11)],
        };

        assert!(product.is_orderable());
        assert_eq!(
            product.orderable_variant().map(|v| v.id.clone()),
            Some(VariantId::from_numeric(10))
        );
    }

    #[test]
    fn test_product_without_variants_is_not_orderable() {
        let product = Product {
            id: ProductId::from_numeric(2),
            title: "Gift Wrap".to_string(),
            vendor: None,
            variants: vec![],
        };

        assert!(!product.is_orderable());
        assert!(product.orderable_variant().is_none());
    }
}
