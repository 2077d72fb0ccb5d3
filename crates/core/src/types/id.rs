//! Newtype IDs for Shopify global identifiers.
//!
//! Shopify identifies every resource with a global ID of the form
//! `gid://shopify/<Resource>/<numeric id>`. Use the `define_gid!` macro to
//! create type-safe wrappers that prevent accidentally mixing IDs from
//! different resource types.

/// Macro to define a type-safe Shopify global ID wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`
/// - Conversion methods: `new()`, `from_numeric()`, `as_str()`, `numeric_id()`
/// - `From<String>`, `From<&str>`, and `Display` implementations
///
/// # Example
///
/// ```rust
/// # use order_seeder_core::define_gid;
/// define_gid!(CustomerId, "Customer");
/// define_gid!(OrderId, "Order");
///
/// let customer_id = CustomerId::from_numeric(42);
/// assert_eq!(customer_id.as_str(), "gid://shopify/Customer/42");
///
/// // These are different types, so this won't compile:
/// // let _: OrderId = customer_id;
/// ```
#[macro_export]
macro_rules! define_gid {
    ($name:ident, $resource:literal) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Shopify resource name used in the global ID.
            pub const RESOURCE: &'static str = $resource;

            /// Wrap an existing global ID string.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Build a global ID from a numeric resource ID.
            #[must_use]
            pub fn from_numeric(id: u64) -> Self {
                Self(format!("gid://shopify/{}/{id}", Self::RESOURCE))
            }

            /// Get the underlying global ID string.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Extract the trailing numeric ID, if the global ID has one.
            #[must_use]
            pub fn numeric_id(&self) -> Option<u64> {
                self.0.rsplit('/').next().and_then(|tail| tail.parse().ok())
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_gid!(CustomerId, "Customer");
define_gid!(ProductId, "Product");
define_gid!(VariantId, "ProductVariant");
define_gid!(OrderId, "Order");
