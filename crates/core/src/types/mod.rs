//! Core types for the order seeder.
//!
//! This module provides type-safe wrappers for the domain concepts exchanged
//! with the Shopify Admin API.

pub mod catalog;
pub mod id;
pub mod order;
pub mod price;
pub mod status;

pub use catalog::{Customer, Product, Variant};
pub use id::*;
pub use order::{LineItem, OrderRequest, Transaction};
pub use price::{CurrencyCode, Price, UnknownCurrency};
pub use status::*;
