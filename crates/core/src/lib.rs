//! Order Seeder Core - Shared types library.
//!
//! This crate provides the value types shared by the seeding components:
//! - `admin` - Shopify Admin API client, seeding pipeline, and HTTP trigger
//! - `cli` - Command-line trigger for seeding runs
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no HTTP clients,
//! no randomness. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Shopify global IDs, prices, statuses, catalog entities, and
//!   order-creation requests

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
