//! Subcommand implementations.

pub mod orders;
