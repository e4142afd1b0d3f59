//! Storefront - Solana checkout service
//! Builds unsigned payment transactions that buyers sign in their wallet

pub mod app;
pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod shared;

// Re-export main types for convenience
pub use domain::catalog::{Catalog, Product};
pub use domain::checkout::{BlockhashSource, TransactionAssembler, TransactionBuilder};
pub use shared::errors::BuildError;
