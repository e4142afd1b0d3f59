//! Domain layer - core business logic and entities

pub mod catalog;
pub mod checkout;
pub mod pricing;
