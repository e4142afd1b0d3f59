//! Infrastructure layer - network clients and data loading

pub mod blockchain;
pub mod catalog_loader;

pub use catalog_loader::CatalogLoader;
