//! Catalog domain - the read-only product list checkout prices against

mod product;

pub use product::Product;

use std::collections::HashMap;
use crate::domain::pricing::sol_to_lamports;
use crate::shared::errors::CatalogError;

/// Immutable product catalog, loaded once at startup
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
    index: HashMap<String, usize>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate ids and prices that have no exact
    /// lamport representation.
    pub fn new(products: Vec<Product>) -> Result<Self, CatalogError> {
        let mut index = HashMap::with_capacity(products.len());

        for (i, product) in products.iter().enumerate() {
            sol_to_lamports(product.price).map_err(|source| CatalogError::InvalidPrice {
                id: product.id.clone(),
                source,
            })?;

            if index.insert(product.id.clone(), i).is_some() {
                return Err(CatalogError::DuplicateId(product.id.clone()));
            }
        }

        Ok(Self { products, index })
    }

    /// Parse a JSON array of products
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let products: Vec<Product> = serde_json::from_str(json)?;
        Self::new(products)
    }

    /// Look up a product by id. A zero-priced product is still `Some`.
    pub fn get(&self, id: &str) -> Option<&Product> {
        self.index.get(id).map(|&i| &self.products[i])
    }

    /// All products in catalog order
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
