//! Loading the product catalog from disk

use std::fs;
use std::path::Path;
use tracing::info;

use crate::domain::catalog::Catalog;
use crate::shared::errors::CatalogError;

/// Catalog shipped with the binary
const DEFAULT_CATALOG: &str = include_str!("../../data/products.json");

/// Catalog loader
pub struct CatalogLoader;

impl CatalogLoader {
    /// Load catalog from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Catalog, CatalogError> {
        let content = fs::read_to_string(path.as_ref())?;
        let catalog = Catalog::from_json(&content)?;
        info!("Loaded {} products from {}", catalog.len(), path.as_ref().display());
        Ok(catalog)
    }

    /// Load the built-in catalog
    pub fn embedded() -> Result<Catalog, CatalogError> {
        Catalog::from_json(DEFAULT_CATALOG)
    }

    /// Load from `path` if given, otherwise the built-in catalog
    pub fn load(path: Option<&Path>) -> Result<Catalog, CatalogError> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let catalog = Self::embedded()?;
                info!("Using built-in catalog with {} products", catalog.len());
                Ok(catalog)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    #[test]
    fn test_embedded_catalog_is_valid() {
        let catalog = CatalogLoader::embedded().unwrap();
        assert!(!catalog.is_empty());
        assert_eq!(catalog.get("1").unwrap().price, Decimal::from_str("0.09").unwrap());
    }

    #[test]
    fn test_missing_file() {
        let err = CatalogLoader::load(Some(Path::new("/nonexistent/products.json"))).unwrap_err();
        assert!(matches!(err, CatalogError::Io(_)));
    }

    #[test]
    fn test_from_file() {
        let path = std::env::temp_dir().join(format!("catalog-{}.json", uuid::Uuid::new_v4()));
        fs::write(
            &path,
            r#"[{"id":"a","name":"A","price":"2","description":"","image_url":""}]"#,
        )
        .unwrap();
        let catalog = CatalogLoader::from_file(&path).unwrap();
        fs::remove_file(&path).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get("a").unwrap().price, Decimal::from(2));
    }
}
