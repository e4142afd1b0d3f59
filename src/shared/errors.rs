//! Error handling for the application

use thiserror::Error;

/// Price conversion errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    #[error("Negative price: {0}")]
    Negative(String),

    #[error("Price {0} has more precision than one lamport")]
    SubLamportPrecision(String),

    #[error("Price {0} does not fit in a u64 lamport amount")]
    Overflow(String),
}

/// Catalog-related errors
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read catalog: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Duplicate product id: {0}")]
    DuplicateId(String),

    #[error("Invalid price for product {id}: {source}")]
    InvalidPrice {
        id: String,
        #[source]
        source: PriceError,
    },
}

/// Blockchain-related errors
#[derive(Error, Debug, Clone)]
pub enum ChainError {
    #[error("RPC request failed: {0}")]
    Rpc(String),

    #[error("RPC request timed out after {0}ms")]
    Timeout(u64),

    #[error("Failed to serialize transaction: {0}")]
    Serialization(String),
}

/// Checkout transaction build errors
#[derive(Error, Debug, Clone)]
pub enum BuildError {
    #[error("missing buyer address")]
    MissingBuyer,

    #[error("Missing order ID")]
    MissingOrderID,

    #[error("Invalid {field} address: {value}")]
    InvalidAddress { field: AddressField, value: String },

    #[error("Item not found: {0}")]
    ItemNotFound(String),

    #[error("Pricing error: {0}")]
    Pricing(#[from] PriceError),

    #[error("Upstream error: {0}")]
    Upstream(#[from] ChainError),
}

/// Which request field carried an unparseable address
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressField {
    Buyer,
    Order,
}

impl std::fmt::Display for AddressField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AddressField::Buyer => write!(f, "buyer"),
            AddressField::Order => write!(f, "order"),
        }
    }
}

/// Coarse error kinds as seen by a checkout client
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    ClientInput,
    NotFound,
    Upstream,
}

impl BuildError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            BuildError::MissingBuyer
            | BuildError::MissingOrderID
            | BuildError::InvalidAddress { .. } => ErrorKind::ClientInput,
            BuildError::ItemNotFound(_) => ErrorKind::NotFound,
            BuildError::Pricing(_) | BuildError::Upstream(_) => ErrorKind::Upstream,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(BuildError::MissingBuyer.kind(), ErrorKind::ClientInput);
        assert_eq!(BuildError::MissingOrderID.kind(), ErrorKind::ClientInput);
        let invalid = BuildError::InvalidAddress {
            field: AddressField::Order,
            value: "nope".to_string(),
        };
        assert_eq!(invalid.kind(), ErrorKind::ClientInput);
        assert_eq!(BuildError::ItemNotFound("9".to_string()).kind(), ErrorKind::NotFound);
        assert_eq!(
            BuildError::from(ChainError::Timeout(5000)).kind(),
            ErrorKind::Upstream
        );
    }

    #[test]
    fn test_messages() {
        assert_eq!(BuildError::MissingBuyer.to_string(), "missing buyer address");
        assert_eq!(BuildError::MissingOrderID.to_string(), "Missing order ID");
        let invalid = BuildError::InvalidAddress {
            field: AddressField::Buyer,
            value: "xyz".to_string(),
        };
        assert_eq!(invalid.to_string(), "Invalid buyer address: xyz");
    }
}
