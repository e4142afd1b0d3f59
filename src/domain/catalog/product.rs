use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A product offered by the store. Price is denominated in SOL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub price: Decimal,
    pub description: String,
    pub image_url: String,
}
