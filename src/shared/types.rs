//! Shared types used across the application

use serde::{Deserialize, Serialize};

/// Item identifier as sent by the checkout page; either a JSON string or number
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ItemId {
    Text(String),
    Number(u64),
}

impl ItemId {
    /// Normalize to the string form used as catalog key
    pub fn as_key(&self) -> String {
        match self {
            ItemId::Text(s) => s.clone(),
            ItemId::Number(n) => n.to_string(),
        }
    }
}

/// Incoming checkout request body
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TransactionRequest {
    pub buyer: Option<String>,
    #[serde(rename = "orderID")]
    pub order_id: Option<String>,
    #[serde(rename = "itemID")]
    pub item_id: Option<ItemId>,
}

/// Successful checkout response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionResponse {
    pub transaction: String,
}

/// Client-facing error body (4xx)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageBody {
    pub message: String,
}

/// Server-side error body (5xx)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}
