use base64::{engine::general_purpose::STANDARD, Engine as _};
use solana_sdk::{hash::Hash, pubkey::Pubkey};
use std::str::FromStr;
use std::sync::Arc;
use tracing::{debug, info};

use super::{BlockhashSource, PaymentIntent, TransactionAssembler};
use crate::domain::catalog::Catalog;
use crate::domain::pricing::{format_sol, lamports_to_sol, sol_to_lamports};
use crate::shared::errors::{AddressField, BuildError};
use crate::shared::types::TransactionRequest;

/// Result of a successful build
#[derive(Debug, Clone)]
pub struct PreparedTransaction {
    /// Base64 of the serialized transaction, signature slots zeroed
    pub transaction: String,
    pub lamports: u64,
    pub recent_blockhash: Hash,
}

/// Builds unsigned payment transactions for catalog items.
///
/// Holds only read-only state, so one instance is shared by all requests.
pub struct TransactionBuilder {
    catalog: Arc<Catalog>,
    seller: Pubkey,
    blockhash_source: Arc<dyn BlockhashSource>,
    assembler: Arc<dyn TransactionAssembler>,
}

impl TransactionBuilder {
    pub fn new(
        catalog: Arc<Catalog>,
        seller: Pubkey,
        blockhash_source: Arc<dyn BlockhashSource>,
        assembler: Arc<dyn TransactionAssembler>,
    ) -> Self {
        Self {
            catalog,
            seller,
            blockhash_source,
            assembler,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn seller(&self) -> &Pubkey {
        &self.seller
    }

    /// Build the payment transaction for `request`
    pub async fn build(&self, request: &TransactionRequest) -> Result<PreparedTransaction, BuildError> {
        // 1. Required fields
        let buyer = present(request.buyer.as_deref()).ok_or(BuildError::MissingBuyer)?;
        let order_id = present(request.order_id.as_deref()).ok_or(BuildError::MissingOrderID)?;

        // 2. Catalog lookup
        let item_key = request.item_id.as_ref().map(|id| id.as_key()).unwrap_or_default();
        let product = self
            .catalog
            .get(&item_key)
            .ok_or_else(|| BuildError::ItemNotFound(item_key.clone()))?;

        // 3. Exact price conversion
        let lamports = sol_to_lamports(product.price)?;

        let buyer = parse_address(buyer, AddressField::Buyer)?;
        let order = parse_address(order_id, AddressField::Order)?;

        // 4. Chain tip
        let recent_blockhash = self.blockhash_source.latest_blockhash().await?;
        debug!("Using recent blockhash {}", recent_blockhash);

        // 5-9. Assemble and serialize
        let payment = PaymentIntent {
            buyer,
            seller: self.seller,
            order,
            lamports,
        };
        let bytes = self.assembler.assemble(&payment, recent_blockhash)?;

        // 10. Encode
        let transaction = STANDARD.encode(&bytes);

        info!(
            "🔨 Prepared payment for item {} ({}): {} from {} for order {}",
            product.id,
            product.name,
            format_sol(lamports_to_sol(lamports)),
            buyer,
            order
        );

        Ok(PreparedTransaction {
            transaction,
            lamports,
            recent_blockhash,
        })
    }
}

fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn parse_address(value: &str, field: AddressField) -> Result<Pubkey, BuildError> {
    Pubkey::from_str(value).map_err(|_| BuildError::InvalidAddress {
        field,
        value: value.to_string(),
    })
}
