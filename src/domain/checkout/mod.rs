//! Checkout domain - preparing payment transactions for a buyer to sign

mod transaction_builder;

pub use transaction_builder::{PreparedTransaction, TransactionBuilder};

use async_trait::async_trait;
use solana_sdk::{hash::Hash, pubkey::Pubkey};
use crate::shared::errors::ChainError;

/// A fully priced payment, ready to be turned into a transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentIntent {
    /// Buyer pays the lamports and the network fee
    pub buyer: Pubkey,
    pub seller: Pubkey,
    /// Attached read-only so the payment can be found by order later
    pub order: Pubkey,
    pub lamports: u64,
}

/// Source of the chain-tip reference a new transaction is anchored to
#[async_trait]
pub trait BlockhashSource: Send + Sync {
    /// Latest finalized blockhash
    async fn latest_blockhash(&self) -> Result<Hash, ChainError>;
}

/// Turns a payment into serialized, not yet signed, transaction bytes
pub trait TransactionAssembler: Send + Sync {
    fn assemble(&self, payment: &PaymentIntent, recent_blockhash: Hash) -> Result<Vec<u8>, ChainError>;
}
