//! Solana network access and transaction assembly

pub mod rpc_client;
pub mod transfer_assembler;

pub use rpc_client::{Cluster, RetryPolicy, SolanaRpcClient};
pub use transfer_assembler::SystemTransferAssembler;
