//! Solana RPC client used to anchor checkout transactions to the chain tip

use async_trait::async_trait;
use serde::Deserialize;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::commitment_config::CommitmentConfig;
use solana_sdk::hash::Hash;
use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};

use crate::domain::checkout::BlockhashSource;
use crate::shared::errors::ChainError;

/// Public Solana clusters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Cluster {
    #[default]
    Devnet,
    Testnet,
    MainnetBeta,
}

impl Cluster {
    /// Default public RPC endpoint for the cluster
    pub fn rpc_url(&self) -> &'static str {
        match self {
            Cluster::Devnet => "https://api.devnet.solana.com",
            Cluster::Testnet => "https://api.testnet.solana.com",
            Cluster::MainnetBeta => "https://api.mainnet-beta.solana.com",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Cluster::Devnet => "devnet",
            Cluster::Testnet => "testnet",
            Cluster::MainnetBeta => "mainnet-beta",
        }
    }
}

impl std::str::FromStr for Cluster {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "devnet" => Ok(Cluster::Devnet),
            "testnet" => Ok(Cluster::Testnet),
            "mainnet-beta" | "mainnet" => Ok(Cluster::MainnetBeta),
            other => Err(format!("unknown cluster: {}", other)),
        }
    }
}

/// Timeout and retry settings for outbound RPC calls
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Per-attempt deadline
    pub timeout: Duration,
    /// Extra attempts after the first one; 0 disables retrying
    pub max_retries: u32,
    /// Delay before the first retry, doubled after each failure
    pub retry_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(5),
            max_retries: 2,
            retry_delay: Duration::from_millis(250),
        }
    }
}

/// Run `op` under the policy's timeout, retrying failures with exponential backoff
pub async fn call_with_retry<T, F, Fut>(policy: &RetryPolicy, what: &str, mut op: F) -> Result<T, ChainError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ChainError>>,
{
    let mut delay = policy.retry_delay;
    let mut attempt = 0u32;

    loop {
        attempt += 1;
        let result = match tokio::time::timeout(policy.timeout, op()).await {
            Ok(result) => result,
            Err(_) => Err(ChainError::Timeout(policy.timeout.as_millis() as u64)),
        };

        match result {
            Ok(value) => return Ok(value),
            Err(e) if attempt <= policy.max_retries => {
                warn!("❌ {} attempt {} failed: {}, retrying in {:?}", what, attempt, e, delay);
                tokio::time::sleep(delay).await;
                delay = delay.saturating_mul(2);
            }
            Err(e) => return Err(e),
        }
    }
}

/// Solana RPC client wrapper
pub struct SolanaRpcClient {
    client: RpcClient,
    policy: RetryPolicy,
}

impl SolanaRpcClient {
    /// Create new RPC client
    pub fn new(rpc_url: String, policy: RetryPolicy) -> Self {
        Self {
            client: RpcClient::new_with_timeout_and_commitment(
                rpc_url,
                policy.timeout,
                CommitmentConfig::finalized(),
            ),
            policy,
        }
    }

    pub fn url(&self) -> String {
        self.client.url()
    }

    /// Get latest finalized blockhash
    pub async fn get_latest_blockhash(&self) -> Result<Hash, ChainError> {
        let (hash, last_valid_block_height) = call_with_retry(&self.policy, "getLatestBlockhash", || async move {
            self.client
                .get_latest_blockhash_with_commitment(CommitmentConfig::finalized())
                .await
                .map_err(|e| ChainError::Rpc(format!("Failed to get latest blockhash: {}", e)))
        })
        .await?;

        debug!("Blockhash {} valid until block height {}", hash, last_valid_block_height);
        Ok(hash)
    }
}

#[async_trait]
impl BlockhashSource for SolanaRpcClient {
    async fn latest_blockhash(&self) -> Result<Hash, ChainError> {
        self.get_latest_blockhash().await
    }
}
