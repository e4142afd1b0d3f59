// src/app.rs
use anyhow::{Context, Result};
use solana_sdk::pubkey::Pubkey;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use crate::config::Config;
use crate::domain::catalog::Catalog;
use crate::domain::checkout::TransactionBuilder;
use crate::infrastructure::blockchain::{Cluster, RetryPolicy, SolanaRpcClient, SystemTransferAssembler};
use crate::infrastructure::CatalogLoader;

/// Fully resolved and validated runtime configuration
#[derive(Debug, Clone)]
pub struct AppCfg {
    pub bind: SocketAddr,
    pub cluster: Cluster,
    pub rpc_url: String,
    pub retry: RetryPolicy,
    pub seller: Pubkey,
    pub catalog_path: Option<PathBuf>,
}

impl AppCfg {
    pub fn from_config(cfg: Config) -> Result<Self> {
        if cfg.chain.timeout_ms == 0 {
            anyhow::bail!("chain.timeout_ms must be greater than zero");
        }

        let bind = cfg
            .server
            .bind
            .parse::<SocketAddr>()
            .with_context(|| format!("invalid server.bind address: {}", cfg.server.bind))?;
        let seller = Pubkey::from_str(&cfg.store.seller)
            .map_err(|e| anyhow::anyhow!("invalid store.seller address {}: {}", cfg.store.seller, e))?;
        let rpc_url = cfg
            .chain
            .rpc_url
            .unwrap_or_else(|| cfg.chain.cluster.rpc_url().to_string());

        Ok(Self {
            bind,
            cluster: cfg.chain.cluster,
            rpc_url,
            retry: RetryPolicy {
                timeout: Duration::from_millis(cfg.chain.timeout_ms),
                max_retries: cfg.chain.max_retries,
                retry_delay: Duration::from_millis(cfg.chain.retry_delay_ms),
            },
            seller,
            catalog_path: cfg.store.catalog,
        })
    }

    /// Load the catalog this configuration points at
    pub fn load_catalog(&self) -> Result<Catalog> {
        CatalogLoader::load(self.catalog_path.as_deref()).context("load product catalog")
    }

    /// Wire the checkout builder against the live Solana RPC endpoint
    pub fn checkout_builder(&self) -> Result<TransactionBuilder> {
        let catalog = Arc::new(self.load_catalog()?);
        let rpc_client = Arc::new(SolanaRpcClient::new(self.rpc_url.clone(), self.retry.clone()));

        info!("RPC endpoint: {} ({})", rpc_client.url(), self.cluster.as_str());
        info!("Seller address: {}", self.seller);

        Ok(TransactionBuilder::new(
            catalog,
            self.seller,
            rpc_client,
            Arc::new(SystemTransferAssembler),
        ))
    }
}
