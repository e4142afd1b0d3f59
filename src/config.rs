use anyhow::{Context, Result};
use serde::Deserialize;
use std::{fs, path::{Path, PathBuf}};
use crate::infrastructure::blockchain::Cluster;

/// Address the checkout payments are sent to unless configured otherwise
pub const DEFAULT_SELLER: &str = "397SrhDetu3vQpPrNiaPwjY3kALjdu9P8S75RZgH9Mru";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerCfg {
    pub bind: String,
}

impl Default for ServerCfg {
    fn default() -> Self {
        Self { bind: "127.0.0.1:3000".to_string() }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ChainCfg {
    pub cluster: Cluster,
    /// Overrides the cluster's public endpoint
    pub rpc_url: Option<String>,
    pub timeout_ms: u64,
    pub max_retries: u32,
    pub retry_delay_ms: u64,
}

impl Default for ChainCfg {
    fn default() -> Self {
        Self {
            cluster: Cluster::Devnet,
            rpc_url: None,
            timeout_ms: 5_000,
            max_retries: 2,
            retry_delay_ms: 250,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StoreCfg {
    pub seller: String,
    /// Product catalog JSON; the built-in catalog is used when unset
    pub catalog: Option<PathBuf>,
}

impl Default for StoreCfg {
    fn default() -> Self {
        Self {
            seller: DEFAULT_SELLER.to_string(),
            catalog: None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerCfg,
    pub chain: ChainCfg,
    pub store: StoreCfg,
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let s = fs::read_to_string(path.as_ref())
            .with_context(|| format!("read config file {}", path.as_ref().display()))?;
        Self::from_toml(&s)
    }

    pub fn from_toml(s: &str) -> Result<Self> {
        let cfg: Self = toml::from_str(s).context("parse storefront config")?;
        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let cfg = Config::from_toml("").unwrap();
        assert_eq!(cfg.server.bind, "127.0.0.1:3000");
        assert_eq!(cfg.chain.cluster, Cluster::Devnet);
        assert_eq!(cfg.chain.timeout_ms, 5_000);
        assert_eq!(cfg.store.seller, DEFAULT_SELLER);
        assert!(cfg.store.catalog.is_none());
    }

    #[test]
    fn test_partial_sections() {
        let cfg = Config::from_toml(
            r#"
            [chain]
            cluster = "mainnet-beta"
            max_retries = 0

            [store]
            catalog = "data/products.json"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.chain.cluster, Cluster::MainnetBeta);
        assert_eq!(cfg.chain.max_retries, 0);
        assert_eq!(cfg.chain.retry_delay_ms, 250);
        assert_eq!(cfg.store.catalog.as_deref(), Some(Path::new("data/products.json")));
        assert_eq!(cfg.store.seller, DEFAULT_SELLER);
    }

    #[test]
    fn test_unknown_cluster_rejected() {
        assert!(Config::from_toml("[chain]\ncluster = \"moonnet\"").is_err());
    }
}
