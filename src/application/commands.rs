//! CLI commands and handlers
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

use crate::app::AppCfg;
use crate::application::server::{self, AppState};
use crate::config::Config;
use crate::domain::pricing::{format_sol, sol_to_lamports};
use crate::infrastructure::blockchain::Cluster;
use crate::shared::types::{ItemId, TransactionRequest};

#[derive(Parser, Debug)]
#[command(name = "storefront")]
#[command(version, about = "Solana storefront checkout service")]
pub struct Cli {
    /// Path to config file (optional)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,

    /// Solana cluster (devnet, testnet, mainnet-beta)
    #[arg(long, global = true)]
    pub cluster: Option<Cluster>,

    /// RPC endpoint URL (overrides the cluster default)
    #[arg(long, global = true)]
    pub rpc_url: Option<String>,

    /// Seller address receiving payments
    #[arg(long, global = true)]
    pub seller: Option<String>,

    /// Product catalog JSON file
    #[arg(long, global = true)]
    pub catalog: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the checkout HTTP API
    Serve {
        /// Listen address, e.g. 0.0.0.0:3000
        #[arg(long)]
        bind: Option<String>,
    },

    /// Print the product catalog with lamport prices
    Products,

    /// Build one checkout transaction and print it as base64
    BuildTx {
        /// Buyer wallet address (fee payer)
        #[arg(long)]
        buyer: String,

        /// Order reference address
        #[arg(long)]
        order_id: String,

        /// Catalog item id
        #[arg(long)]
        item_id: String,
    },
}

impl Cli {
    /// Resolve configuration: defaults < config file < CLI flags
    pub fn app_cfg(&self) -> Result<AppCfg> {
        let mut cfg = match &self.config {
            Some(path) => Config::from_file(path)?,
            None => Config::default(),
        };

        if let Some(cluster) = self.cluster {
            cfg.chain.cluster = cluster;
        }
        if let Some(rpc_url) = &self.rpc_url {
            cfg.chain.rpc_url = Some(rpc_url.clone());
        }
        if let Some(seller) = &self.seller {
            cfg.store.seller = seller.clone();
        }
        if let Some(catalog) = &self.catalog {
            cfg.store.catalog = Some(catalog.clone());
        }
        if let Commands::Serve { bind: Some(bind) } = &self.command {
            cfg.server.bind = bind.clone();
        }

        AppCfg::from_config(cfg)
    }
}

pub struct CommandExecutor;

impl CommandExecutor {
    pub async fn execute(cli: Cli) -> Result<()> {
        let app_cfg = cli.app_cfg()?;

        match cli.command {
            Commands::Serve { .. } => Self::serve(app_cfg).await,
            Commands::Products => Self::products(app_cfg),
            Commands::BuildTx { buyer, order_id, item_id } => {
                Self::build_tx(app_cfg, buyer, order_id, item_id).await
            }
        }
    }

    async fn serve(app_cfg: AppCfg) -> Result<()> {
        info!("Starting storefront checkout API");
        let builder = app_cfg.checkout_builder()?;
        let state = AppState {
            builder: Arc::new(builder),
            cluster: app_cfg.cluster,
        };
        server::serve(app_cfg.bind, state).await
    }

    fn products(app_cfg: AppCfg) -> Result<()> {
        let catalog = app_cfg.load_catalog()?;
        println!("{:<6} {:<24} {:>14} {:>16}", "ID", "NAME", "PRICE", "LAMPORTS");
        for product in catalog.products() {
            let lamports = sol_to_lamports(product.price)
                .with_context(|| format!("price of product {}", product.id))?;
            println!(
                "{:<6} {:<24} {:>14} {:>16}",
                product.id,
                product.name,
                format_sol(product.price),
                lamports
            );
        }
        Ok(())
    }

    async fn build_tx(app_cfg: AppCfg, buyer: String, order_id: String, item_id: String) -> Result<()> {
        let builder = app_cfg.checkout_builder()?;
        let request = TransactionRequest {
            buyer: Some(buyer),
            order_id: Some(order_id),
            item_id: Some(ItemId::Text(item_id)),
        };

        let prepared = builder.build(&request).await.context("build checkout transaction")?;
        info!(
            "✅ {} lamports, blockhash {}",
            prepared.lamports, prepared.recent_blockhash
        );
        println!("{}", prepared.transaction);
        Ok(())
    }
}
