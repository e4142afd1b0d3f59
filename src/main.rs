use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use storefront::application::{Cli, CommandExecutor};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    CommandExecutor::execute(cli).await
}
