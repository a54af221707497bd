use std::{io, sync::Arc};

use anyhow::Result;
use clap::Parser;
use japan_info_client::{ClientConfig, HttpContentSource};
use ji_cli::{cli::Cli, commands};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so piped output stays clean; override via RUST_LOG.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.client_config(ClientConfig::from_env())?;
    let source = Arc::new(HttpContentSource::new(config.api_base.clone()));

    let mut stdout = io::stdout().lock();
    commands::execute(cli, &config, source, &mut stdout).await
}
