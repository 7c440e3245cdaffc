use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::info;

use chatbridge::app::{AppConfig, AppState};
use chatbridge::cli::Cli;
use chatbridge::server;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_directive = if cli.debug {
        "chatbridge=debug"
    } else {
        "chatbridge=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(default_directive.parse().unwrap()),
        )
        .init();

    info!("Starting ChatBridge");

    let mut config = AppConfig::load(cli.config.as_deref().map(Path::new)).await?;
    if let Some(host) = cli.host {
        config.server.host = host;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }

    let state = Arc::new(AppState::new(config)?);
    server::serve(state).await?;

    Ok(())
}
