//! Launcher Files Binary
//!
//! Serves a directory tree with a content-addressed manifest.

use anyhow::Context;
use clap::Parser;
use launcher_files::cli::Cli;
use launcher_files::config::{ConfigLoader, ServerConfig};
use launcher_files::logging::init_logging;
use launcher_files::server::{self, AppState};
use launcher_files::store::SnapshotStore;
use std::process;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{:#}", e);
            process::exit(1);
        }
    };

    if let Err(e) = init_logging(&config.logging) {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(1);
    }

    if let Err(e) = run(config).await {
        error!("{:#}", e);
        process::exit(1);
    }
}

/// Config file and environment, then command-line overrides.
fn load_config(cli: &Cli) -> anyhow::Result<ServerConfig> {
    let mut config =
        ConfigLoader::load(cli.config.as_deref()).context("Failed to load configuration")?;
    cli.apply_to(&mut config);
    config.validate()?;
    Ok(config)
}

async fn run(config: ServerConfig) -> anyhow::Result<()> {
    let options = config.scan_options()?;
    let addr = config.listen_addr()?;
    info!(root = %options.root.display(), algorithm = %options.algorithm, "Building initial manifest");

    // Fatal: never serve without a manifest
    let store = tokio::task::spawn_blocking(move || SnapshotStore::new(options))
        .await
        .context("Initial manifest task failed")?
        .context("Failed to create server")?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    server::serve(listener, AppState::new(store), server::shutdown_signal())
        .await
        .context("Server error")?;
    Ok(())
}
