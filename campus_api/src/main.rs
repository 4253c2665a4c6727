use anyhow::{Context, Result};
use campus_api::logging::init_logging;
use campus_api::{open_store, router, AppState, ConfigOverrides, DashboardConfig};
use clap::Parser;
use std::path::PathBuf;
use tokio::net::TcpListener;
use tracing::{info, warn};

/// Campus insight dashboard API
#[derive(Debug, Parser)]
#[command(name = "campus-insight", version, about)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long, env = "CAMPUS_CONFIG")]
    config: Option<PathBuf>,

    /// Listen address, e.g. 127.0.0.1:8000
    #[arg(long)]
    bind: Option<String>,

    /// Log level when RUST_LOG is unset
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let overrides = ConfigOverrides {
        bind_addr: cli.bind,
        log_level: cli.log_level,
    };
    let config = DashboardConfig::load(cli.config.as_deref(), &overrides)
        .context("failed to load configuration")?;

    init_logging(&config.server)?;

    let store = open_store(&config.store).context("failed to open record store")?;
    match store.ping().await {
        Ok(()) => info!(store = %store.describe(), "record store connected"),
        Err(e) => warn!(store = %store.describe(), error = %e, "record store not reachable yet"),
    }

    let state = AppState::from_config(store, &config).context("invalid forecast settings")?;
    let addr = config.bind_addr()?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    info!(%addr, version = campus_api::VERSION, "campus insight API listening");
    axum::serve(listener, router(state)).await?;

    Ok(())
}
