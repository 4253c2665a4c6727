//! Tracing subscriber set-up

use crate::config::{LogFormat, ServerConfig};
use anyhow::Result;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Filter from `RUST_LOG` when set, else the configured level
pub fn env_filter(level: &str) -> Result<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => Ok(EnvFilter::try_new(format!("{level},tower_http={level}"))?),
    }
}

/// Install the global subscriber
pub fn init_logging(config: &ServerConfig) -> Result<()> {
    let layer = match config.log_format {
        LogFormat::Json => fmt::layer().json().with_target(true).boxed(),
        LogFormat::Pretty => fmt::layer().with_target(true).boxed(),
    };

    tracing_subscriber::registry()
        .with(layer)
        .with(env_filter(&config.log_level)?)
        .try_init()?;

    Ok(())
}
