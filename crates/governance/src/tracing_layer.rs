//! Tracing subscriber configuration.

use biogate_core::config::GovernanceConfig;
use biogate_core::{Error, Result};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_FILTER: &str = "info,biogate=debug";

/// Install the global subscriber: `RUST_LOG` filter plus one fmt layer.
///
/// Fails when a global subscriber is already set.
pub fn configure_tracing(config: &GovernanceConfig) -> Result<()> {
    let env_filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_FILTER.into()),
    );

    let json_layer = config.json_logs.then(|| fmt::layer().json());
    let plain_layer = (!config.json_logs).then(|| fmt::layer());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(plain_layer)
        .try_init()
        .map_err(|e| Error::governance(format!("Failed to install tracing subscriber: {}", e)))?;

    tracing::info!(json = config.json_logs, "Tracing configured");
    Ok(())
}
