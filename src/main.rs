#![deny(unused)]
//! Biogate - Biometric Authentication Service
//!
//! Face and voice identification, single-pass profile authentication and a
//! lip-movement liveness check behind one HTTP API.

use std::sync::Arc;

use biogate_controller::{AuthOrchestrator, LipSyncChecker};
use biogate_core::{config::AppConfig, traits::GalleryStore};
use biogate_gateway::{AppState, GatewayServer};
use biogate_model_gateway::create_extractors;
use biogate_store::JsonGalleryStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load()?;

    biogate_governance::configure_tracing(&config.governance)?;

    tracing::info!("Starting Biogate v{}", env!("CARGO_PKG_VERSION"));

    // =========================================================================
    // Enrolled gallery
    // =========================================================================
    let store = JsonGalleryStore::new(&config.gallery.path);
    let gallery = Arc::new(store.load().await?);

    tracing::info!(
        path = %config.gallery.path,
        profiles = gallery.len(),
        "Gallery loaded"
    );

    // =========================================================================
    // Extractors and matching
    // =========================================================================
    let extractors = create_extractors(&config.extractors)?;

    let orchestrator = AuthOrchestrator::new(gallery, extractors.face, extractors.voice);
    let lip_sync = LipSyncChecker::new(extractors.landmarks);

    let state = AppState::new(orchestrator, lip_sync)
        .with_listed_profiles(config.gallery.listed_profiles.clone());

    // =========================================================================
    // Gateway
    // =========================================================================
    let mut server = GatewayServer::new(config.server.clone(), config.gateway.clone(), state);

    if config.governance.enable_metrics {
        let handle = biogate_governance::setup_metrics_recorder()?;
        server = server.with_metrics(handle);
    }

    tracing::info!(
        host = %config.server.host,
        port = config.server.port,
        "Gateway initialized"
    );

    server.run().await?;

    Ok(())
}
