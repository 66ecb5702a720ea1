//! Observability for biogate.
//!
//! This crate provides:
//! - Tracing subscriber setup (plain or JSON logs)
//! - Prometheus metrics recorder and recording helpers

pub mod metrics;
pub mod tracing_layer;

pub use metrics::{
    setup_metrics_recorder, track_decision, track_lip_sync, track_match, track_request,
};
pub use tracing_layer::configure_tracing;
