//! Prometheus metrics endpoint support.
//!
//! The registry aggregates the core pipeline metrics plus server-side HTTP
//! counters and renders them in the Prometheus text format.

use once_cell::sync::Lazy;
use prometheus::{Encoder, IntCounterVec, Opts, Registry, TextEncoder};

/// Global metrics registry.
pub static REGISTRY: Lazy<Registry> = Lazy::new(|| {
    let registry = Registry::new();
    register_metrics(&registry);
    registry
});

/// HTTP requests total count.
pub static HTTP_REQUESTS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("waveshift_http_requests_total", "Total HTTP requests"),
        &["path"],
    )
    .unwrap()
});

fn register_metrics(registry: &Registry) {
    if let Err(e) = waveshift_core::metrics::register_all(registry) {
        tracing::warn!("Failed to register core metrics: {}", e);
    }
    if let Err(e) = registry.register(Box::new(HTTP_REQUESTS_TOTAL.clone())) {
        tracing::warn!("Failed to register HTTP metrics: {}", e);
    }
}

/// Renders all registered metrics in the Prometheus text format.
pub fn encode_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::warn!("Failed to encode metrics: {}", e);
    }
    String::from_utf8(buffer).unwrap_or_default()
}
