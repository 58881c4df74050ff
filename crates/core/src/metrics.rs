//! Prometheus metrics for core components.
//!
//! Counters and histograms are lazily-initialized statics; the server
//! registers them and serves the scrape endpoint.

use once_cell::sync::Lazy;
use prometheus::{Histogram, HistogramOpts, IntCounter, IntCounterVec, Opts, Registry};

/// Conversions by result ("success" / "failed").
pub static CONVERSIONS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("waveshift_conversions_total", "Total conversion requests"),
        &["result"],
    )
    .unwrap()
});

/// Conversion duration in seconds.
pub static CONVERSION_DURATION: Lazy<Histogram> = Lazy::new(|| {
    Histogram::with_opts(
        HistogramOpts::new(
            "waveshift_conversion_duration_seconds",
            "Duration of successful conversions",
        )
        .buckets(vec![0.5, 1.0, 2.5, 5.0, 10.0, 30.0, 60.0, 120.0, 300.0]),
    )
    .unwrap()
});

/// Inputs staged into the temp directory.
pub static STAGED_FILES: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new("waveshift_staged_files_total", "Inputs staged to temp").unwrap()
});

/// Orphaned staged files deleted by sweeps.
pub static SWEEP_DELETED: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "waveshift_sweep_deleted_total",
        "Orphaned staged files deleted by sweeps",
    )
    .unwrap()
});

/// Registers all core metrics with the given registry.
pub fn register_all(registry: &Registry) -> Result<(), prometheus::Error> {
    registry.register(Box::new(CONVERSIONS.clone()))?;
    registry.register(Box::new(CONVERSION_DURATION.clone()))?;
    registry.register(Box::new(STAGED_FILES.clone()))?;
    registry.register(Box::new(SWEEP_DELETED.clone()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_all() {
        let registry = Registry::new();
        register_all(&registry).unwrap();

        CONVERSIONS.with_label_values(&["success"]).inc();
        let families = registry.gather();
        assert!(families
            .iter()
            .any(|f| f.get_name() == "waveshift_conversions_total"));
    }
}
