//! Metrics and monitoring using Prometheus.
//!
//! Publish outcomes are counted by status and code, publish latency is tracked
//! as a histogram, and the number of live producers is kept in a gauge. Render
//! the registry with [`Metrics::gather`].

use once_cell::sync::Lazy;
use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounterVec, IntGauge, Opts, Registry, TextEncoder,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::error;

use crate::pubsub::Outcome;

/// Global metrics registry
static METRICS_REGISTRY: Lazy<Registry> = Lazy::new(Registry::new);

/// Global metrics instance
pub static METRICS: Lazy<Arc<Metrics>> = Lazy::new(|| {
    let metrics = Metrics::new();
    if let Err(e) = metrics.register(&METRICS_REGISTRY) {
        error!("Failed to register metrics: {}", e);
    }
    Arc::new(metrics)
});

/// Metrics collector for the Pub/Sub destination
pub struct Metrics {
    /// Publish attempts by outcome status and code (counter)
    pub publish_total: IntCounterVec,
    /// Publish latency in seconds by outcome status (histogram)
    pub publish_latency_seconds: HistogramVec,
    /// Producers constructed and not yet closed (gauge)
    pub active_producers: IntGauge,
}

impl Metrics {
    /// Create a new Metrics instance
    pub fn new() -> Self {
        let publish_total = IntCounterVec::new(
            Opts::new(
                "pubsub_destination_publish_total",
                "Total publish attempts by outcome",
            ),
            &["status", "code"],
        )
        .expect("Failed to create publish_total metric");

        let publish_latency_seconds = HistogramVec::new(
            HistogramOpts::new(
                "pubsub_destination_publish_latency_seconds",
                "Publish latency in seconds",
            )
            .buckets(vec![0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]),
            &["status"],
        )
        .expect("Failed to create publish_latency_seconds metric");

        let active_producers = IntGauge::new(
            "pubsub_destination_active_producers",
            "Number of open producers",
        )
        .expect("Failed to create active_producers metric");

        Self {
            publish_total,
            publish_latency_seconds,
            active_producers,
        }
    }

    /// Register all metrics with the registry
    fn register(&self, registry: &Registry) -> Result<(), prometheus::Error> {
        registry.register(Box::new(self.publish_total.clone()))?;
        registry.register(Box::new(self.publish_latency_seconds.clone()))?;
        registry.register(Box::new(self.active_producers.clone()))?;
        Ok(())
    }

    /// Record the outcome of one publish
    pub fn record_publish(&self, outcome: &Outcome, elapsed: Duration) {
        let status = outcome.status.as_str();
        self.publish_total
            .with_label_values(&[status, &outcome.code.to_string()])
            .inc();
        self.publish_latency_seconds
            .with_label_values(&[status])
            .observe(elapsed.as_secs_f64());
    }

    /// Gather metrics in Prometheus text format
    pub fn gather(&self) -> Result<String, prometheus::Error> {
        let encoder = TextEncoder::new();
        let metric_families = METRICS_REGISTRY.gather();
        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer)?;
        Ok(String::from_utf8(buffer).unwrap_or_default())
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Get the global metrics instance
pub fn get_metrics() -> Arc<Metrics> {
    METRICS.clone()
}
