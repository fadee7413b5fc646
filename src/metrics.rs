//! Prometheus metrics for snapshot requests and store queries.
//!
//! This module provides metrics for:
//! - Snapshot request latency and outcomes
//! - Store query latency and document counts

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};
use tracing::debug;

// === Metric Name Constants ===

/// Snapshot request latency metric name.
pub const METRIC_SNAPSHOT_REQUEST_LATENCY: &str = "snapshot_request_latency_ms";
/// Store query latency metric name.
pub const METRIC_STORE_QUERY_LATENCY: &str = "store_query_latency_ms";
/// Snapshot requests counter metric name.
pub const METRIC_SNAPSHOT_REQUESTS: &str = "snapshot_requests_total";
/// Snapshot failures counter metric name.
pub const METRIC_SNAPSHOT_FAILURES: &str = "snapshot_failures_total";
/// Store documents counter metric name.
pub const METRIC_STORE_DOCUMENTS: &str = "store_documents_total";

/// Initialize all metric descriptions.
/// Call this once at startup to register metrics with descriptions.
pub fn init_metrics() {
    describe_histogram!(
        METRIC_SNAPSHOT_REQUEST_LATENCY,
        "End-to-end snapshot request latency in milliseconds"
    );
    describe_histogram!(
        METRIC_STORE_QUERY_LATENCY,
        "Elevator store query latency in milliseconds"
    );

    describe_counter!(
        METRIC_SNAPSHOT_REQUESTS,
        "Total number of snapshot requests handled"
    );
    describe_counter!(
        METRIC_SNAPSHOT_FAILURES,
        "Total number of snapshot requests that failed, by reason"
    );
    describe_counter!(
        METRIC_STORE_DOCUMENTS,
        "Total number of elevator documents fetched"
    );

    debug!("Metrics initialized");
}

/// Install the Prometheus exporter with its own HTTP listener.
///
/// Must be called from within a tokio runtime.
pub fn install_exporter(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()
}

/// Record store query latency.
pub fn record_store_query_latency(start: Instant) {
    let latency_ms = start.elapsed().as_secs_f64() * 1000.0;
    histogram!(METRIC_STORE_QUERY_LATENCY).record(latency_ms);
}

/// Increment snapshot requests counter.
pub fn inc_snapshot_requests() {
    counter!(METRIC_SNAPSHOT_REQUESTS).increment(1);
}

/// Increment snapshot failures counter.
pub fn inc_snapshot_failures(reason: &'static str) {
    counter!(METRIC_SNAPSHOT_FAILURES, "reason" => reason).increment(1);
}

/// Add fetched documents to the running total.
pub fn add_store_documents(count: usize) {
    counter!(METRIC_STORE_DOCUMENTS).increment(count as u64);
}

/// RAII guard for timing operations.
/// Automatically records latency when dropped.
pub struct LatencyTimer {
    start: Instant,
    metric_name: &'static str,
}

impl LatencyTimer {
    /// Create a new latency timer for the given metric.
    pub fn new(metric_name: &'static str) -> Self {
        Self {
            start: Instant::now(),
            metric_name,
        }
    }

    /// Get elapsed time in milliseconds (without recording).
    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }
}

impl Drop for LatencyTimer {
    fn drop(&mut self) {
        histogram!(self.metric_name).record(self.elapsed_ms());
    }
}

/// Create a latency timer for a snapshot request.
pub fn timer_snapshot_request() -> LatencyTimer {
    LatencyTimer::new(METRIC_SNAPSHOT_REQUEST_LATENCY)
}
