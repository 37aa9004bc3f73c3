//! Metrics collection and exposition.
//!
//! # Metrics
//! - `test_backend_requests_total` (counter): requests by method, status
//! - `test_backend_request_duration_seconds` (histogram): latency by method
//! - `test_backend_users_total` (gauge): records currently in the store
//! - `test_backend_heartbeats_total` (counter): agent heartbeats by outcome

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder and its scrape endpoint.
///
/// Failure is logged; the service keeps running without metrics.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint started"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Record one handled HTTP request.
pub fn record_request(method: &str, status: u16, start: Instant) {
    let labels = [
        ("method", method.to_string()),
        ("status", status.to_string()),
    ];
    counter!("test_backend_requests_total", &labels).increment(1);
    histogram!("test_backend_request_duration_seconds", "method" => method.to_string())
        .record(start.elapsed().as_secs_f64());
}

/// Record the current number of users in the store.
pub fn record_user_count(count: usize) {
    gauge!("test_backend_users_total").set(count as f64);
}

/// Record the outcome of one agent heartbeat.
pub fn record_heartbeat(success: bool) {
    let outcome = if success { "ok" } else { "error" };
    counter!("test_backend_heartbeats_total", "outcome" => outcome).increment(1);
}
