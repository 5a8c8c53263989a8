//! Metrics collection and exposition.
//!
//! # Metrics
//! - `log_endpoint_queries_total` (counter): query outcomes by `outcome`
//! - `log_endpoint_backend_duration_seconds` (histogram): backend latency by `result`
//! - `log_endpoint_entries_returned` (histogram): entries per successful query
//!
//! # Design Decisions
//! - Recording is a no-op until an exporter is installed
//! - Outcome labels are fixed strings; the service name is never a label

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Query outcome labels.
pub mod outcome {
    pub const OK: &str = "ok";
    pub const UNAUTHORIZED: &str = "unauthorized";
    pub const INVALID: &str = "invalid";
    pub const BACKEND_ERROR: &str = "backend_error";
}

/// Install the Prometheus exporter with its own HTTP listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Count one finished query.
pub fn record_query(outcome: &'static str) {
    metrics::counter!("log_endpoint_queries_total", "outcome" => outcome).increment(1);
}

/// Record one backend round trip.
pub fn record_backend_call(ok: bool, start: Instant) {
    let result = if ok { "ok" } else { "error" };
    metrics::histogram!("log_endpoint_backend_duration_seconds", "result" => result)
        .record(start.elapsed().as_secs_f64());
}

/// Record how many entries a successful query returned.
pub fn record_entries_returned(count: usize) {
    metrics::histogram!("log_endpoint_entries_returned").record(count as f64);
}
