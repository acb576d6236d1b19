//! Metrics collection and exposition.
//!
//! # Responsibilities
//! - Define request and negotiation metrics
//! - Expose a Prometheus-compatible metrics endpoint
//!
//! # Metrics
//! - `content_redirect_requests_total` (counter): requests by handler, status
//! - `content_redirect_request_duration_seconds` (histogram): latency by handler
//! - `content_redirect_negotiations_total` (counter): negotiation outcomes
//!
//! # Design Decisions
//! - Recording is a no-op until an exporter is installed
//! - Labels stay low-cardinality: handler names and status codes, never paths

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter with its own HTTP listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Record a completed request.
pub fn record_request(handler: &'static str, status: u16, start: Instant) {
    let status = status.to_string();
    counter!(
        "content_redirect_requests_total",
        "handler" => handler,
        "status" => status
    )
    .increment(1);
    histogram!("content_redirect_request_duration_seconds", "handler" => handler)
        .record(start.elapsed().as_secs_f64());
}

/// Record how a content negotiation ended.
pub fn record_negotiation(outcome: &'static str) {
    counter!("content_redirect_negotiations_total", "outcome" => outcome).increment(1);
}
