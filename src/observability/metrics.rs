//! Metrics collection and exposition.
//!
//! # Metrics
//! - `dispatch_requests_total` (counter): delegated/fallback requests by route, status
//! - `dispatch_request_duration_seconds` (histogram): latency by route
//! - `dispatch_preflight_total` (counter): requests answered without delegation

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

use crate::routing::RouteDecision;

/// Install the Prometheus recorder and its scrape listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Record a routed request once its response is known.
pub fn record_request(route: RouteDecision, status: u16, start: Instant) {
    let elapsed = start.elapsed().as_secs_f64();
    metrics::counter!(
        "dispatch_requests_total",
        "route" => route.as_str(),
        "status" => status.to_string()
    )
    .increment(1);
    metrics::histogram!("dispatch_request_duration_seconds", "route" => route.as_str())
        .record(elapsed);
}

/// Record a request answered by the preflight handler.
pub fn record_preflight() {
    metrics::counter!("dispatch_preflight_total").increment(1);
}
