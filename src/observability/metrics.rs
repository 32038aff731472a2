//! Metrics collection and exposition.
//!
//! # Metrics
//! - `route_annotate_annotations_total` (counter): successful annotate calls
//! - `route_annotate_queries_total` (counter): find_all calls
//! - `route_annotate_matches_total` (counter): routes returned by find_all
//! - `route_annotate_reloads_total` (counter): applied config reloads
//!
//! # Design Decisions
//! - Recording is a no-op until a recorder is installed
//! - Prometheus exporter only when enabled in config

use std::net::SocketAddr;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter listening on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_annotation() {
    metrics::counter!("route_annotate_annotations_total").increment(1);
}

pub fn record_query(matched: usize) {
    metrics::counter!("route_annotate_queries_total").increment(1);
    metrics::counter!("route_annotate_matches_total").increment(matched as u64);
}

pub fn record_reload() {
    metrics::counter!("route_annotate_reloads_total").increment(1);
}
