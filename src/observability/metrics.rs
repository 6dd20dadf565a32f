//! Metrics collection and exposition.
//!
//! # Metrics
//! - `lep_requests_total` (counter): requests by route, outcome, status
//! - `lep_request_duration_seconds` (histogram): time to response head, by route
//! - `lep_merge_outcomes_total` (counter): app page merges by outcome

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

use crate::http::response::OutcomeStatus;

/// Start the Prometheus exporter on `addr`. Needs a running Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

/// Record a finished request.
pub fn record_request(route: &'static str, outcome: Option<OutcomeStatus>, status: u16, start: Instant) {
    let outcome = outcome.map(|o| o.as_str()).unwrap_or("none");
    ::metrics::counter!(
        "lep_requests_total",
        "route" => route,
        "outcome" => outcome,
        "status" => status.to_string()
    )
    .increment(1);
    ::metrics::histogram!("lep_request_duration_seconds", "route" => route)
        .record(start.elapsed().as_secs_f64());
}

/// Record the outcome of an app page merge.
pub fn record_merge(outcome: OutcomeStatus) {
    ::metrics::counter!("lep_merge_outcomes_total", "outcome" => outcome.as_str()).increment(1);
}
