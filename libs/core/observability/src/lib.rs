//! Prometheus metrics for the estate services.
//!
//! ```rust,ignore
//! use observability::{init_metrics, metrics_handler, AmenityMetrics};
//!
//! init_metrics()?;
//! AmenityMetrics::record_provider_call("Medical", ProviderOutcome::Ok, elapsed);
//!
//! let app = Router::new().route("/metrics", get(metrics_handler));
//! ```

pub mod amenities;
pub mod estimates;
pub mod middleware;

pub use amenities::{AmenityMetrics, ProviderOutcome};
pub use estimates::EstimateMetrics;
pub use middleware::metrics_middleware;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;
use tracing::info;

static METRICS_HANDLE: OnceCell<PrometheusHandle> = OnceCell::new();

/// Install the global Prometheus recorder. Later calls return the same handle.
pub fn init_metrics() -> Result<&'static PrometheusHandle, BuildError> {
    METRICS_HANDLE.get_or_try_init(|| {
        let handle = PrometheusBuilder::new().install_recorder()?;
        info!("Prometheus metrics recorder initialized");
        register_metric_descriptions();
        Ok(handle)
    })
}

pub fn get_metrics_handle() -> Option<&'static PrometheusHandle> {
    METRICS_HANDLE.get()
}

/// Axum handler for /metrics
pub async fn metrics_handler() -> String {
    match get_metrics_handle() {
        Some(handle) => handle.render(),
        None => "# Metrics not initialized\n".to_string(),
    }
}

fn register_metric_descriptions() {
    use metrics::{describe_counter, describe_histogram};

    describe_counter!("http_requests_total", "Total number of HTTP requests");
    describe_histogram!(
        "http_request_duration_seconds",
        "HTTP request duration in seconds"
    );
    describe_counter!(
        "http_requests_errors_total",
        "Total number of HTTP request errors"
    );

    describe_counter!(
        "places_requests_total",
        "Places provider calls by amenity category and outcome"
    );
    describe_histogram!(
        "places_request_duration_seconds",
        "Places provider call duration by amenity category"
    );
    describe_counter!(
        "society_searches_total",
        "Society searches by kind"
    );

    describe_counter!("cost_estimates_total", "Cost estimates by outcome");
    describe_histogram!(
        "cost_estimate_duration_seconds",
        "Cost estimate duration including reference reads"
    );
}
