//! Metrics for the cost estimator.

use metrics::{counter, histogram};
use std::time::Duration;

pub struct EstimateMetrics;

impl EstimateMetrics {
    /// `outcome` is `ok`, `invalid`, `missing_rate` or `store_error`
    pub fn record_estimate(outcome: &'static str, elapsed: Duration) {
        counter!("cost_estimates_total", "outcome" => outcome).increment(1);
        histogram!("cost_estimate_duration_seconds").record(elapsed.as_secs_f64());
    }
}
