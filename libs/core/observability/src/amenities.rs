//! Metrics for the amenity fan-out.

use metrics::{counter, histogram};
use std::time::Duration;

/// How one provider call for one category ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderOutcome {
    Ok,
    /// Provider answered with a non-OK status
    Rejected,
    /// Transport error or undecodable body
    Failed,
    TimedOut,
}

impl ProviderOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::Rejected => "rejected",
            Self::Failed => "failed",
            Self::TimedOut => "timed_out",
        }
    }
}

pub struct AmenityMetrics;

impl AmenityMetrics {
    pub fn record_provider_call(category: &str, outcome: ProviderOutcome, elapsed: Duration) {
        counter!(
            "places_requests_total",
            "category" => category.to_string(),
            "outcome" => outcome.as_str()
        )
        .increment(1);
        histogram!("places_request_duration_seconds", "category" => category.to_string())
            .record(elapsed.as_secs_f64());

        if outcome != ProviderOutcome::Ok {
            tracing::debug!(
                category,
                outcome = outcome.as_str(),
                elapsed_ms = elapsed.as_millis() as u64,
                "Places call did not succeed"
            );
        }
    }

    /// `kind` is `name`, `preferences` or `single`
    pub fn record_search(kind: &'static str, results: usize) {
        counter!("society_searches_total", "kind" => kind).increment(1);
        tracing::debug!(kind, results, "Society search completed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_labels_are_stable() {
        assert_eq!(ProviderOutcome::Ok.as_str(), "ok");
        assert_eq!(ProviderOutcome::TimedOut.as_str(), "timed_out");
    }

    #[test]
    fn test_recording_without_recorder_is_a_noop() {
        AmenityMetrics::record_provider_call("Parks", ProviderOutcome::Failed, Duration::from_millis(3));
        AmenityMetrics::record_search("name", 0);
    }
}
