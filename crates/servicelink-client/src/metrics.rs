//! API request metrics.
//!
//! Recorded through the `metrics` facade; the embedding application decides
//! whether and where to export them.

use metrics::{counter, histogram};

// =============================================================================
// Metric Names
// =============================================================================

pub mod names {
    /// Total API requests by operation and status.
    pub const REQUESTS_TOTAL: &str = "servicelink_api_requests_total";

    /// Request latency in seconds by operation.
    pub const LATENCY_SECONDS: &str = "servicelink_api_latency_seconds";
}

// =============================================================================
// Recording Functions
// =============================================================================

/// Record a completed request. `status` is 0 when no response arrived.
pub fn record_request(operation: &str, status: u16, latency_ms: f64) {
    counter!(
        names::REQUESTS_TOTAL,
        "operation" => operation.to_string(),
        "status" => status.to_string()
    )
    .increment(1);

    histogram!(
        names::LATENCY_SECONDS,
        "operation" => operation.to_string()
    )
    .record(latency_ms / 1000.0);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metric_names() {
        assert!(names::REQUESTS_TOTAL.starts_with("servicelink_api"));
        assert!(names::LATENCY_SECONDS.ends_with("_seconds"));
    }
}
