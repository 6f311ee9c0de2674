//! Try-on client metrics.

use metrics::{counter, histogram};

/// Metric name constants for consistency.
pub mod names {
    /// Total submissions by outcome.
    pub const SUBMISSIONS_TOTAL: &str = "tryon_submissions_total";

    /// Submission latency in seconds by outcome.
    pub const LATENCY_SECONDS: &str = "tryon_submission_latency_seconds";
}

/// Record a completed submission.
pub fn record_submission(outcome: &'static str, latency_ms: f64) {
    counter!(names::SUBMISSIONS_TOTAL, "outcome" => outcome).increment(1);
    histogram!(names::LATENCY_SECONDS, "outcome" => outcome).record(latency_ms / 1000.0);
}
