//! Metrics collection for panel API calls.
//!
//! This module records, per endpoint and method:
//! - Request latency histograms
//! - Request, retry and error counters
//! - Envelope rejections and payload decode failures
//!
//! # What this module does NOT handle:
//! - Exposition (see `metrics_exporter`)
//!
//! # Invariants
//! - All metrics use consistent label names: `endpoint`, `method`, `status`, `error_category`
//! - Endpoint labels are path templates (`/panel/api-users/rotate/{id}`), never concrete ids
//! - Zero-cost when no metrics recorder is installed

use crate::error::ClientError;
use std::time::Duration;

/// Metric name for request duration histogram.
pub const METRIC_REQUEST_DURATION: &str = "keygate_api_request_duration_seconds";

/// Metric name for total request counter.
pub const METRIC_REQUESTS_TOTAL: &str = "keygate_api_requests_total";

/// Metric name for retry counter.
pub const METRIC_RETRIES_TOTAL: &str = "keygate_api_retries_total";

/// Metric name for error counter.
pub const METRIC_ERRORS_TOTAL: &str = "keygate_api_errors_total";

/// Metric name for payload decode failure counter.
pub const METRIC_DESERIALIZATION_FAILURES: &str = "keygate_api_deserialization_failures_total";

/// Error categories for metrics labeling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Transport-level errors (connection refused, DNS, etc.)
    Transport,
    /// HTTP 4xx client errors
    Http4xx,
    /// HTTP 5xx server errors
    Http5xx,
    /// The panel answered `success: false`
    Rejected,
    /// Request timeout
    Timeout,
    /// Rate limiting outlasted the retry budget
    RateLimited,
    /// Unknown/unclassified errors
    Unknown,
}

impl ErrorCategory {
    /// Returns the string label for this error category.
    pub const fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Transport => "transport",
            ErrorCategory::Http4xx => "http_4xx",
            ErrorCategory::Http5xx => "http_5xx",
            ErrorCategory::Rejected => "rejected",
            ErrorCategory::Timeout => "timeout",
            ErrorCategory::RateLimited => "rate_limited",
            ErrorCategory::Unknown => "unknown",
        }
    }
}

impl From<&ClientError> for ErrorCategory {
    fn from(error: &ClientError) -> Self {
        match error {
            ClientError::ApiError { status, .. } => {
                if (400..500).contains(status) {
                    ErrorCategory::Http4xx
                } else if (500..600).contains(status) {
                    ErrorCategory::Http5xx
                } else {
                    ErrorCategory::Unknown
                }
            }
            ClientError::HttpError(e) if e.is_timeout() => ErrorCategory::Timeout,
            ClientError::HttpError(e) if e.is_connect() => ErrorCategory::Transport,
            ClientError::Rejected { .. } => ErrorCategory::Rejected,
            ClientError::MaxRetriesExceeded(_) => ErrorCategory::RateLimited,
            _ => ErrorCategory::Unknown,
        }
    }
}

/// Metrics collector for panel API calls.
///
/// A lightweight wrapper around the `metrics` crate macros with consistent labels.
#[derive(Debug, Clone, Default)]
pub struct MetricsCollector {
    enabled: bool,
}

impl MetricsCollector {
    /// Create an enabled metrics collector.
    pub fn new() -> Self {
        Self { enabled: true }
    }

    /// Create a collector that records nothing.
    pub fn disabled() -> Self {
        Self { enabled: false }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Record the duration of an API request.
    ///
    /// `status` is `None` when the request failed before a response arrived.
    pub fn record_request_duration(
        &self,
        endpoint: &str,
        method: &str,
        duration: Duration,
        status: Option<u16>,
    ) {
        if !self.enabled {
            return;
        }

        let status_label = status.map_or("error".to_string(), |s| s.to_string());

        metrics::histogram!(METRIC_REQUEST_DURATION,
            "endpoint" => endpoint.to_string(),
            "method" => method.to_string(),
            "status" => status_label,
        )
        .record(duration.as_secs_f64());
    }

    /// Record a request attempt, including retries.
    pub fn record_request(&self, endpoint: &str, method: &str) {
        if !self.enabled {
            return;
        }

        metrics::counter!(METRIC_REQUESTS_TOTAL,
            "endpoint" => endpoint.to_string(),
            "method" => method.to_string(),
        )
        .increment(1);
    }

    /// Record a retry attempt (1-based, not counting the initial request).
    pub fn record_retry(&self, endpoint: &str, method: &str, attempt: usize) {
        if !self.enabled {
            return;
        }

        metrics::counter!(METRIC_RETRIES_TOTAL,
            "endpoint" => endpoint.to_string(),
            "method" => method.to_string(),
            "attempt" => attempt.to_string(),
        )
        .increment(1);
    }

    pub fn record_error(&self, endpoint: &str, method: &str, category: ErrorCategory) {
        if !self.enabled {
            return;
        }

        metrics::counter!(METRIC_ERRORS_TOTAL,
            "endpoint" => endpoint.to_string(),
            "method" => method.to_string(),
            "error_category" => category.as_str(),
        )
        .increment(1);
    }

    /// Record an error, categorizing it automatically.
    pub fn record_client_error(&self, endpoint: &str, method: &str, error: &ClientError) {
        self.record_error(endpoint, method, ErrorCategory::from(error));
    }

    /// Record a payload that did not match the expected model.
    pub fn record_deserialization_failure(&self, endpoint: &str, model_type: &'static str) {
        if !self.enabled {
            return;
        }
        metrics::counter!(METRIC_DESERIALIZATION_FAILURES,
            "endpoint" => endpoint.to_string(),
            "model_type" => model_type,
        )
        .increment(1);
    }
}
