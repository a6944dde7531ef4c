//! Prometheus exposition of the panel API metrics.
//!
//! Installs a global `metrics` recorder and serves its contents in the
//! Prometheus text format at `http://{bind}/metrics`. Without it, every
//! [`MetricsCollector`](crate::MetricsCollector) call is a no-op.
//!
//! The HTTP listener runs on the current Tokio runtime when there is one,
//! otherwise on a background thread owned by the exporter crate.

use std::net::SocketAddr;

use metrics_exporter_prometheus::{BuildError, Matcher, PrometheusBuilder};
use tracing::info;

use crate::metrics::METRIC_REQUEST_DURATION;

/// Histogram buckets for request latency, in seconds.
const REQUEST_DURATION_BUCKETS: &[f64] = &[0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0];

/// Handle for an installed Prometheus exporter.
#[derive(Debug)]
pub struct MetricsExporter {
    bind_addr: SocketAddr,
}

impl MetricsExporter {
    /// Install the global recorder and start serving `/metrics` on `bind_addr`.
    ///
    /// # Errors
    /// Fails when the address does not parse, the listener cannot bind, or a
    /// recorder is already installed in this process.
    pub fn install(bind_addr: &str) -> Result<Self, MetricsExporterError> {
        let addr: SocketAddr = bind_addr
            .trim()
            .parse()
            .map_err(|e| MetricsExporterError::InvalidBindAddress(bind_addr.to_string(), e))?;

        PrometheusBuilder::new()
            .set_buckets_for_metric(
                Matcher::Full(METRIC_REQUEST_DURATION.to_string()),
                REQUEST_DURATION_BUCKETS,
            )?
            .with_http_listener(addr)
            .install()?;

        info!(%addr, "Prometheus metrics exporter listening");
        Ok(Self { bind_addr: addr })
    }

    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}

/// Errors from [`MetricsExporter::install`].
#[derive(Debug, thiserror::Error)]
pub enum MetricsExporterError {
    #[error("Invalid metrics bind address '{0}': {1}")]
    InvalidBindAddress(String, std::net::AddrParseError),

    #[error("Failed to start Prometheus exporter: {0}")]
    Build(String),
}

impl From<BuildError> for MetricsExporterError {
    fn from(err: BuildError) -> Self {
        MetricsExporterError::Build(err.to_string())
    }
}
