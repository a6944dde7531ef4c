//! Command implementations.
//!
//! Every command drives a [`CredentialController`] wired to the panel client,
//! so the same validation, confirmation and reload rules apply as anywhere
//! else the controller is used.

pub mod credentials;
pub mod install;
pub mod settings;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use keygate_client::{MetricsCollector, PanelClient};
use keygate_config::Config;
use keygate_panel::{
    ConfirmationGate, CredentialController, SharedClient, SystemClipboard, TracingNotifier,
};
use tokio::sync::Mutex;

use crate::formatters::{Formatter, OutputFormat, get_formatter, output_result};

/// Where and how command results are rendered.
pub struct Output {
    pub format: OutputFormat,
    pub file: Option<PathBuf>,
}

impl Output {
    pub fn formatter(&self) -> Box<dyn Formatter> {
        get_formatter(self.format)
    }

    pub fn emit(&self, rendered: &str) -> Result<()> {
        output_result(rendered, self.format, self.file.as_ref())
    }
}

/// Build a controller over a fresh panel client.
///
/// Request metrics reach Prometheus when `--metrics-bind` installed the exporter.
pub fn build_controller(
    config: &Config,
    gate: Arc<dyn ConfirmationGate>,
) -> Result<CredentialController> {
    let client = PanelClient::builder()
        .from_config(config)
        .metrics(MetricsCollector::new())
        .build()
        .context("Failed to create panel client")?;
    let shared: SharedClient = Arc::new(Mutex::new(client));

    Ok(CredentialController::new(
        shared,
        gate,
        Arc::new(SystemClipboard),
        Arc::new(TracingNotifier),
    ))
}
