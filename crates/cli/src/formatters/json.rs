//! JSON output, using the panel's own field names.

use anyhow::Result;
use keygate_client::{ApiSettings, Credential};

use super::{BootstrapReport, Formatter, IssuedToken};

pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn format_credentials(&self, credentials: &[Credential]) -> Result<String> {
        Ok(format!("{}\n", serde_json::to_string_pretty(credentials)?))
    }

    fn format_settings(&self, settings: &ApiSettings) -> Result<String> {
        Ok(format!("{}\n", serde_json::to_string_pretty(settings)?))
    }

    fn format_issued_token(&self, issued: &IssuedToken<'_>) -> Result<String> {
        Ok(format!("{}\n", serde_json::to_string_pretty(issued)?))
    }

    fn format_bootstrap(&self, report: &BootstrapReport<'_>) -> Result<String> {
        Ok(format!("{}\n", serde_json::to_string_pretty(report)?))
    }
}
