//! Output formatters for CLI commands.
//!
//! Responsibilities:
//! - Provide table, JSON and CSV renderings of API users, the access policy
//!   and freshly issued tokens.
//! - Route rendered output to stdout or a file.
//!
//! Does NOT handle:
//! - Status lines such as "API user 3 enabled." (printed by the commands).
//!
//! ## Empty-State Handling
//!
//! | Format | Empty list |
//! |--------|-----------|
//! | JSON | `[]` |
//! | CSV | Header row only |
//! | Table | `No API users found.` |
//!
//! ## Missing Values
//!
//! A user that never made a request has no last-used time: `null` in JSON,
//! `never` in table and CSV output.

mod common;
mod csv;
mod json;
mod table;

use anyhow::Result;
use keygate_client::{ApiSettings, Credential, CredentialId};
use serde::Serialize;

pub use common::output_result;

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Csv,
}

impl OutputFormat {
    /// Parse output format from string.
    pub fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            _ => anyhow::bail!(
                "Invalid output format: {}. Valid options: table, json, csv",
                s
            ),
        }
    }
}

/// A token shown to the operator exactly once.
#[derive(Debug, Serialize)]
pub struct IssuedToken<'a> {
    pub id: Option<CredentialId>,
    pub name: Option<&'a str>,
    pub token: &'a str,
}

/// Result of `install`.
#[derive(Debug, Serialize)]
pub struct BootstrapReport<'a> {
    pub settings: ApiSettings,
    /// Users already present when no bootstrap user was created.
    pub existing_users: Option<usize>,
    pub created: Option<IssuedToken<'a>>,
}

/// Formatter trait for different output types.
pub trait Formatter {
    fn format_credentials(&self, credentials: &[Credential]) -> Result<String>;

    fn format_settings(&self, settings: &ApiSettings) -> Result<String>;

    fn format_issued_token(&self, issued: &IssuedToken<'_>) -> Result<String>;

    fn format_bootstrap(&self, report: &BootstrapReport<'_>) -> Result<String>;
}

pub fn get_formatter(format: OutputFormat) -> Box<dyn Formatter> {
    match format {
        OutputFormat::Table => Box::new(table::TableFormatter),
        OutputFormat::Json => Box::new(json::JsonFormatter),
        OutputFormat::Csv => Box::new(csv::CsvFormatter),
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_from_str() {
        assert_eq!(OutputFormat::from_str("table").unwrap(), OutputFormat::Table);
        assert_eq!(OutputFormat::from_str("JSON").unwrap(), OutputFormat::Json);
        assert_eq!(OutputFormat::from_str("csv").unwrap(), OutputFormat::Csv);
        let err = OutputFormat::from_str("xml").unwrap_err();
        assert!(err.to_string().contains("Valid options"));
    }
}
