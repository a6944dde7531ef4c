//! CSV output with a header row.

use anyhow::Result;
use keygate_client::{ApiSettings, Credential};

use super::common::{build_csv_row, format_last_used, format_rate};
use super::{BootstrapReport, Formatter, IssuedToken};

pub struct CsvFormatter;

fn issued_cells(issued: Option<&IssuedToken<'_>>) -> [String; 3] {
    match issued {
        Some(issued) => [
            issued.id.map(|id| id.to_string()).unwrap_or_default(),
            issued.name.unwrap_or_default().to_string(),
            issued.token.to_string(),
        ],
        None => Default::default(),
    }
}

impl Formatter for CsvFormatter {
    fn format_credentials(&self, credentials: &[Credential]) -> Result<String> {
        let mut output = String::from("id,name,enabled,rate_limit_per_minute,last_used\n");
        for c in credentials {
            output.push_str(&build_csv_row(&[
                c.id.to_string(),
                c.name.clone(),
                c.enabled.to_string(),
                format_rate(c.rate_limit_per_minute),
                format_last_used(c.last_used_at.as_ref()),
            ]));
        }
        Ok(output)
    }

    fn format_settings(&self, settings: &ApiSettings) -> Result<String> {
        Ok(format!(
            "token_only,default_rate_limit_per_minute\n{},{}\n",
            settings.token_only, settings.default_rate_limit_per_minute
        ))
    }

    fn format_issued_token(&self, issued: &IssuedToken<'_>) -> Result<String> {
        let mut output = String::from("id,name,token\n");
        output.push_str(&build_csv_row(&issued_cells(Some(issued))));
        Ok(output)
    }

    fn format_bootstrap(&self, report: &BootstrapReport<'_>) -> Result<String> {
        let [id, name, token] = issued_cells(report.created.as_ref());
        let mut output =
            String::from("token_only,default_rate_limit_per_minute,existing_users,id,name,token\n");
        output.push_str(&build_csv_row(&[
            report.settings.token_only.to_string(),
            report.settings.default_rate_limit_per_minute.to_string(),
            report
                .existing_users
                .map(|n| n.to_string())
                .unwrap_or_default(),
            id,
            name,
            token,
        ]));
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formatters::test_support::sample_credentials;

    #[test]
    fn test_credentials_csv() {
        let output = CsvFormatter
            .format_credentials(&sample_credentials())
            .unwrap();
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines[0], "id,name,enabled,rate_limit_per_minute,last_used");
        assert_eq!(lines[1], "3,svc-bot,true,60,2026-03-01 12:30:00 UTC");
        assert_eq!(lines[2], "5,\"ci, runner\",false,default,never");
    }

    #[test]
    fn test_empty_credentials_csv_keeps_header() {
        let output = CsvFormatter.format_credentials(&[]).unwrap();
        assert_eq!(output, "id,name,enabled,rate_limit_per_minute,last_used\n");
    }

    #[test]
    fn test_settings_csv() {
        let output = CsvFormatter
            .format_settings(&ApiSettings {
                token_only: false,
                default_rate_limit_per_minute: 60,
            })
            .unwrap();
        assert_eq!(output, "token_only,default_rate_limit_per_minute\nfalse,60\n");
    }

    #[test]
    fn test_bootstrap_csv_without_created_user() {
        let output = CsvFormatter
            .format_bootstrap(&BootstrapReport {
                settings: ApiSettings::default(),
                existing_users: Some(2),
                created: None,
            })
            .unwrap();
        assert!(output.ends_with("true,120,2,,,\n"));
    }
}
