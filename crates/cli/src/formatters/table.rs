//! Human-readable table output.

use anyhow::Result;
use keygate_client::{ApiSettings, Credential};

use super::common::{format_last_used, format_rate, yes_no};
use super::{BootstrapReport, Formatter, IssuedToken};

pub struct TableFormatter;

const HEADERS: [&str; 5] = ["ID", "NAME", "ENABLED", "RATE/MIN", "LAST USED"];

impl Formatter for TableFormatter {
    fn format_credentials(&self, credentials: &[Credential]) -> Result<String> {
        if credentials.is_empty() {
            return Ok("No API users found.\n".to_string());
        }

        let rows: Vec<[String; 5]> = credentials
            .iter()
            .map(|c| {
                [
                    c.id.to_string(),
                    c.name.clone(),
                    yes_no(c.enabled).to_string(),
                    format_rate(c.rate_limit_per_minute),
                    format_last_used(c.last_used_at.as_ref()),
                ]
            })
            .collect();

        let mut widths = HEADERS.map(str::len);
        for row in &rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let mut output = String::new();
        push_row(&mut output, &HEADERS.map(str::to_string), &widths);
        push_row(
            &mut output,
            &widths.map(|w| "=".repeat(w)),
            &widths,
        );
        for row in &rows {
            push_row(&mut output, row, &widths);
        }
        Ok(output)
    }

    fn format_settings(&self, settings: &ApiSettings) -> Result<String> {
        Ok(format!(
            "Token only:          {}\nDefault rate limit:  {}/min\n",
            yes_no(settings.token_only),
            settings.default_rate_limit_per_minute
        ))
    }

    fn format_issued_token(&self, issued: &IssuedToken<'_>) -> Result<String> {
        let mut output = String::new();
        match (issued.name, issued.id) {
            (Some(name), Some(id)) => output.push_str(&format!("API user: {name} (id {id})\n")),
            (None, Some(id)) => output.push_str(&format!("API user: id {id}\n")),
            (Some(name), None) => output.push_str(&format!("API user: {name}\n")),
            (None, None) => {}
        }
        output.push_str(&format!(
            "Token (store securely, shown once): {}\n",
            issued.token
        ));
        Ok(output)
    }

    fn format_bootstrap(&self, report: &BootstrapReport<'_>) -> Result<String> {
        let mut output = self.format_settings(&report.settings)?;
        if let Some(count) = report.existing_users {
            output.push_str(&format!(
                "API users already present ({count}); bootstrap user not created.\n"
            ));
        }
        if let Some(issued) = &report.created {
            output.push('\n');
            output.push_str(&self.format_issued_token(issued)?);
        }
        Ok(output)
    }
}

fn push_row(output: &mut String, cells: &[String; 5], widths: &[usize; 5]) {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect();
    output.push_str(line.join("  ").trim_end());
    output.push('\n');
}
