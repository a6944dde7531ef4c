//! Helpers shared by the formatters.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};

use super::OutputFormat;

/// Shown for a user that never made a request.
pub const NEVER_USED: &str = "never";

pub fn format_last_used(last_used: Option<&DateTime<Utc>>) -> String {
    last_used
        .map(|t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| NEVER_USED.to_string())
}

/// Table/CSV rendering of a per-user rate; 0 defers to the panel default.
pub fn format_rate(rate: u32) -> String {
    if rate == 0 {
        "default".to_string()
    } else {
        rate.to_string()
    }
}

pub fn yes_no(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}

/// Escape a string value for CSV output.
pub fn escape_csv(s: &str) -> String {
    let needs_quoting = s.contains(',') || s.contains('"') || s.contains('\n') || s.contains('\r');
    if !needs_quoting {
        return s.to_string();
    }
    format!("\"{}\"", s.replace('"', "\"\""))
}

pub fn build_csv_row(values: &[String]) -> String {
    let escaped: Vec<String> = values.iter().map(|v| escape_csv(v)).collect();
    format!("{}\n", escaped.join(","))
}

/// Print `output` or write it to `output_file`.
pub fn output_result(
    output: &str,
    format: OutputFormat,
    output_file: Option<&std::path::PathBuf>,
) -> Result<()> {
    if let Some(path) = output_file {
        write_to_file(output, path)
            .with_context(|| format!("Failed to write output to {}", path.display()))?;
        eprintln!(
            "Results written to {} ({:?} format)",
            path.display(),
            format
        );
    } else {
        print!("{}", output);
    }
    Ok(())
}

/// Write `content` atomically: temp file in the target directory, then rename.
pub fn write_to_file(content: &str, path: &std::path::Path) -> Result<()> {
    use std::fs;
    use std::io::Write;
    use tempfile::NamedTempFile;

    let parent_dir = path.parent().unwrap_or_else(|| std::path::Path::new("."));

    if !parent_dir.as_os_str().is_empty() && parent_dir != std::path::Path::new(".") {
        fs::create_dir_all(parent_dir)
            .with_context(|| format!("Failed to create directory: {}", parent_dir.display()))?;
    }

    let mut temp_file = if parent_dir.as_os_str().is_empty() {
        NamedTempFile::new_in(".")
    } else {
        NamedTempFile::new_in(parent_dir)
    }
    .with_context(|| format!("Failed to create temp file in: {}", parent_dir.display()))?;

    temp_file
        .write_all(content.as_bytes())
        .context("Failed to write to temp file")?;
    temp_file.flush().context("Failed to flush temp file")?;

    temp_file
        .persist(path)
        .with_context(|| format!("Failed to write file: {}", path.display()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_escape_csv() {
        assert_eq!(escape_csv("svc-bot"), "svc-bot");
        assert_eq!(escape_csv("a,b"), "\"a,b\"");
        assert_eq!(escape_csv("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn test_format_last_used() {
        let t = Utc.with_ymd_and_hms(2026, 3, 1, 12, 30, 0).unwrap();
        assert_eq!(format_last_used(Some(&t)), "2026-03-01 12:30:00 UTC");
        assert_eq!(format_last_used(None), "never");
    }

    #[test]
    fn test_format_rate_zero_is_default() {
        assert_eq!(format_rate(0), "default");
        assert_eq!(format_rate(60), "60");
    }

    #[test]
    fn test_write_to_file_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/out/users.json");
        write_to_file("[]", &path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "[]");
    }
}
