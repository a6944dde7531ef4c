//! Architecture tests for file size limits.
//!
//! Files over 700 lines of code get a warning; over 1000 they fail.
//! Blank lines and `//` comments are not counted.

mod common;

use std::fs;
use std::path::Path;

use common::{all_rust_files, relative};

const WARNING_THRESHOLD: usize = 700;
const FAILURE_THRESHOLD: usize = 1000;

/// (path suffix, justification)
const EXCLUDED_FILES: &[(&str, &str)] = &[];

fn count_loc(path: &Path) -> usize {
    fs::read_to_string(path)
        .expect("Failed to read file")
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with("//"))
        .count()
}

#[test]
fn file_size_limits() {
    let files = all_rust_files();
    assert!(!files.is_empty(), "no Rust files found under crates/");

    let mut failures = Vec::new();
    for path in &files {
        let loc = count_loc(path);
        let rel = relative(path);
        let excluded = EXCLUDED_FILES.iter().any(|(suffix, _)| rel.ends_with(suffix));

        if loc > FAILURE_THRESHOLD && !excluded {
            failures.push(format!("  - {rel}: {loc} lines"));
        } else if loc > WARNING_THRESHOLD {
            eprintln!("[architecture] {rel}: {loc} LOC exceeds {WARNING_THRESHOLD}");
        }
    }

    assert!(
        failures.is_empty(),
        "Files exceeding {FAILURE_THRESHOLD} LOC (presumed mis-scoped):\n{}",
        failures.join("\n")
    );
    eprintln!("[architecture] Checked {} Rust files for size limits.", files.len());
}

#[test]
fn count_loc_skips_comments_and_blanks() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("sample.rs");
    fs::write(&file, "//! doc\n\nfn main() {\n    // note\n    let x = 1; // trailing\n}\n")
        .unwrap();
    assert_eq!(count_loc(&file), 3);
}
