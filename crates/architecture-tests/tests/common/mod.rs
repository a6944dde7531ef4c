//! Source walking helpers shared by the architecture tests.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

/// Workspace root, two levels above this crate's manifest.
pub fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .ancestors()
        .nth(2)
        .expect("workspace root")
        .to_path_buf()
}

/// Every `.rs` file under `crates/<name>/<subdir>`, skipping build output.
pub fn rust_files(crate_name: &str, subdir: &str) -> Vec<PathBuf> {
    let dir = workspace_root().join("crates").join(crate_name).join(subdir);
    walkdir::WalkDir::new(dir)
        .into_iter()
        .filter_entry(|e| e.file_name() != "target")
        .filter_map(|e| e.ok())
        .filter(|e| e.path().extension().is_some_and(|ext| ext == "rs"))
        .map(|e| e.into_path())
        .collect()
}

/// Every `.rs` file under `crates/`.
pub fn all_rust_files() -> Vec<PathBuf> {
    walkdir::WalkDir::new(workspace_root().join("crates"))
        .into_iter()
        .filter_entry(|e| e.file_name() != "target")
        .filter_map(|e| e.ok())
        .filter(|e| e.path().extension().is_some_and(|ext| ext == "rs"))
        .map(|e| e.into_path())
        .collect()
}

/// Lines of `path` up to its first `#[cfg(test)]`, i.e. the non-test code.
pub fn production_lines(path: &Path) -> Vec<(usize, String)> {
    let content = fs::read_to_string(path).expect("readable source file");
    content
        .lines()
        .enumerate()
        .take_while(|(_, line)| line.trim() != "#[cfg(test)]")
        .map(|(i, line)| (i + 1, line.to_string()))
        .collect()
}

pub fn relative(path: &Path) -> String {
    path.strip_prefix(workspace_root())
        .unwrap_or(path)
        .to_string_lossy()
        .into_owned()
}
