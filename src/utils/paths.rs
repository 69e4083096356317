//! Path Utilities
//!
//! Resolution of the staging directory used for uploaded files.

use std::path::{Path, PathBuf};

use crate::utils::error::AppResult;

/// Default staging directory (`<system temp>/summarist`)
pub fn default_tmp_dir() -> PathBuf {
    std::env::temp_dir().join("summarist")
}

/// Ensure a directory exists, creating it if necessary
pub fn ensure_dir(path: &Path) -> AppResult<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}

/// Lowercased extension of a file name, without the dot.
pub fn extension_of(filename: &str) -> Option<String> {
    Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
}
