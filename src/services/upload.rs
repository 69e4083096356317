//! Upload Staging
//!
//! Writes an uploaded file into the staging directory so the extractor can
//! read it from disk. The file is removed when the [`StagedUpload`] drops,
//! on success and failure alike.

use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::debug;

use crate::utils::error::{AppError, AppResult};
use crate::utils::paths::{ensure_dir, extension_of};

/// An upload living in a temporary file.
#[derive(Debug)]
pub struct StagedUpload {
    file: NamedTempFile,
    filename: String,
}

impl StagedUpload {
    /// Stage `bytes` under `dir`, keeping the original extension.
    ///
    /// Fails with `PayloadTooLarge` before touching the disk when the upload
    /// exceeds `max_bytes`.
    pub fn stage(dir: &Path, filename: &str, bytes: &[u8], max_bytes: u64) -> AppResult<Self> {
        let size = bytes.len() as u64;
        if size > max_bytes {
            return Err(AppError::PayloadTooLarge {
                size,
                limit: max_bytes,
            });
        }

        ensure_dir(dir)?;
        let suffix = extension_of(filename)
            .map(|ext| format!(".{}", ext))
            .unwrap_or_default();
        let mut file = tempfile::Builder::new()
            .prefix("upload-")
            .suffix(&suffix)
            .tempfile_in(dir)?;
        file.write_all(bytes)?;
        file.flush()?;

        debug!(filename, size, path = %file.path().display(), "staged upload");
        Ok(Self {
            file,
            filename: filename.to_string(),
        })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    pub fn path_buf(&self) -> PathBuf {
        self.file.path().to_path_buf()
    }

    /// Original client-side filename.
    pub fn filename(&self) -> &str {
        &self.filename
    }
}
