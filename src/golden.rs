//! Golden file storage
//!
//! The golden record for case `id` lives at `<dir>/<id>.<golden_ext>` and is
//! raw bytes with no framing.

use std::ffi::OsStr;
use std::path::PathBuf;
use crate::discovery::case_path;
use crate::error::HarnessError;

/// Reads and (in override mode) rewrites golden files in one directory
#[derive(Debug, Clone)]
pub struct GoldenStore {
    dir: PathBuf,
    ext: String,
}

impl GoldenStore {
    pub fn new(dir: impl Into<PathBuf>, ext: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            ext: ext.into(),
        }
    }

    /// Path of the golden file for a case
    pub fn path(&self, id: &OsStr) -> PathBuf {
        case_path(&self.dir, id, &self.ext)
    }

    /// Load the golden record for `id`.
    ///
    /// `Ok(None)` means there is no golden file, which is different from an
    /// empty one. A golden path that is not a regular file counts as absent.
    pub fn load(&self, id: &OsStr) -> Result<Option<Vec<u8>>, HarnessError> {
        let path = self.path(id);
        if !path.is_file() {
            tracing::debug!(id = %id.to_string_lossy(), path = %path.display(), "no golden file");
            return Ok(None);
        }
        let bytes = std::fs::read(&path).map_err(|e| HarnessError::golden_read(&path, e))?;
        Ok(Some(bytes))
    }

    /// Create or truncate the golden file for `id` and write exactly `bytes`.
    /// Prior content is not kept.
    pub fn store(&self, id: &OsStr, bytes: &[u8]) -> Result<(), HarnessError> {
        let path = self.path(id);
        std::fs::write(&path, bytes).map_err(|e| HarnessError::golden_write(&path, e))?;
        tracing::debug!(id = %id.to_string_lossy(), path = %path.display(), bytes = bytes.len(), "golden file written");
        Ok(())
    }
}
