//! Test discovery
//!
//! A test case is any regular file directly inside the test directory whose
//! extension is `<source_ext>`. Its identifier is the file name with that
//! extension removed. Identifiers are kept as `OsString` so names that are
//! not valid UTF-8 are still cases.

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use crate::error::HarnessError;

/// List test-case identifiers in `dir`, sorted and deduplicated.
///
/// `source_ext` is given without the leading dot. Subdirectories are not
/// descended into.
pub fn discover(dir: &Path, source_ext: &str) -> Result<Vec<OsString>, HarnessError> {
    let ext = OsStr::new(source_ext);
    let mut ids = Vec::new();

    let entries = std::fs::read_dir(dir).map_err(|e| HarnessError::directory(dir, e))?;
    for entry in entries {
        let entry = entry.map_err(|e| HarnessError::directory(dir, e))?;
        let path = entry.path();

        // A bare `.fth` is a hidden name with no extension, so it never matches.
        if path.extension() != Some(ext) || !path.is_file() {
            continue;
        }
        let Some(id) = path.file_stem() else {
            continue;
        };

        tracing::trace!(id = %id.to_string_lossy(), "discovered test case");
        ids.push(id.to_os_string());
    }

    ids.sort();
    ids.dedup();
    tracing::debug!(dir = %dir.display(), count = ids.len(), "discovery finished");
    Ok(ids)
}

/// `<dir>/<id>.<ext>`, built without assuming `id` is UTF-8 or dot-free
pub fn case_path(dir: &Path, id: &OsStr, ext: &str) -> PathBuf {
    let mut name = id.to_os_string();
    name.push(".");
    name.push(ext);
    dir.join(name)
}
