//! File-system resource helpers.
use anyhow::{Context as _, Result};
use std::io::ErrorKind;
use std::path::Path;

/// Remove whatever occupies `path` without following symlinks.
///
/// Symlinks (including dangling ones) and regular files are unlinked; a real
/// directory is removed recursively. The target of a symlink is never
/// touched. Returns `false` when nothing was there.
///
/// # Errors
///
/// Returns an error if the path exists but cannot be inspected or removed.
pub fn remove_entry(path: &Path) -> Result<bool> {
    let meta = match std::fs::symlink_metadata(path) {
        Ok(meta) => meta,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(false),
        Err(e) => {
            return Err(e).with_context(|| format!("reading metadata: {}", path.display()));
        }
    };

    if meta.is_dir() {
        std::fs::remove_dir_all(path)
            .with_context(|| format!("removing directory: {}", path.display()))?;
    } else {
        std::fs::remove_file(path).with_context(|| format!("removing file: {}", path.display()))?;
    }
    Ok(true)
}
