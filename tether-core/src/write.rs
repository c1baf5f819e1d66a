//! Conditional atomic file writes.
//!
//! ## Write flow
//!
//! 1. Read the current target content (a missing file compares unequal).
//! 2. Compare byte-for-byte with the desired content → skip if identical.
//! 3. Dry-run: stop here and report.
//! 4. Create the parent directory, write to `<path>.tether.tmp`.
//! 5. Rename onto the final path (atomic on POSIX); remove the `.tmp` if
//!    the rename fails.
//!
//! Content goes to disk exactly as given. No line-ending normalization:
//! bytes the caller did not produce must survive a rewrite untouched.

use std::path::{Path, PathBuf};

use crate::error::{io_err, CoreError};

/// Outcome of an individual conditional write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteStatus {
    /// File was written (content changed or did not previously exist).
    Written,
    /// File already holds the desired content.
    Unchanged,
    /// Dry-run mode: the file *would* have been written.
    WouldWrite,
}

/// True when `path` exists and holds exactly `content`.
pub fn file_equals(path: &Path, content: &str) -> Result<bool, CoreError> {
    match std::fs::read_to_string(path) {
        Ok(existing) => Ok(existing == content),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(io_err(path, e)),
    }
}

/// Write `content` to `path` unless the file already matches.
pub fn write_if_changed(
    path: &Path,
    content: &str,
    dry_run: bool,
) -> Result<WriteStatus, CoreError> {
    let tmp = PathBuf::from(format!("{}.tether.tmp", path.display()));
    write_with_tmp(path, content, dry_run, &tmp)
}

fn write_with_tmp(
    path: &Path,
    content: &str,
    dry_run: bool,
    tmp: &Path,
) -> Result<WriteStatus, CoreError> {
    if file_equals(path, content)? {
        tracing::debug!("unchanged: {}", path.display());
        return Ok(WriteStatus::Unchanged);
    }

    if dry_run {
        tracing::info!("[dry-run] would write: {}", path.display());
        return Ok(WriteStatus::WouldWrite);
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| io_err(parent, e))?;
    }
    if let Some(tmp_parent) = tmp.parent() {
        std::fs::create_dir_all(tmp_parent).map_err(|e| io_err(tmp_parent, e))?;
    }

    std::fs::write(tmp, content).map_err(|e| io_err(tmp, e))?;
    if let Err(e) = std::fs::rename(tmp, path) {
        let _ = std::fs::remove_file(tmp);
        return Err(io_err(path, e));
    }

    tracing::info!("wrote: {}", path.display());
    Ok(WriteStatus::Written)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
