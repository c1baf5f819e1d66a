//! Subcommand implementations.

pub mod list;
pub mod sync;

use std::path::Path;

/// `path` relative to `base` when possible; keeps output lines short.
pub(crate) fn rel(base: &Path, path: &Path) -> String {
    path.strip_prefix(base).unwrap_or(path).display().to_string()
}
