//! Error types for tether-portals.

use std::path::PathBuf;

use thiserror::Error;

use tether_core::CoreError;

/// All errors that can arise from fragment parsing, collection, and updates.
#[derive(Debug, Error)]
pub enum PortalError {
    /// A start marker opened while another fragment was still open.
    #[error("nested fragment start for key '{key}' in {path}")]
    NestedFragment { path: PathBuf, key: String },

    /// A second start marker for a key already closed in the same file.
    #[error("fragment key '{key}' appears multiple times in {path}")]
    DuplicateKey { path: PathBuf, key: String },

    /// An end marker with no open fragment.
    #[error("fragment end without start for key '{key}' in {path}")]
    DanglingEnd { path: PathBuf, key: String },

    /// An end marker whose key differs from the open fragment's key.
    #[error("fragment end '{found}' does not match start '{expected}' in {path}")]
    MismatchedEnd {
        path: PathBuf,
        expected: String,
        found: String,
    },

    /// The scan ended with a fragment still open.
    #[error("fragment start without end for key '{key}' in {path}")]
    UnterminatedFragment { path: PathBuf, key: String },

    /// The same key resolved to different content in different source files.
    #[error("fragment key '{key}' has conflicting content in {}", display_files(.files))]
    Conflict { key: String, files: Vec<PathBuf> },

    /// A collected key has no marker pair in the target file.
    #[error("missing fragment '{key}' in {path}")]
    MissingFragment { path: PathBuf, key: String },

    /// An I/O error, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An error from pattern matching, config, or the conditional writer.
    #[error("core error: {0}")]
    Core(#[from] CoreError),
}

/// Convenience constructor for [`PortalError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> PortalError {
    PortalError::Io {
        path: path.into(),
        source,
    }
}

/// Comma-separated file list for [`PortalError::Conflict`], in discovery order.
fn display_files(files: &[PathBuf]) -> String {
    files
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
