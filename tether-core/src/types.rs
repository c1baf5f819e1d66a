//! Domain types for the tether config and sync results.
//!
//! All path fields use `PathBuf`; never `&str` or `String` for filesystem paths.
//! Config types deserialize from `tether.config.json` via serde + serde_json.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Config entries
// ---------------------------------------------------------------------------

/// A whole-file mirror declaration.
///
/// Every file matching `source` is copied to sibling files named by
/// `targets`, resolved against the matched file's own directory. A bare
/// file name as the source matches at any depth of the tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MirrorEntry {
    pub source: String,
    pub targets: Vec<String>,
}

/// A fragment portal declaration.
///
/// Fragments are collected from files matching `source` and spliced into
/// the marked regions of files matching `targets`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortalEntry {
    pub source: String,
    /// Key filters. When non-empty, a fragment is collected only if its key
    /// matches at least one of these glob patterns.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub anchors: Vec<String>,
    pub targets: Vec<String>,
}

/// Root of `tether.config.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub mirrors: Vec<MirrorEntry>,
    #[serde(default)]
    pub portals: Vec<PortalEntry>,
}

// ---------------------------------------------------------------------------
// Sync options and results
// ---------------------------------------------------------------------------

/// Flags shared by every sync engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SyncOptions {
    /// Report what would change without writing anything.
    pub dry_run: bool,
    /// Like `dry_run`, but callers treat pending changes as a failure.
    pub check: bool,
}

impl SyncOptions {
    /// True when no file may be written.
    pub fn no_write(&self) -> bool {
        self.dry_run || self.check
    }
}

/// Per-target outcome of one sync operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncStatus {
    /// Target was rewritten (or would be, under dry-run/check).
    Updated,
    /// Target already holds the desired content.
    Unchanged,
    /// This target failed; other targets are unaffected.
    Error { detail: String },
}

impl fmt::Display for SyncStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncStatus::Updated => write!(f, "updated"),
            SyncStatus::Unchanged => write!(f, "unchanged"),
            SyncStatus::Error { detail } => write!(f, "error: {detail}"),
        }
    }
}

/// One `(source, target)` outcome produced by a sync engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncRecord {
    /// The declared source pattern of the originating entry.
    pub source: String,
    /// Absolute target path, or the declared pattern when it never resolved.
    pub target: PathBuf,
    pub status: SyncStatus,
}

impl SyncRecord {
    pub fn is_error(&self) -> bool {
        matches!(self.status, SyncStatus::Error { .. })
    }

    pub fn is_updated(&self) -> bool {
        matches!(self.status, SyncStatus::Updated)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
