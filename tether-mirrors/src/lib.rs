//! Whole-file mirroring for tether.
//!
//! A mirror entry copies every file matching its source to sibling files
//! named by its targets, through the same conditional writer the fragment
//! engine uses. A bare file name as the source (no separator, no glob
//! character) matches that name at any depth, so one entry can fan a
//! template out across a whole tree of packages.

use std::path::{Path, PathBuf};

use thiserror::Error;

use tether_core::pattern::matching_files;
use tether_core::types::{Config, MirrorEntry, SyncOptions, SyncRecord, SyncStatus};
use tether_core::write::{write_if_changed, WriteStatus};
use tether_core::CoreError;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors from mirror sync.
#[derive(Debug, Error)]
pub enum MirrorError {
    /// An error from pattern matching or the conditional writer.
    #[error("core error: {0}")]
    Core(#[from] CoreError),

    /// An I/O error, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience constructor for [`MirrorError::Io`].
fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> MirrorError {
    MirrorError::Io {
        path: path.into(),
        source,
    }
}

// ---------------------------------------------------------------------------
// Sync
// ---------------------------------------------------------------------------

/// Sync every mirror entry in `config`, resolving sources against `root`.
///
/// Returns one record per (matched source, declared target) pair. This
/// never fails as a whole; unresolvable patterns, unreadable sources, and
/// failed writes all surface as error records while everything else
/// proceeds. An entry with no declared targets reports a failure as a
/// single record against its source.
pub fn sync_mirrors_at(root: &Path, config: &Config, opts: SyncOptions) -> Vec<SyncRecord> {
    let dry_run = opts.no_write();
    let mut records = Vec::new();

    for entry in &config.mirrors {
        match matching_files(root, &[source_pattern(&entry.source)]) {
            Ok(sources) => {
                for source in sources {
                    records.extend(mirror_source(&source, entry, dry_run));
                }
            }
            Err(e) => {
                tracing::debug!("mirror '{}' failed: {e}", entry.source);
                let detail = MirrorError::from(e).to_string();
                if entry.targets.is_empty() {
                    records.push(SyncRecord {
                        source: entry.source.clone(),
                        target: PathBuf::from(&entry.source),
                        status: SyncStatus::Error { detail },
                    });
                } else {
                    for target in &entry.targets {
                        records.push(SyncRecord {
                            source: entry.source.clone(),
                            target: PathBuf::from(target),
                            status: SyncStatus::Error {
                                detail: detail.clone(),
                            },
                        });
                    }
                }
            }
        }
    }

    records
}

/// `sync_mirrors_at` against the process working directory.
pub fn sync_mirrors(config: &Config, opts: SyncOptions) -> Result<Vec<SyncRecord>, MirrorError> {
    let cwd = std::env::current_dir().map_err(|e| io_err(".", e))?;
    Ok(sync_mirrors_at(&cwd, config, opts))
}

/// Copy one source file to each of its entry's sibling targets.
fn mirror_source(source: &Path, entry: &MirrorEntry, dry_run: bool) -> Vec<SyncRecord> {
    let mut records = Vec::new();

    let content = match std::fs::read_to_string(source) {
        Ok(content) => content,
        Err(e) => {
            // The source is gone or unreadable; every declared target gets
            // the failure. With no declared targets the record lands on the
            // source itself.
            let detail = io_err(source, e).to_string();
            if entry.targets.is_empty() {
                records.push(SyncRecord {
                    source: entry.source.clone(),
                    target: source.to_path_buf(),
                    status: SyncStatus::Error { detail },
                });
            } else {
                for target in &entry.targets {
                    records.push(SyncRecord {
                        source: entry.source.clone(),
                        target: sibling(source, target),
                        status: SyncStatus::Error {
                            detail: detail.clone(),
                        },
                    });
                }
            }
            return records;
        }
    };

    for target in &entry.targets {
        let target_path = sibling(source, target);
        let status = match write_if_changed(&target_path, &content, dry_run) {
            Ok(WriteStatus::Written | WriteStatus::WouldWrite) => SyncStatus::Updated,
            Ok(WriteStatus::Unchanged) => SyncStatus::Unchanged,
            Err(e) => SyncStatus::Error {
                detail: MirrorError::from(e).to_string(),
            },
        };
        records.push(SyncRecord {
            source: entry.source.clone(),
            target: target_path,
            status,
        });
    }

    records
}

/// Bare file names match at any depth; anything with a separator or glob
/// character is already a pattern.
fn source_pattern(source: &str) -> String {
    let bare = !source.contains(|c: char| matches!(c, '/' | '*' | '?'));
    if bare {
        format!("**/{source}")
    } else {
        source.to_string()
    }
}

/// `target` resolved against `source`'s directory.
fn sibling(source: &Path, target: &str) -> PathBuf {
    match source.parent() {
        Some(dir) => dir.join(target),
        None => PathBuf::from(target),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
