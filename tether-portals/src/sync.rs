//! Portal sync orchestration.
//!
//! Entries run in declaration order; each entry collects once and then
//! updates every matched target. Failures stay inside the entry that caused
//! them: collection problems become error records against the entry's
//! declared target patterns, update problems become error records against
//! the one target that failed. An entry with no declared targets reports a
//! collection failure as a single record against its source.

use std::path::{Path, PathBuf};

use tether_core::pattern::matching_files;
use tether_core::types::{Config, PortalEntry, SyncOptions, SyncRecord, SyncStatus};
use tether_core::write::WriteStatus;

use crate::collect::{collect_fragments_at, CollectedFragments, DiscoveredFragment};
use crate::error::{io_err, PortalError};
use crate::update::update_target;

/// Sync every portal entry in `config`, resolving patterns against `root`.
///
/// Returns one record per (entry, matched target) pair, in declaration
/// order then sorted target order. This never fails as a whole; anything
/// that goes wrong is captured in the records.
pub fn sync_portals_at(root: &Path, config: &Config, opts: SyncOptions) -> Vec<SyncRecord> {
    let dry_run = opts.no_write();
    let mut records = Vec::new();

    for entry in &config.portals {
        match prepare_entry(root, entry) {
            Ok((collected, targets)) => {
                for target in targets {
                    let status = match update_target(&target, &collected, dry_run) {
                        Ok(write) => status_from_write(write),
                        Err(e) => SyncStatus::Error {
                            detail: e.to_string(),
                        },
                    };
                    records.push(SyncRecord {
                        source: entry.source.clone(),
                        target,
                        status,
                    });
                }
            }
            Err(e) => {
                // Collection failed; a failing entry always contributes at
                // least one record: one per declared target pattern, or one
                // against the source when the entry declares none.
                tracing::debug!("portal '{}' failed: {e}", entry.source);
                let detail = e.to_string();
                if entry.targets.is_empty() {
                    records.push(SyncRecord {
                        source: entry.source.clone(),
                        target: PathBuf::from(&entry.source),
                        status: SyncStatus::Error { detail },
                    });
                } else {
                    for pattern in &entry.targets {
                        records.push(SyncRecord {
                            source: entry.source.clone(),
                            target: PathBuf::from(pattern),
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

/// List every fragment occurrence declared by `config`'s portal entries.
pub fn discover_fragments_at(
    root: &Path,
    config: &Config,
) -> Result<Vec<DiscoveredFragment>, PortalError> {
    let mut found = Vec::new();
    for entry in &config.portals {
        let collected = collect_fragments_at(root, entry)?;
        found.extend(collected.discovered);
    }
    Ok(found)
}

/// `sync_portals_at` against the process working directory.
pub fn sync_portals(config: &Config, opts: SyncOptions) -> Result<Vec<SyncRecord>, PortalError> {
    let cwd = std::env::current_dir().map_err(|e| io_err(".", e))?;
    Ok(sync_portals_at(&cwd, config, opts))
}

/// `discover_fragments_at` against the process working directory.
pub fn discover_fragments(config: &Config) -> Result<Vec<DiscoveredFragment>, PortalError> {
    let cwd = std::env::current_dir().map_err(|e| io_err(".", e))?;
    discover_fragments_at(&cwd, config)
}

fn prepare_entry(
    root: &Path,
    entry: &PortalEntry,
) -> Result<(CollectedFragments, Vec<PathBuf>), PortalError> {
    let collected = collect_fragments_at(root, entry)?;
    let targets = matching_files(root, &entry.targets)?;
    Ok((collected, targets))
}

fn status_from_write(status: WriteStatus) -> SyncStatus {
    match status {
        WriteStatus::Written | WriteStatus::WouldWrite => SyncStatus::Updated,
        WriteStatus::Unchanged => SyncStatus::Unchanged,
    }
}
