//! Cross-file fragment collection.
//!
//! One portal entry's source pattern may match many files; their fragments
//! fold into a single key → content map. Source files are visited in sorted
//! path order, so conflict reports and discovery listings are reproducible.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tether_core::pattern::{matching_files, PatternSet};
use tether_core::types::PortalEntry;

use crate::error::{io_err, PortalError};
use crate::marker::parse_fragments;

/// Where a fragment key was found during collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredFragment {
    pub key: String,
    pub source: PathBuf,
}

/// Fragments gathered from every file matching one portal entry's source.
#[derive(Debug, Default)]
pub struct CollectedFragments {
    /// Key → content. The first contributing file establishes the content;
    /// later files must agree byte-for-byte.
    pub fragments: BTreeMap<String, String>,
    /// Every occurrence, in file-then-document order.
    pub discovered: Vec<DiscoveredFragment>,
}

/// Collect fragments for one portal entry, resolving its source against `root`.
///
/// Anchor patterns filter keys before anything else, so an anchored-out key
/// can neither conflict nor show up in discovery. A key redefined with
/// different content fails the whole collection with [`PortalError::Conflict`]
/// naming every contributing file.
pub fn collect_fragments_at(
    root: &Path,
    entry: &PortalEntry,
) -> Result<CollectedFragments, PortalError> {
    let anchors = PatternSet::new(&entry.anchors)?;
    let sources = matching_files(root, std::slice::from_ref(&entry.source))?;

    let mut collected = CollectedFragments::default();
    let mut sources_by_key: BTreeMap<String, Vec<PathBuf>> = BTreeMap::new();

    for file in sources {
        let text = std::fs::read_to_string(&file).map_err(|e| io_err(&file, e))?;
        for range in parse_fragments(&text, &file)? {
            if !anchors.is_empty() && !anchors.matches(&range.key) {
                continue;
            }

            let content = range.content(&text);
            let conflicts = collected
                .fragments
                .get(&range.key)
                .is_some_and(|existing| existing != content);
            if conflicts {
                let mut files = sources_by_key.remove(&range.key).unwrap_or_default();
                files.push(file.clone());
                return Err(PortalError::Conflict {
                    key: range.key,
                    files,
                });
            }
            collected
                .fragments
                .entry(range.key.clone())
                .or_insert_with(|| content.to_string());

            sources_by_key
                .entry(range.key.clone())
                .or_default()
                .push(file.clone());
            collected.discovered.push(DiscoveredFragment {
                key: range.key,
                source: file.clone(),
            });
        }
    }

    tracing::debug!(
        "collected {} fragment(s) from '{}'",
        collected.fragments.len(),
        entry.source
    );
    Ok(collected)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    fn entry(source: &str, anchors: &[&str]) -> PortalEntry {
        PortalEntry {
            source: source.to_string(),
            anchors: anchors.iter().map(|a| a.to_string()).collect(),
            targets: vec![],
        }
    }

    fn write(root: &Path, rel: &str, content: &str) -> PathBuf {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("mkdir");
        }
        fs::write(&path, content).expect("write");
        path
    }

    #[test]
    fn merges_fragments_across_files() {
        let root = TempDir::new().expect("tempdir");
        write(
            root.path(),
            "docs/a.md",
            "portal:one:start\nfirst\nportal:one:end\n",
        );
        write(
            root.path(),
            "docs/b.md",
            "portal:two:start\nsecond\nportal:two:end\n",
        );

        let collected =
            collect_fragments_at(root.path(), &entry("docs/*.md", &[])).expect("collect");
        assert_eq!(collected.fragments.len(), 2);
        assert_eq!(collected.fragments["one"], "first\n");
        assert_eq!(collected.fragments["two"], "second\n");
    }

    #[test]
    fn identical_content_from_two_files_is_not_a_conflict() {
        let root = TempDir::new().expect("tempdir");
        let a = write(
            root.path(),
            "a.md",
            "portal:shared:start\nsame\nportal:shared:end\n",
        );
        let b = write(
            root.path(),
            "b.md",
            "portal:shared:start\nsame\nportal:shared:end\n",
        );

        let collected = collect_fragments_at(root.path(), &entry("*.md", &[])).expect("collect");
        assert_eq!(collected.fragments.len(), 1);
        let sources: Vec<_> = collected.discovered.iter().map(|d| d.source.clone()).collect();
        assert_eq!(sources, vec![a, b]);
    }

    #[test]
    fn conflicting_content_names_files_in_discovery_order() {
        let root = TempDir::new().expect("tempdir");
        let a = write(
            root.path(),
            "a.md",
            "portal:clash:start\nalpha\nportal:clash:end\n",
        );
        let b = write(
            root.path(),
            "b.md",
            "portal:clash:start\nbeta\nportal:clash:end\n",
        );

        let err = collect_fragments_at(root.path(), &entry("*.md", &[])).unwrap_err();
        match err {
            PortalError::Conflict { key, files } => {
                assert_eq!(key, "clash");
                assert_eq!(files, vec![a, b]);
            }
            other => panic!("expected conflict, got: {other}"),
        }
    }

    #[test]
    fn anchors_filter_keys_before_anything_else() {
        let root = TempDir::new().expect("tempdir");
        write(
            root.path(),
            "a.md",
            "portal:intro:start\nkeep\nportal:intro:end\n\
             portal:extra:start\ndrop\nportal:extra:end\n",
        );

        let collected =
            collect_fragments_at(root.path(), &entry("a.md", &["intro"])).expect("collect");
        assert_eq!(collected.fragments.len(), 1);
        assert!(collected.fragments.contains_key("intro"));
        assert_eq!(collected.discovered.len(), 1);
    }

    #[test]
    fn anchored_out_keys_cannot_conflict() {
        let root = TempDir::new().expect("tempdir");
        write(
            root.path(),
            "a.md",
            "portal:noise:start\nalpha\nportal:noise:end\n",
        );
        write(
            root.path(),
            "b.md",
            "portal:noise:start\nbeta\nportal:noise:end\n",
        );

        let collected =
            collect_fragments_at(root.path(), &entry("*.md", &["intro"])).expect("collect");
        assert!(collected.fragments.is_empty());
        assert!(collected.discovered.is_empty());
    }

    #[test]
    fn anchor_wildcards_match_key_families() {
        let root = TempDir::new().expect("tempdir");
        write(
            root.path(),
            "a.md",
            "portal:usage-basic:start\n1\nportal:usage-basic:end\n\
             portal:usage-advanced:start\n2\nportal:usage-advanced:end\n\
             portal:internals:start\n3\nportal:internals:end\n",
        );

        let collected =
            collect_fragments_at(root.path(), &entry("a.md", &["usage-*"])).expect("collect");
        let keys: Vec<_> = collected.fragments.keys().cloned().collect();
        assert_eq!(keys, vec!["usage-advanced", "usage-basic"]);
    }

    #[test]
    fn parse_errors_fail_the_collection() {
        let root = TempDir::new().expect("tempdir");
        write(root.path(), "a.md", "portal:open:start\nnever closed\n");

        let err = collect_fragments_at(root.path(), &entry("a.md", &[])).unwrap_err();
        assert!(
            matches!(err, PortalError::UnterminatedFragment { .. }),
            "got: {err}"
        );
    }

    #[test]
    fn no_matching_sources_is_an_empty_collection() {
        let root = TempDir::new().expect("tempdir");
        let collected =
            collect_fragments_at(root.path(), &entry("missing/*.md", &[])).expect("collect");
        assert!(collected.fragments.is_empty());
        assert!(collected.discovered.is_empty());
    }
}
