//! Target reconciliation: splice collected fragments into a target file.

use std::path::Path;

use tether_core::write::{write_if_changed, WriteStatus};

use crate::collect::CollectedFragments;
use crate::error::{io_err, PortalError};
use crate::marker::parse_fragments;

/// Rewrite the fragment regions of `target` from `collected`.
///
/// Every collected key must already have a marker pair in the target; the
/// engine never invents marker lines. Keys the target declares beyond the
/// collection keep their current content. Bytes outside content spans are
/// carried over verbatim, and the write is skipped when the result already
/// matches the file.
pub fn update_target(
    target: &Path,
    collected: &CollectedFragments,
    dry_run: bool,
) -> Result<WriteStatus, PortalError> {
    let text = std::fs::read_to_string(target).map_err(|e| io_err(target, e))?;
    let mut ranges = parse_fragments(&text, target)?;

    for key in collected.fragments.keys() {
        if !ranges.iter().any(|r| &r.key == key) {
            return Err(PortalError::MissingFragment {
                path: target.to_path_buf(),
                key: key.clone(),
            });
        }
    }

    ranges.sort_by_key(|r| r.start_marker.start);

    let mut output = String::with_capacity(text.len());
    let mut cursor = 0;
    for range in &ranges {
        let span = range.content_span();
        output.push_str(&text[cursor..span.start]);
        match collected.fragments.get(&range.key) {
            Some(content) => output.push_str(content),
            None => output.push_str(range.content(&text)),
        }
        cursor = span.end;
    }
    output.push_str(&text[cursor..]);

    Ok(write_if_changed(target, &output, dry_run)?)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
