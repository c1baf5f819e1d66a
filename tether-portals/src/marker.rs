//! Fragment marker scanning.
//!
//! A marker is a line containing `portal:KEY:start` or `portal:KEY:end`
//! anywhere on it, with `KEY` in `[a-z0-9-]+`. Surrounding comment
//! decoration is allowed; the whole line belongs to the marker. A
//! fragment's content runs from the byte after the start marker's line
//! break up to the first byte of the end marker's line, so marker lines
//! never leak into content and untouched spans round-trip exactly.

use std::collections::HashSet;
use std::ops::Range;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::PortalError;

/// Matches one marker per line; capture 1 is the key, capture 2 the kind.
static MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"portal:([a-z0-9-]+):(start|end)").expect("valid marker regex"));

// ---------------------------------------------------------------------------
// Fragment ranges
// ---------------------------------------------------------------------------

/// One marked fragment inside one file, as byte offsets into its text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FragmentRange {
    pub key: String,
    /// Byte span of the start marker's line, including its line break.
    pub start_marker: Range<usize>,
    /// Byte span of the end marker's line, including its line break.
    pub end_marker: Range<usize>,
}

impl FragmentRange {
    /// Content span: everything strictly between the two marker lines.
    pub fn content_span(&self) -> Range<usize> {
        self.start_marker.end..self.end_marker.start
    }

    /// The fragment body within `text`.
    pub fn content<'t>(&self, text: &'t str) -> &'t str {
        &text[self.content_span()]
    }
}

struct OpenFragment {
    key: String,
    marker: Range<usize>,
}

// ---------------------------------------------------------------------------
// Parser
// ---------------------------------------------------------------------------

/// Scan `text` for marker lines and return fragments in document order.
///
/// `path` only labels errors; no I/O happens here. Structural problems
/// (nesting, duplicate keys, unmatched or mismatched ends) fail the whole
/// scan rather than being silently repaired.
pub fn parse_fragments(text: &str, path: &Path) -> Result<Vec<FragmentRange>, PortalError> {
    let mut ranges = Vec::new();
    let mut open: Option<OpenFragment> = None;
    let mut closed: HashSet<String> = HashSet::new();

    let mut line_start = 0;
    while line_start < text.len() {
        let line_end = text[line_start..]
            .find('\n')
            .map(|i| line_start + i + 1)
            .unwrap_or(text.len());
        let line = &text[line_start..line_end];

        if let Some(caps) = MARKER.captures(line) {
            let key = &caps[1];
            if &caps[2] == "start" {
                if open.is_some() {
                    return Err(PortalError::NestedFragment {
                        path: path.to_path_buf(),
                        key: key.to_string(),
                    });
                }
                if closed.contains(key) {
                    return Err(PortalError::DuplicateKey {
                        path: path.to_path_buf(),
                        key: key.to_string(),
                    });
                }
                open = Some(OpenFragment {
                    key: key.to_string(),
                    marker: line_start..line_end,
                });
            } else {
                match open.take() {
                    None => {
                        return Err(PortalError::DanglingEnd {
                            path: path.to_path_buf(),
                            key: key.to_string(),
                        });
                    }
                    Some(active) if active.key != key => {
                        return Err(PortalError::MismatchedEnd {
                            path: path.to_path_buf(),
                            expected: active.key,
                            found: key.to_string(),
                        });
                    }
                    Some(active) => {
                        closed.insert(active.key.clone());
                        ranges.push(FragmentRange {
                            key: active.key,
                            start_marker: active.marker,
                            end_marker: line_start..line_end,
                        });
                    }
                }
            }
        }

        line_start = line_end;
    }

    if let Some(active) = open {
        return Err(PortalError::UnterminatedFragment {
            path: path.to_path_buf(),
            key: active.key,
        });
    }

    Ok(ranges)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
