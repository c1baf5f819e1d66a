//! Glob patterns and file-tree matching.
//!
//! Patterns are matched against root-relative paths with `/` separators:
//! - `**/` matches any number of directories, including none
//! - `**`  matches any run of characters, across separators
//! - `*`   matches any run of non-separator characters
//! - `?`   matches exactly one non-separator character
//!
//! Everything else is literal. A leading `./` is ignored. The same syntax
//! filters fragment keys, where no separator ever appears.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use regex::Regex;
use walkdir::{DirEntry, WalkDir};

use crate::error::{io_err, CoreError};

/// Directory names never descended into during a walk.
const IGNORED_DIRS: &[&str] = &[".git", "node_modules", "target"];

/// Characters with regex meaning that must stay literal in a glob.
const ESCAPED: &str = ".+()[]{}^$|\\";

// ---------------------------------------------------------------------------
// Glob compilation
// ---------------------------------------------------------------------------

/// Translate one glob into an anchored regex, in a single pass.
fn glob_to_regex(glob: &str) -> String {
    let glob = glob.strip_prefix("./").unwrap_or(glob);
    let mut regex = String::with_capacity(glob.len() + 8);
    regex.push('^');

    let mut chars = glob.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '*' => {
                if chars.peek() == Some(&'*') {
                    chars.next();
                    if chars.peek() == Some(&'/') {
                        chars.next();
                        regex.push_str("(?:.*/)?");
                    } else {
                        regex.push_str(".*");
                    }
                } else {
                    regex.push_str("[^/]*");
                }
            }
            '?' => regex.push_str("[^/]"),
            c if ESCAPED.contains(c) => {
                regex.push('\\');
                regex.push(c);
            }
            c => regex.push(c),
        }
    }

    regex.push('$');
    regex
}

fn compile(pattern: &str) -> Result<Regex, CoreError> {
    Regex::new(&glob_to_regex(pattern)).map_err(|e| CoreError::Pattern {
        pattern: pattern.to_string(),
        source: e,
    })
}

/// A compiled group of globs; a candidate matches when any pattern does.
#[derive(Debug)]
pub struct PatternSet {
    patterns: Vec<Regex>,
}

impl PatternSet {
    /// Compile `patterns`, failing on the first invalid one.
    pub fn new(patterns: &[String]) -> Result<Self, CoreError> {
        let patterns = patterns
            .iter()
            .map(|p| compile(p))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { patterns })
    }

    /// True when `candidate` matches at least one pattern.
    pub fn matches(&self, candidate: &str) -> bool {
        self.patterns.iter().any(|re| re.is_match(candidate))
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tree matching
// ---------------------------------------------------------------------------

/// All files under `root` whose root-relative path matches any of `patterns`.
///
/// Results are absolute, deduplicated across overlapping patterns, and
/// sorted. Symlinks are not followed; ignored directories are never entered.
pub fn matching_files(root: &Path, patterns: &[String]) -> Result<Vec<PathBuf>, CoreError> {
    let set = PatternSet::new(patterns)?;
    let mut matched: BTreeSet<PathBuf> = BTreeSet::new();

    let walker = WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_ignored_dir(e));

    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(err) => {
                let path = err
                    .path()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| root.to_path_buf());
                return Err(match err.into_io_error() {
                    Some(source) => io_err(path, source),
                    None => io_err(path, std::io::Error::other("filesystem loop")),
                });
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let Ok(rel) = entry.path().strip_prefix(root) else {
            continue;
        };
        if set.matches(&slash_path(rel)) {
            matched.insert(rel.to_path_buf());
        }
    }

    Ok(matched.into_iter().map(|rel| root.join(rel)).collect())
}

fn is_ignored_dir(entry: &DirEntry) -> bool {
    entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .map(|name| IGNORED_DIRS.contains(&name))
            .unwrap_or(false)
}

/// Root-relative path with `/` separators regardless of platform.
fn slash_path(rel: &Path) -> String {
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn set(pattern: &str) -> PatternSet {
        PatternSet::new(&[pattern.to_string()]).expect("compile")
    }

    #[rstest]
    #[case("docs/*.md", "docs/a.md", true)]
    #[case("docs/*.md", "docs/sub/a.md", false)]
    #[case("docs/*.md", "docs/.md", true)]
    #[case("docs/**/*.md", "docs/a.md", true)]
    #[case("docs/**/*.md", "docs/sub/deep/a.md", true)]
    #[case("**/README.md", "README.md", true)]
    #[case("**/README.md", "pkg/a/README.md", true)]
    #[case("**", "any/depth/file.txt", true)]
    #[case("src/**", "src/lib.rs", true)]
    #[case("src/**", "src", false)]
    #[case("?.md", "a.md", true)]
    #[case("?.md", "ab.md", false)]
    #[case("?.md", "/.md", false)]
    #[case("./docs/*.md", "docs/a.md", true)]
    #[case("a.b", "axb", false)]
    #[case("notes(1)/*.txt", "notes(1)/x.txt", true)]
    fn glob_matching(#[case] pattern: &str, #[case] candidate: &str, #[case] expected: bool) {
        assert_eq!(
            set(pattern).matches(candidate),
            expected,
            "pattern '{pattern}' vs '{candidate}'"
        );
    }

    #[rstest]
    #[case("intro", "intro", true)]
    #[case("intro", "introduction", false)]
    #[case("usage-*", "usage-basic", true)]
    #[case("usage-*", "usage", false)]
    #[case("*", "anything", true)]
    fn anchor_key_matching(#[case] pattern: &str, #[case] key: &str, #[case] expected: bool) {
        assert_eq!(set(pattern).matches(key), expected);
    }

    #[test]
    fn empty_set_matches_nothing() {
        let set = PatternSet::new(&[]).expect("compile");
        assert!(set.is_empty());
        assert!(!set.matches("anything"));
    }

    #[test]
    fn metacharacters_in_globs_stay_literal() {
        assert!(set("notes+[draft]/why.txt").matches("notes+[draft]/why.txt"));
        assert!(!set("notes+[draft]/why.txt").matches("notes+d/why.txt"));
    }

    #[test]
    fn single_pass_translation_keeps_double_star_intact() {
        // `**/` must become one zero-or-more-directories group, not two
        // mangled single-segment stars.
        let regex = glob_to_regex("docs/**/*.md");
        assert_eq!(regex, "^docs/(?:.*/)?[^/]*\\.md$");
    }

    #[test]
    fn literal_dots_do_not_match_arbitrary_characters() {
        assert!(set("a.md").matches("a.md"));
        assert!(!set("a.md").matches("aXmd"));
    }
}
