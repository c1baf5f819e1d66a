//! File-tree matching integration tests: determinism, depth rules, and
//! ignored directories.

use assert_fs::prelude::*;
use predicates::prelude::*;
use tether_core::pattern::matching_files;

fn strings(patterns: &[&str]) -> Vec<String> {
    patterns.iter().map(|p| p.to_string()).collect()
}

#[test]
fn matches_are_absolute_sorted_and_deduplicated() {
    let root = assert_fs::TempDir::new().expect("tempdir");
    root.child("docs/b.md").write_str("b").expect("write");
    root.child("docs/a.md").write_str("a").expect("write");
    root.child("docs/sub/c.md").write_str("c").expect("write");

    // Overlapping patterns both match docs/a.md and docs/b.md.
    let found = matching_files(root.path(), &strings(&["docs/*.md", "docs/**/*.md"]))
        .expect("matching_files");

    let expected = vec![
        root.path().join("docs/a.md"),
        root.path().join("docs/b.md"),
        root.path().join("docs/sub/c.md"),
    ];
    assert_eq!(found, expected);
}

#[test]
fn single_star_does_not_cross_directories() {
    let root = assert_fs::TempDir::new().expect("tempdir");
    root.child("docs/a.md").write_str("a").expect("write");
    root.child("docs/sub/b.md").write_str("b").expect("write");

    let found = matching_files(root.path(), &strings(&["docs/*.md"])).expect("matching_files");
    assert_eq!(found, vec![root.path().join("docs/a.md")]);
}

#[test]
fn double_star_matches_at_zero_depth() {
    let root = assert_fs::TempDir::new().expect("tempdir");
    root.child("docs/a.md").write_str("a").expect("write");
    root.child("docs/x/y/b.md").write_str("b").expect("write");

    let found =
        matching_files(root.path(), &strings(&["docs/**/*.md"])).expect("matching_files");
    assert_eq!(
        found,
        vec![root.path().join("docs/a.md"), root.path().join("docs/x/y/b.md")]
    );
}

#[test]
fn ignored_directories_are_never_entered() {
    let root = assert_fs::TempDir::new().expect("tempdir");
    root.child("keep/README.md").write_str("keep").expect("write");
    root.child("node_modules/pkg/README.md")
        .write_str("skip")
        .expect("write");
    root.child(".git/README.md").write_str("skip").expect("write");
    root.child("target/debug/README.md")
        .write_str("skip")
        .expect("write");

    let found =
        matching_files(root.path(), &strings(&["**/README.md"])).expect("matching_files");
    assert_eq!(found, vec![root.path().join("keep/README.md")]);
}

#[test]
fn directories_themselves_never_match() {
    let root = assert_fs::TempDir::new().expect("tempdir");
    root.child("docs.md/inner.txt").write_str("x").expect("write");
    root.child("real.md").write_str("x").expect("write");

    let found = matching_files(root.path(), &strings(&["*.md"])).expect("matching_files");
    assert_eq!(found, vec![root.path().join("real.md")]);
    root.child("docs.md").assert(predicate::path::is_dir());
}

#[test]
fn no_patterns_match_nothing() {
    let root = assert_fs::TempDir::new().expect("tempdir");
    root.child("a.md").write_str("a").expect("write");

    let found = matching_files(root.path(), &[]).expect("matching_files");
    assert!(found.is_empty());
}

#[test]
fn question_mark_is_exactly_one_character() {
    let root = assert_fs::TempDir::new().expect("tempdir");
    root.child("a.md").write_str("one").expect("write");
    root.child("ab.md").write_str("two").expect("write");

    let found = matching_files(root.path(), &strings(&["?.md"])).expect("matching_files");
    assert_eq!(found, vec![root.path().join("a.md")]);
}
