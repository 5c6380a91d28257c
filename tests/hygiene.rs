//! Hygiene: scans production sources for patterns that hide failures.
//!
//! Every pattern has a budget. Parsing helpers legitimately turn a parse
//! error into `None`, so `.ok()` has a small one; everything else is zero.
//! A budget only ever goes down.

use std::fs;
use std::path::Path;

const MAX_UNWRAP: usize = 0;
const MAX_EXPECT: usize = 0;
const MAX_PANIC: usize = 0;
const MAX_UNREACHABLE: usize = 0;
const MAX_TODO: usize = 0;
const MAX_UNIMPLEMENTED: usize = 0;

const MAX_SILENT_DISCARD: usize = 0;
const MAX_DOT_OK: usize = 4;

const MAX_ALLOW_DEAD_CODE: usize = 0;

struct SourceFile {
    path: String,
    content: String,
}

/// Production `.rs` files under `src/`; sibling `*_test.rs` files are skipped.
fn source_files() -> Vec<SourceFile> {
    let mut files = Vec::new();
    collect_rs_files(Path::new("src"), &mut files);
    files
}

fn collect_rs_files(dir: &Path, out: &mut Vec<SourceFile>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect_rs_files(&path, out);
            continue;
        }
        let path_str = path.to_string_lossy().to_string();
        if !path_str.ends_with(".rs") || path_str.ends_with("_test.rs") {
            continue;
        }
        if let Ok(content) = fs::read_to_string(&path) {
            out.push(SourceFile { path: path_str, content });
        }
    }
}

/// Assert that `pattern` occurs on at most `max` lines across the sources.
fn within_budget(pattern: &str, max: usize) {
    let files = source_files();
    assert!(!files.is_empty(), "no sources found; run from the crate root");
    let hits: Vec<(String, usize)> = files
        .iter()
        .map(|f| (f.path.clone(), f.content.lines().filter(|l| l.contains(pattern)).count()))
        .filter(|(_, n)| *n > 0)
        .collect();
    let count: usize = hits.iter().map(|(_, n)| n).sum();
    let listing: Vec<String> = hits.iter().map(|(p, n)| format!("  {p}: {n}")).collect();
    assert!(count <= max, "`{pattern}` budget exceeded: found {count}, max {max}.\n{}", listing.join("\n"));
}

#[test]
fn unwrap_budget() {
    within_budget(".unwrap()", MAX_UNWRAP);
}

#[test]
fn expect_budget() {
    within_budget(".expect(", MAX_EXPECT);
}

#[test]
fn panic_budget() {
    within_budget("panic!(", MAX_PANIC);
}

#[test]
fn unreachable_budget() {
    within_budget("unreachable!(", MAX_UNREACHABLE);
}

#[test]
fn todo_budget() {
    within_budget("todo!(", MAX_TODO);
}

#[test]
fn unimplemented_budget() {
    within_budget("unimplemented!(", MAX_UNIMPLEMENTED);
}

#[test]
fn silent_discard_budget() {
    within_budget("let _ =", MAX_SILENT_DISCARD);
}

#[test]
fn dot_ok_budget() {
    within_budget(".ok()", MAX_DOT_OK);
}

#[test]
fn allow_dead_code_budget() {
    within_budget("#[allow(dead_code)]", MAX_ALLOW_DEAD_CODE);
}
