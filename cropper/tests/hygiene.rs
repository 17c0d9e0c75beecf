//! Hygiene — source budgets for the cropper crate.
//!
//! Scans production sources under `src/` (test files excluded) for patterns
//! that crash the host page or drop errors on the floor. Budgets only ratchet
//! down.

use std::fs;
use std::path::Path;

/// `(pattern, budget, reason)`
const BUDGETS: &[(&str, usize, &str)] = &[
    (".unwrap()", 0, "panics on None/Err"),
    (".expect(", 0, "panics on None/Err"),
    ("panic!(", 0, "aborts the crop session"),
    ("unreachable!(", 0, "aborts the crop session"),
    ("todo!(", 0, "unfinished stub"),
    ("unimplemented!(", 0, "unfinished stub"),
    ("let _ =", 0, "silently discards a result"),
    (".ok()", 0, "silently discards an error"),
    ("println!(", 0, "use tracing instead of stdout"),
    ("dbg!(", 0, "debug leftovers"),
    ("#[allow(dead_code)]", 0, "dead code should be deleted"),
];

fn production_sources() -> Vec<(String, String)> {
    let mut out = Vec::new();
    walk(Path::new("src"), &mut out);
    out
}

fn walk(dir: &Path, out: &mut Vec<(String, String)>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            walk(&path, out);
            continue;
        }
        let name = path.to_string_lossy().to_string();
        if !name.ends_with(".rs") || name.ends_with("_test.rs") {
            continue;
        }
        if let Ok(content) = fs::read_to_string(&path) {
            out.push((name, content));
        }
    }
}

fn offenders(files: &[(String, String)], pattern: &str) -> Vec<String> {
    files
        .iter()
        .flat_map(|(path, content)| {
            content
                .lines()
                .enumerate()
                .filter(|(_, line)| line.contains(pattern))
                .map(move |(i, line)| format!("  {path}:{}: {}", i + 1, line.trim()))
        })
        .collect()
}

#[test]
fn sources_are_found() {
    assert!(!production_sources().is_empty(), "no sources under src/");
}

#[test]
fn source_budgets_hold() {
    let files = production_sources();
    let mut failures = Vec::new();
    for (pattern, budget, reason) in BUDGETS {
        let hits = offenders(&files, pattern);
        if hits.len() > *budget {
            failures.push(format!("{pattern} ({reason}): found {}, max {budget}\n{}", hits.len(), hits.join("\n")));
        }
    }
    assert!(failures.is_empty(), "hygiene budgets exceeded:\n{}", failures.join("\n"));
}
