//! Hygiene: source-level checks on the court crate.
//!
//! Production files under `src/` (everything except `*_test.rs`) are scanned
//! line by line. Every rule has a budget of zero. Lowering is fine, raising
//! is not.

use std::fs;
use std::path::{Path, PathBuf};

struct Rule {
    pattern: &'static str,
    budget: usize,
    what: &'static str,
}

const RULES: &[Rule] = &[
    // Crashes.
    Rule { pattern: ".unwrap()", budget: 0, what: "unwrap" },
    Rule { pattern: ".expect(", budget: 0, what: "expect" },
    Rule { pattern: "panic!(", budget: 0, what: "panic" },
    Rule { pattern: "unreachable!(", budget: 0, what: "unreachable" },
    Rule { pattern: "todo!(", budget: 0, what: "todo" },
    Rule { pattern: "unimplemented!(", budget: 0, what: "unimplemented" },
    // Errors dropped without a look.
    Rule { pattern: "let _ =", budget: 0, what: "silent discard" },
    Rule { pattern: ".ok()", budget: 0, what: "Result::ok" },
    // Structure.
    Rule { pattern: "#[allow(dead_code)]", budget: 0, what: "allow(dead_code)" },
];

fn production_files() -> Vec<(PathBuf, String)> {
    let mut out = Vec::new();
    walk(Path::new("src"), &mut out);
    out.sort_by(|a, b| a.0.cmp(&b.0));
    out
}

fn walk(dir: &Path, out: &mut Vec<(PathBuf, String)>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for path in entries.flatten().map(|e| e.path()) {
        if path.is_dir() {
            walk(&path, out);
            continue;
        }
        let is_rs = path.extension().is_some_and(|e| e == "rs");
        let is_test = path.to_string_lossy().ends_with("_test.rs");
        if is_rs && !is_test {
            if let Ok(content) = fs::read_to_string(&path) {
                out.push((path, content));
            }
        }
    }
}

fn hits(files: &[(PathBuf, String)], pattern: &str) -> Vec<String> {
    let mut found = Vec::new();
    for (path, content) in files {
        for (n, line) in content.lines().enumerate() {
            if line.contains(pattern) {
                found.push(format!("  {}:{}: {}", path.display(), n + 1, line.trim()));
            }
        }
    }
    found
}

#[test]
fn scans_production_sources() {
    let files = production_files();
    assert!(files.iter().any(|(p, _)| p.ends_with("lib.rs")), "src/lib.rs not found");
    assert!(files.iter().all(|(p, _)| !p.to_string_lossy().ends_with("_test.rs")));
}

#[test]
fn budgets_hold() {
    let files = production_files();
    let mut failures = Vec::new();
    for rule in RULES {
        let found = hits(&files, rule.pattern);
        if found.len() > rule.budget {
            failures.push(format!(
                "{} budget exceeded: found {}, max {}\n{}",
                rule.what,
                found.len(),
                rule.budget,
                found.join("\n")
            ));
        }
    }
    assert!(failures.is_empty(), "{}", failures.join("\n\n"));
}
