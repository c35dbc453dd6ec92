use std::{
    collections::BTreeSet,
    path::{Path, PathBuf},
};

use colored::Colorize;
use glob::{Pattern, glob};
use walkdir::WalkDir;

/// Patterns without wildcards are literal paths.
fn is_glob_pattern(pattern: &str) -> bool {
    pattern.contains('*') || pattern.contains('?')
}

pub struct ScanResult {
    /// Source files, sorted so call sites are discovered in a stable order.
    pub files: Vec<PathBuf>,
    pub skipped_count: usize,
}

/// Ignore entries split into path prefixes and globs.
struct IgnoreSet {
    prefixes: Vec<PathBuf>,
    globs: Vec<Pattern>,
}

impl IgnoreSet {
    fn new(base_dir: &Path, patterns: &[String], verbose: bool) -> Self {
        let mut set = Self {
            prefixes: Vec::new(),
            globs: Vec::new(),
        };
        for p in patterns {
            if !is_glob_pattern(p) {
                set.prefixes.push(base_dir.join(p));
                continue;
            }
            match Pattern::new(p) {
                Ok(pattern) => set.globs.push(pattern),
                Err(e) => warn(verbose, format!("Invalid ignore pattern '{}': {}", p, e)),
            }
        }
        set
    }

    fn is_ignored(&self, path: &Path) -> bool {
        self.prefixes.iter().any(|prefix| path.starts_with(prefix))
            || self
                .globs
                .iter()
                .any(|g| g.matches(&path.to_string_lossy()))
    }
}

fn warn(verbose: bool, message: String) {
    if verbose {
        eprintln!("{} {}", "warning:".bold().yellow(), message);
    }
}

/// Directories to walk: the base itself when `includes` is empty, otherwise
/// each existing literal path and each directory a glob expands to.
fn include_roots(base_dir: &Path, includes: &[String], verbose: bool) -> Vec<PathBuf> {
    if includes.is_empty() {
        return vec![base_dir.to_path_buf()];
    }

    let mut roots = Vec::new();
    for inc in includes {
        let path = base_dir.join(inc);
        if !is_glob_pattern(inc) {
            if path.exists() {
                roots.push(path);
            } else {
                warn(
                    verbose,
                    format!("Include path does not exist: {}", path.display()),
                );
            }
            continue;
        }
        match glob(&path.to_string_lossy()) {
            Ok(entries) => roots.extend(entries.flatten().filter(|entry| entry.is_dir())),
            Err(e) => warn(verbose, format!("Invalid glob pattern '{}': {}", inc, e)),
        }
    }
    roots
}

pub fn scan_files(
    base_dir: &Path,
    includes: &[String],
    ignore_patterns: &[String],
    verbose: bool,
) -> ScanResult {
    let ignores = IgnoreSet::new(base_dir, ignore_patterns, verbose);
    let mut files = BTreeSet::new();
    let mut skipped_count = 0;

    for root in include_roots(base_dir, includes, verbose) {
        for entry in WalkDir::new(root) {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    skipped_count += 1;
                    warn(verbose, format!("Cannot access path: {}", e));
                    continue;
                }
            };
            let path = entry.path();
            if path.is_file() && is_scannable_file(path) && !ignores.is_ignored(path) {
                files.insert(path.to_path_buf());
            }
        }
    }

    ScanResult {
        files: files.into_iter().collect(),
        skipped_count,
    }
}

pub fn is_scannable_file(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("tsx" | "ts" | "jsx" | "js" | "mjs" | "cjs" | "mts" | "cts")
    )
}
