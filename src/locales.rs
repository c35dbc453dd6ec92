//! Locale key store.
//!
//! Loads every locale file matched by the configured glob once per run and
//! answers two questions about them: does a dotted key resolve to a value, and
//! which dotted keys does a file define.

use std::{
    collections::HashSet,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use serde_json::{Map, Value};

/// Key whose subtree carries translator notes rather than translations.
pub const CONTEXT_KEY: &str = "_context";

/// One parsed locale file.
#[derive(Debug, Clone)]
pub struct LocaleFile {
    /// Canonical absolute path, used as the file's identity.
    pub path: PathBuf,
    /// Path as the user wrote or globbed it, used in reports.
    display: String,
    pub content: Map<String, Value>,
    /// Raw text, kept to locate keys for reporting.
    source: String,
    line_index: Vec<usize>,
}

impl LocaleFile {
    pub fn parse(path: impl Into<PathBuf>, source: String) -> Result<Self> {
        let path = path.into();
        let json: Value = serde_json::from_str(&source)
            .with_context(|| format!("Failed to parse locale file: {}", path.display()))?;

        let Value::Object(content) = json else {
            bail!(
                "Locale file {} must contain a JSON object at the top level",
                path.display()
            );
        };

        let line_index = build_line_index(&source);
        Ok(Self {
            display: path.display().to_string(),
            path,
            content,
            source,
            line_index,
        })
    }

    pub fn read(path: &Path) -> Result<Self> {
        let canonical = path
            .canonicalize()
            .with_context(|| format!("Failed to resolve locale file: {}", path.display()))?;
        let source = fs::read_to_string(&canonical)
            .with_context(|| format!("Failed to read locale file: {}", path.display()))?;

        let mut file = Self::parse(canonical, source)?;
        file.display = path.strip_prefix(".").unwrap_or(path).display().to_string();
        Ok(file)
    }

    pub fn display_path(&self) -> String {
        self.display.clone()
    }

    pub fn resolve(&self, key: &str) -> Option<&Value> {
        resolve(&self.content, key)
    }

    pub fn keys(&self) -> HashSet<String> {
        flatten(&self.content)
    }

    /// 1-based line where `key` is defined, or 1 if it cannot be located.
    pub fn key_line(&self, key: &str) -> usize {
        find_key_line(&self.source, key, &self.line_index)
    }
}

/// All locale files of the project, loaded once and shared by both rules.
#[derive(Debug, Clone, Default)]
pub struct LocaleKeyStore {
    files: Vec<LocaleFile>,
}

impl LocaleKeyStore {
    pub fn new(files: Vec<LocaleFile>) -> Self {
        Self { files }
    }

    /// Load every file matching `pattern`. A single unreadable or malformed
    /// file fails the whole load.
    pub fn load(pattern: &str) -> Result<Self> {
        let entries = glob::glob(pattern)
            .with_context(|| format!("Invalid locale glob pattern: \"{}\"", pattern))?;

        let mut paths = Vec::new();
        for entry in entries {
            let path = entry.with_context(|| format!("Cannot access locale path ({})", pattern))?;
            if path.is_file() {
                paths.push(path);
            }
        }
        paths.sort();

        let files = paths
            .iter()
            .map(|path| LocaleFile::read(path))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { files })
    }

    pub fn files(&self) -> &[LocaleFile] {
        &self.files
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Locale file whose identity matches `path`, if it is one of ours.
    pub fn find(&self, path: &Path) -> Option<&LocaleFile> {
        let canonical = path.canonicalize().ok();
        self.files.iter().find(|file| {
            file.path == path || canonical.as_deref().is_some_and(|c| file.path == c)
        })
    }
}

/// Walk `content` along the dot-separated segments of `key`.
///
/// Returns `None` as soon as a segment is absent or the current node is not
/// an object; arrays and scalars are leaves.
pub fn resolve<'a>(content: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    let mut segments = key.split('.');
    let first = segments.next()?;
    let mut current = content.get(first)?;

    for segment in segments {
        current = current.as_object()?.get(segment)?;
    }

    Some(current)
}

/// Every dotted leaf path in `content`, skipping `_context` subtrees.
pub fn flatten(content: &Map<String, Value>) -> HashSet<String> {
    let mut keys = HashSet::new();
    collect_keys(content, "", &mut keys);
    keys
}

fn collect_keys(map: &Map<String, Value>, prefix: &str, keys: &mut HashSet<String>) {
    for (key, value) in map {
        if key == CONTEXT_KEY {
            continue;
        }

        let full_path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{}.{}", prefix, key)
        };

        match value {
            Value::Object(nested) => collect_keys(nested, &full_path, keys),
            _ => {
                keys.insert(full_path);
            }
        }
    }
}

/// Byte offsets at which each line starts.
fn build_line_index(content: &str) -> Vec<usize> {
    let mut offsets = vec![0];
    for (i, c) in content.char_indices() {
        if c == '\n' {
            offsets.push(i + 1);
        }
    }
    offsets
}

fn offset_to_line(line_index: &[usize], offset: usize) -> usize {
    match line_index.binary_search(&offset) {
        Ok(line) => line + 1,
        Err(line) => line,
    }
}

/// Line of the object key at `key_path`, or 1 if it cannot be located.
///
/// A segment only matches a key at the nesting level its parent opened, so
/// `c` never lands on a nested `a.c`. Strings followed by anything but `:` are
/// values and never match.
fn find_key_line(content: &str, key_path: &str, line_index: &[usize]) -> usize {
    let bytes = content.as_bytes();
    let mut segments = key_path.split('.');
    let mut wanted = segments.next();
    let mut target_depth = 1;
    let mut depth: usize = 0;
    let mut last_match = None;
    let mut i = 0;

    while i < bytes.len() {
        let Some(part) = wanted else { break };

        match bytes[i] {
            b'{' | b'[' => depth += 1,
            b'}' | b']' => {
                depth = depth.saturating_sub(1);
                // The matched parent's object closed without the next segment.
                if last_match.is_some() && depth < target_depth {
                    break;
                }
            }
            b'"' => {
                let Some(end) = string_end(bytes, i) else { break };
                let after = end + 1;
                let rest = content[after..].trim_start();

                if depth == target_depth
                    && rest.starts_with(':')
                    && &content[i + 1..end] == part
                {
                    last_match = Some(after);
                    wanted = segments.next();
                    if wanted.is_none() || !rest[1..].trim_start().starts_with('{') {
                        break;
                    }
                    target_depth += 1;
                }
                i = after;
                continue;
            }
            _ => {}
        }
        i += 1;
    }

    last_match
        .map(|offset| offset_to_line(line_index, offset))
        .unwrap_or(1)
}

/// Index of the quote closing the string that opens at `start`.
fn string_end(bytes: &[u8], start: usize) -> Option<usize> {
    let mut j = start + 1;
    while j < bytes.len() {
        match bytes[j] {
            b'\\' => j += 2,
            b'"' => return Some(j),
            _ => j += 1,
        }
    }
    None
}
