use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Ok, Result, bail};
use glob::Pattern;
use serde::{Deserialize, Serialize};

use crate::ledger::DEFAULT_WINDOW_MS;

pub const CONFIG_FILE_NAME: &str = ".translatecheckrc.json";

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Glob matching every locale file, relative to the project root.
    #[serde(default = "default_locales")]
    pub locales: String,
    #[serde(default = "default_ledger_path")]
    pub ledger_path: String,
    #[serde(default = "default_freshness_window_ms")]
    pub freshness_window_ms: u64,
    /// Callee names treated as translation lookups.
    #[serde(default = "default_functions")]
    pub functions: Vec<String>,
    #[serde(default = "default_includes")]
    pub includes: Vec<String>,
    #[serde(default = "default_ignores")]
    pub ignores: Vec<String>,
}

fn default_locales() -> String {
    "src/lib/i18n/locales/*.json".to_string()
}

fn default_ledger_path() -> String {
    "./tmp/all-translate-calls.txt".to_string()
}

fn default_freshness_window_ms() -> u64 {
    DEFAULT_WINDOW_MS
}

fn default_functions() -> Vec<String> {
    vec!["$translate".to_string()]
}

fn default_includes() -> Vec<String> {
    vec!["src".to_string()]
}

fn default_ignores() -> Vec<String> {
    vec!["**/node_modules/**".to_string()]
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locales: default_locales(),
            ledger_path: default_ledger_path(),
            freshness_window_ms: default_freshness_window_ms(),
            functions: default_functions(),
            includes: default_includes(),
            ignores: default_ignores(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    pub fn validate(&self) -> Result<()> {
        Pattern::new(&self.locales)
            .with_context(|| format!("Invalid glob pattern in 'locales': \"{}\"", self.locales))?;

        for pattern in &self.ignores {
            Pattern::new(pattern)
                .with_context(|| format!("Invalid glob pattern in 'ignores': \"{}\"", pattern))?;
        }

        // Only patterns with wildcards are globs; others are literal directories.
        for pattern in &self.includes {
            if pattern.contains('*') || pattern.contains('?') {
                Pattern::new(pattern).with_context(|| {
                    format!("Invalid glob pattern in 'includes': \"{}\"", pattern)
                })?;
            }
        }

        if self.functions.is_empty() {
            bail!("'functions' must name at least one translation function");
        }

        if self.freshness_window_ms == 0 {
            bail!("'freshnessWindowMs' must be greater than 0");
        }

        Ok(())
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

pub struct ConfigLoadResult {
    pub config: Config,
    /// Path of the config file, or `None` when using defaults.
    pub path: Option<PathBuf>,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            Ok(ConfigLoadResult {
                config,
                path: Some(path),
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            path: None,
        }),
    }
}
