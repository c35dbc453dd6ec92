use std::{
    collections::HashSet,
    path::{Path, PathBuf},
};

use anyhow::Result;
use colored::Colorize;

use super::args::CommonArgs;
use crate::{
    config::{Config, load_config},
    ledger::{FileStore, UsageLedger},
    locales::LocaleKeyStore,
};

/// Process-scoped state shared by the commands of one invocation.
///
/// Configuration priority: CLI arguments > config file > defaults. Locale
/// files are loaded eagerly so a malformed one aborts the run before any
/// call site is recorded.
pub struct CheckContext {
    pub config: Config,
    /// Project root; relative paths in the config resolve against it.
    pub root_dir: PathBuf,
    pub store: LocaleKeyStore,
    pub ledger: UsageLedger<FileStore>,
    pub functions: HashSet<String>,
    pub verbose: bool,
}

impl CheckContext {
    pub fn new(common_args: &CommonArgs) -> Result<Self> {
        let verbose = common_args.verbose;
        let root_dir = common_args
            .source_root
            .clone()
            .unwrap_or_else(|| PathBuf::from("."));

        let config_result = load_config(&root_dir)?;
        if verbose {
            match &config_result.path {
                Some(path) => note(&format!("Using config {}", path.display())),
                None => note("No .translatecheckrc.json found, using default configuration"),
            }
        }

        let mut config = config_result.config;
        if let Some(ref locales) = common_args.locales {
            config.locales = locales.clone();
        }
        if let Some(ref ledger) = common_args.ledger {
            config.ledger_path = ledger.to_string_lossy().to_string();
        }
        config.validate()?;

        let locale_pattern = resolve_path(&root_dir, Path::new(&config.locales));
        let store = LocaleKeyStore::load(&locale_pattern.to_string_lossy())?;
        if store.is_empty() {
            eprintln!(
                "{} No locale files match '{}'",
                "warning:".bold().yellow(),
                config.locales
            );
        } else if verbose {
            note(&format!(
                "Loaded {} locale {}",
                store.len(),
                if store.len() == 1 { "file" } else { "files" }
            ));
        }

        let ledger_path = resolve_path(&root_dir, Path::new(&config.ledger_path));
        let ledger =
            UsageLedger::new(FileStore::new(ledger_path)).window_ms(config.freshness_window_ms);

        let functions = config.functions.iter().cloned().collect();

        Ok(Self {
            config,
            root_dir,
            store,
            ledger,
            functions,
            verbose,
        })
    }

    /// Path as shown in reports: relative to the root when possible.
    pub fn display_path(&self, path: &Path) -> String {
        path.strip_prefix(&self.root_dir)
            .unwrap_or(path)
            .display()
            .to_string()
    }

    pub fn note(&self, message: &str) {
        if self.verbose {
            note(message);
        }
    }
}

fn note(message: &str) {
    eprintln!("{} {}", "note:".bold().cyan(), message);
}

fn resolve_path(root_dir: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        let rel = path.strip_prefix(".").unwrap_or(path);
        root_dir.join(rel)
    }
}
