//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `missing`: check call sites against every locale file and record used keys
//! - `unused`: report locale keys the last `missing` pass never saw
//! - `check`: run both passes back to back
//! - `init`: write a default configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }
}

/// Common arguments shared by all checking commands.
#[derive(Debug, Clone, Default, Args)]
pub struct CommonArgs {
    /// Project root directory (config lookup and relative paths)
    #[arg(long)]
    pub source_root: Option<PathBuf>,

    /// Glob matching locale files (overrides config file)
    #[arg(long)]
    pub locales: Option<String>,

    /// Usage ledger file (overrides config file)
    #[arg(long)]
    pub ledger: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Args)]
pub struct MissingCommand {
    /// Source files to check (default: every file under the configured includes)
    #[arg(value_name = "FILE")]
    pub files: Vec<PathBuf>,

    /// Read call sites from a JSON file produced by an external driver
    #[arg(long, value_name = "FILE", conflicts_with = "files")]
    pub events: Option<PathBuf>,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct UnusedCommand {
    /// Locale files to check (default: every configured locale file)
    #[arg(value_name = "LOCALE_FILE")]
    pub targets: Vec<PathBuf>,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct CheckCommand {
    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Report keys used in code but missing from a locale file (records used keys)
    Missing(MissingCommand),
    /// Report locale keys not used in any file (run right after `missing`)
    Unused(UnusedCommand),
    /// Run `missing` then `unused` in one go
    Check(CheckCommand),
    /// Initialize a new .translatecheckrc.json configuration file
    Init,
}
