//! translate-check - missing and unused translation keys for JSON locale files
//!
//! Two passes cooperate through a usage ledger: the missing-key pass checks
//! every translation call against each locale file and records the key it
//! saw; the unused-key pass, run right after, reports locale keys that no
//! call recorded.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer
//! - `config`: Configuration file loading and parsing
//! - `extract`: Source scanning and call-site extraction
//! - `issues`: Issue type definitions and reporting trait
//! - `ledger`: Usage ledger shared by the two passes
//! - `locales`: Locale file loading, key resolution and flattening
//! - `rules`: The missing-key and unused-key detectors

pub mod cli;
pub mod config;
pub mod extract;
pub mod issues;
pub mod ledger;
pub mod locales;
pub mod rules;
