//! Unused translation key detection.
//!
//! Detects keys defined in a locale file that no call site recorded in the
//! current pass's usage ledger.

use std::{collections::HashSet, path::Path};

use crate::{
    issues::{SourceLocation, UnusedKeyIssue},
    ledger::{Clock, LedgerError, LedgerStore, UsageLedger},
    locales::{LocaleFile, LocaleKeyStore},
};

/// Check one locale file against the ledger.
///
/// Fails with [`LedgerError::NotFresh`] before looking at `target` if the
/// missing-key pass has not run within the freshness window. A `target` that
/// is not one of the loaded locale files yields no issues.
pub fn check_unused_keys<S: LedgerStore, C: Clock>(
    target: &Path,
    store: &LocaleKeyStore,
    ledger: &UsageLedger<S, C>,
) -> Result<Vec<UnusedKeyIssue>, LedgerError> {
    let used_keys = ledger.read_all()?;

    Ok(store
        .find(target)
        .map(|locale| find_unused_keys(locale, &used_keys))
        .unwrap_or_default())
}

/// Keys of `locale` absent from `used_keys`, ordered by line then key.
pub fn find_unused_keys(locale: &LocaleFile, used_keys: &HashSet<String>) -> Vec<UnusedKeyIssue> {
    let file_path = locale.display_path();

    let mut issues: Vec<UnusedKeyIssue> = locale
        .keys()
        .into_iter()
        .filter(|key| !used_keys.contains(key))
        .map(|key| UnusedKeyIssue {
            location: SourceLocation::new(&file_path, locale.key_line(&key), 1),
            key,
        })
        .collect();

    issues.sort_by(|a, b| {
        a.location
            .line
            .cmp(&b.location.line)
            .then_with(|| a.key.cmp(&b.key))
    });

    issues
}
