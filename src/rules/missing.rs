//! Missing translation key detection.
//!
//! Runs once per call site: every locale file that cannot resolve the key
//! gets its own issue, and the key is recorded in the usage ledger whether or
//! not it resolved.

use crate::{
    extract::CallSite,
    issues::MissingKeyIssue,
    ledger::{Clock, LedgerError, LedgerStore, UsageLedger},
    locales::LocaleKeyStore,
};

/// Counters gathered while a pass runs, for verbose output.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MissingKeyStats {
    pub checked: usize,
    /// Calls whose key was not a literal and could not be checked.
    pub skipped_dynamic: usize,
    /// Keys with line breaks, which the line-based ledger cannot hold.
    pub unrecordable: usize,
    /// How many times a stale ledger was reset.
    pub passes_started: usize,
}

pub struct MissingKeyRule<'a, S, C> {
    store: &'a LocaleKeyStore,
    ledger: &'a mut UsageLedger<S, C>,
    stats: MissingKeyStats,
}

impl<'a, S: LedgerStore, C: Clock> MissingKeyRule<'a, S, C> {
    pub fn new(store: &'a LocaleKeyStore, ledger: &'a mut UsageLedger<S, C>) -> Self {
        Self {
            store,
            ledger,
            stats: MissingKeyStats::default(),
        }
    }

    pub fn stats(&self) -> MissingKeyStats {
        self.stats
    }

    pub fn check(&mut self, call: &CallSite) -> Result<Vec<MissingKeyIssue>, LedgerError> {
        let Some(key) = call.key.as_deref() else {
            self.stats.skipped_dynamic += 1;
            return Ok(Vec::new());
        };
        self.stats.checked += 1;

        let issues = self
            .store
            .files()
            .iter()
            .filter(|locale| locale.resolve(key).is_none())
            .map(|locale| MissingKeyIssue {
                context: call.context.clone(),
                key: key.to_string(),
                locale_path: locale.display_path(),
            })
            .collect();

        if key.contains(['\n', '\r']) {
            self.stats.unrecordable += 1;
        } else if self.ledger.record_usage(key)? {
            self.stats.passes_started += 1;
        }

        Ok(issues)
    }

    /// Check every call site in order, collecting all issues.
    pub fn check_all<'c>(
        &mut self,
        calls: impl IntoIterator<Item = &'c CallSite>,
    ) -> Result<Vec<MissingKeyIssue>, LedgerError> {
        let mut issues = Vec::new();
        for call in calls {
            issues.extend(self.check(call)?);
        }
        Ok(issues)
    }
}
