//! Usage ledger shared by the two passes.
//!
//! The missing-key pass appends every key it sees; the unused-key pass reads
//! them back. The passes run as separate invocations, so they meet through a
//! durable record whose first line is the pass start time and whose other
//! lines are one key each:
//!
//! ```text
//! 1739180000000
//! Common.save
//! Auth.title
//! Common.save
//! ```
//!
//! A record older than the freshness window belongs to an earlier pass. The
//! next recorded key starts a new pass; reading a stale record is an error.

mod clock;
mod store;

use std::{collections::HashSet, io};

use thiserror::Error;

pub use clock::{Clock, ManualClock, SystemClock};
pub use store::{FileStore, LedgerStore, MemoryStore};

/// Default freshness window.
pub const DEFAULT_WINDOW_MS: u64 = 15_000;

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error(
        "the unused-key check needs a fresh usage ledger, but {location} is missing or older than {window_ms}ms.\n\
         Run the missing-key check over the whole source tree right before the unused-key check \
         (`translate-check check` runs both in order)."
    )]
    NotFresh { location: String, window_ms: u64 },

    #[error("failed to access usage ledger {location}: {source}")]
    Io {
        location: String,
        #[source]
        source: io::Error,
    },
}

/// Where the ledger stands relative to the current pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedgerState {
    /// Absent, unreadable timestamp, or older than the window.
    Stale,
    /// Belongs to the pass that started at `started_at`.
    Fresh { started_at: i64 },
}

impl LedgerState {
    pub fn is_fresh(self) -> bool {
        matches!(self, LedgerState::Fresh { .. })
    }
}

pub struct UsageLedger<S, C = SystemClock> {
    store: S,
    clock: C,
    window_ms: u64,
}

impl<S: LedgerStore> UsageLedger<S, SystemClock> {
    pub fn new(store: S) -> Self {
        Self::with_clock(store, SystemClock)
    }
}

impl<S: LedgerStore, C: Clock> UsageLedger<S, C> {
    pub fn with_clock(store: S, clock: C) -> Self {
        Self {
            store,
            clock,
            window_ms: DEFAULT_WINDOW_MS,
        }
    }

    pub fn window_ms(mut self, window_ms: u64) -> Self {
        self.window_ms = window_ms;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn state(&self) -> Result<LedgerState, LedgerError> {
        let Some(contents) = self.store.read().map_err(|e| self.io_error(e))? else {
            return Ok(LedgerState::Stale);
        };

        let started_at = parse_header(&contents);
        let elapsed = self.clock.now_millis().saturating_sub(started_at);
        if elapsed <= self.window_as_i64() {
            Ok(LedgerState::Fresh { started_at })
        } else {
            Ok(LedgerState::Stale)
        }
    }

    pub fn is_fresh(&self) -> Result<bool, LedgerError> {
        Ok(self.state()?.is_fresh())
    }

    /// Record one observed key. Returns `true` when this call started a new
    /// pass (the stale record was reset first).
    pub fn record_usage(&mut self, key: &str) -> Result<bool, LedgerError> {
        let reset = !self.is_fresh()?;
        if reset {
            self.begin_pass()?;
        }

        self.store
            .append(&format!("{}\n", key))
            .map_err(|e| self.io_error(e))?;

        Ok(reset)
    }

    /// Start a new pass now, discarding whatever an earlier pass recorded.
    pub fn begin_pass(&mut self) -> Result<(), LedgerError> {
        let header = format!("{}\n", self.clock.now_millis());
        self.store
            .overwrite(&header)
            .map_err(|e| self.io_error(e))
    }

    /// Fails with [`LedgerError::NotFresh`] unless a pass is in progress.
    pub fn ensure_fresh(&self) -> Result<(), LedgerError> {
        if self.is_fresh()? {
            Ok(())
        } else {
            Err(LedgerError::NotFresh {
                location: self.store.describe(),
                window_ms: self.window_ms,
            })
        }
    }

    /// Every key recorded during the current pass.
    pub fn read_all(&self) -> Result<HashSet<String>, LedgerError> {
        self.ensure_fresh()?;

        let contents = self
            .store
            .read()
            .map_err(|e| self.io_error(e))?
            .unwrap_or_default();

        Ok(contents
            .lines()
            .skip(1)
            .map(str::to_string)
            .collect())
    }

    fn window_as_i64(&self) -> i64 {
        i64::try_from(self.window_ms).unwrap_or(i64::MAX)
    }

    fn io_error(&self, source: io::Error) -> LedgerError {
        LedgerError::Io {
            location: self.store.describe(),
            source,
        }
    }
}

/// Pass start time from the first line; anything unparsable counts as 0.
fn parse_header(contents: &str) -> i64 {
    contents
        .lines()
        .next()
        .and_then(|line| line.trim().parse::<i64>().ok())
        .unwrap_or(0)
}
