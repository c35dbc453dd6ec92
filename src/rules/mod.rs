//! Detection rules.
//!
//! - `missing`: keys used at call sites but absent from a locale file.
//!   Also feeds the usage ledger.
//! - `unused`: keys defined in a locale file that the ledger never saw.

pub mod missing;
pub mod unused;

pub use missing::{MissingKeyRule, MissingKeyStats};
pub use unused::{check_unused_keys, find_unused_keys};
