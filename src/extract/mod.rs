//! Call-site extraction.
//!
//! Turns source files (or an external driver's event dump) into the ordered
//! stream of [`CallSite`]s the missing-key rule consumes.

pub mod calls;
pub mod events;
pub mod scanner;

use crate::issues::SourceContext;

/// One invocation of a translation function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallSite {
    /// The literal key argument; `None` when the key is computed.
    pub key: Option<String>,
    pub context: SourceContext,
}

pub use calls::{ParsedFile, extract_call_sites, parse_source};
pub use events::read_events;
pub use scanner::{ScanResult, scan_files};
