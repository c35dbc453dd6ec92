//! Call-site events handed over by an external analysis driver.
//!
//! The file is a JSON array, one object per call site, in discovery order:
//!
//! ```json
//! [
//!   { "key": "page.title", "file": "src/routes/+page.svelte", "line": 4, "col": 12 },
//!   { "key": null, "file": "src/lib/Nav.svelte", "line": 9, "col": 3 }
//! ]
//! ```

use std::{fs, path::Path};

use anyhow::{Context, Result};
use serde::Deserialize;

use super::CallSite;
use crate::issues::{SourceContext, SourceLocation};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CallSiteEvent {
    /// Literal key, or null when the driver saw a computed argument.
    #[serde(default)]
    key: Option<String>,
    file: String,
    #[serde(default = "default_position")]
    line: usize,
    #[serde(default = "default_position")]
    col: usize,
    #[serde(default)]
    source_line: Option<String>,
}

fn default_position() -> usize {
    1
}

impl From<CallSiteEvent> for CallSite {
    fn from(event: CallSiteEvent) -> Self {
        CallSite {
            key: event.key,
            context: SourceContext::new(
                SourceLocation::new(event.file, event.line, event.col),
                event.source_line,
            ),
        }
    }
}

pub fn parse_events(content: &str) -> Result<Vec<CallSite>> {
    let events: Vec<CallSiteEvent> = serde_json::from_str(content)?;
    Ok(events.into_iter().map(CallSite::from).collect())
}

pub fn read_events(path: &Path) -> Result<Vec<CallSite>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read call-site events: {}", path.display()))?;
    parse_events(&content)
        .with_context(|| format!("Failed to parse call-site events: {}", path.display()))
}
