//! Issue types produced by the two passes.
//!
//! Each issue carries everything the reporter needs: rule, severity, the
//! user-facing message and where to point.

use std::{cmp::Ordering, fmt};

use enum_dispatch::enum_dispatch;

// ============================================================
// Severity and Rule
// ============================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Rule {
    MissingKey,
    UnusedKey,
    ParseError,
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rule::MissingKey => write!(f, "missing-key"),
            Rule::UnusedKey => write!(f, "unused-key"),
            Rule::ParseError => write!(f, "parse-error"),
        }
    }
}

// ============================================================
// Locations
// ============================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocation {
    pub file_path: String,
    pub line: usize,
    pub col: usize,
}

impl SourceLocation {
    pub fn new(file_path: impl Into<String>, line: usize, col: usize) -> Self {
        Self {
            file_path: file_path.into(),
            line,
            col,
        }
    }
}

/// A call site's location plus the line of code it sits on, when known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceContext {
    pub location: SourceLocation,
    pub source_line: Option<String>,
}

impl SourceContext {
    pub fn new(location: SourceLocation, source_line: Option<String>) -> Self {
        Self {
            location,
            source_line,
        }
    }
}

// ============================================================
// Issue Types
// ============================================================

/// Key used at a call site but absent from one locale file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingKeyIssue {
    pub context: SourceContext,
    pub key: String,
    /// Locale file the key is missing from.
    pub locale_path: String,
}

/// Key defined in a locale file but never used by any call site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnusedKeyIssue {
    /// Where the key is defined in the locale file.
    pub location: SourceLocation,
    pub key: String,
}

/// Source file the extractor could not parse; its calls were not checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseErrorIssue {
    pub file_path: String,
    pub error: String,
}

#[enum_dispatch(Report)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Issue {
    MissingKey(MissingKeyIssue),
    UnusedKey(UnusedKeyIssue),
    ParseError(ParseErrorIssue),
}

impl Issue {
    pub fn severity(&self) -> Severity {
        self.report_severity()
    }

    pub fn rule(&self) -> Rule {
        self.report_rule()
    }

    pub fn file_path(&self) -> &str {
        match self.location() {
            ReportLocation::Source(ctx) => &ctx.location.file_path,
            ReportLocation::Locale(loc) => &loc.file_path,
            ReportLocation::File { path } => path,
        }
    }

    fn position(&self) -> (usize, usize) {
        match self.location() {
            ReportLocation::Source(ctx) => (ctx.location.line, ctx.location.col),
            ReportLocation::Locale(loc) => (loc.line, loc.col),
            ReportLocation::File { .. } => (0, 0),
        }
    }
}

/// Ordering used for output: file, position, rule, then message.
pub fn compare_issues(a: &Issue, b: &Issue) -> Ordering {
    a.file_path()
        .cmp(b.file_path())
        .then_with(|| a.position().cmp(&b.position()))
        .then_with(|| a.rule().cmp(&b.rule()))
        .then_with(|| a.message().cmp(&b.message()))
}

// ============================================================
// Report Trait
// ============================================================

pub enum ReportLocation<'a> {
    /// Call site in source code.
    Source(&'a SourceContext),
    /// Key definition inside a locale file.
    Locale(&'a SourceLocation),
    /// Whole file, no position.
    File { path: &'a str },
}

#[enum_dispatch]
pub trait Report {
    fn location(&self) -> ReportLocation<'_>;

    fn message(&self) -> String;

    fn report_severity(&self) -> Severity;

    fn report_rule(&self) -> Rule;
}

impl Report for MissingKeyIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Source(&self.context)
    }

    fn message(&self) -> String {
        format!("The key \"{}\" is missing in {}", self.key, self.locale_path)
    }

    fn report_severity(&self) -> Severity {
        Severity::Error
    }

    fn report_rule(&self) -> Rule {
        Rule::MissingKey
    }
}

impl Report for UnusedKeyIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Locale(&self.location)
    }

    fn message(&self) -> String {
        format!("The key \"{}\" is not used in any file", self.key)
    }

    fn report_severity(&self) -> Severity {
        Severity::Error
    }

    fn report_rule(&self) -> Rule {
        Rule::UnusedKey
    }
}

impl Report for ParseErrorIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::File {
            path: &self.file_path,
        }
    }

    fn message(&self) -> String {
        self.error.clone()
    }

    fn report_severity(&self) -> Severity {
        Severity::Warning
    }

    fn report_rule(&self) -> Rule {
        Rule::ParseError
    }
}
