pub mod check;
pub mod init;
pub mod missing;
pub mod unused;

use crate::issues::{Issue, Severity, compare_issues};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandSummary {
    Missing,
    Unused,
    Check,
    Init,
}

/// Outcome of one command, ready for reporting.
#[derive(Debug)]
pub struct CommandResult {
    pub summary: CommandSummary,
    /// Sorted for output.
    pub issues: Vec<Issue>,
    pub error_count: usize,
    pub source_files_checked: usize,
    pub locale_files_checked: usize,
}

pub fn finish(
    summary: CommandSummary,
    mut issues: Vec<Issue>,
    source_files_checked: usize,
    locale_files_checked: usize,
) -> CommandResult {
    issues.sort_by(compare_issues);

    let error_count = issues
        .iter()
        .filter(|i| i.severity() == Severity::Error)
        .count();

    CommandResult {
        summary,
        issues,
        error_count,
        source_files_checked,
        locale_files_checked,
    }
}
