use std::process::ExitCode;

use super::commands::CommandResult;

/// Process exit status, following linter conventions.
///
/// - `Success` (0): no errors reported
/// - `Failure` (1): the check ran and reported errors
/// - `Error` (2): the check could not run (config, locale parse, ledger order)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    Failure,
    Error,
}

impl ExitStatus {
    /// Warnings alone never fail a run.
    pub fn from_result(result: &CommandResult) -> Self {
        if result.error_count > 0 {
            ExitStatus::Failure
        } else {
            ExitStatus::Success
        }
    }
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => ExitCode::from(0),
            ExitStatus::Failure => ExitCode::from(1),
            ExitStatus::Error => ExitCode::from(2),
        }
    }
}
