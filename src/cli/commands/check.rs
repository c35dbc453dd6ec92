use anyhow::Result;

use super::{
    CommandResult, CommandSummary, finish,
    missing::{discover_files, run_missing_pass},
    unused::{all_locale_paths, run_unused_pass},
};
use crate::cli::{args::CheckCommand, context::CheckContext};

/// Both passes in one process: a fresh ledger pass, every source file, then
/// every locale file.
pub fn check(cmd: CheckCommand) -> Result<CommandResult> {
    let mut ctx = CheckContext::new(&cmd.common)?;

    ctx.ledger.begin_pass()?;

    let files = discover_files(&ctx);
    let outcome = run_missing_pass(&mut ctx, &files)?;

    let mut issues = outcome.issues;
    issues.extend(run_unused_pass(&ctx, &all_locale_paths(&ctx))?);

    Ok(finish(
        CommandSummary::Check,
        issues,
        outcome.source_files_checked,
        ctx.store.len(),
    ))
}
