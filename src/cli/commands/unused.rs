use std::path::PathBuf;

use anyhow::Result;

use super::{CommandResult, CommandSummary, finish};
use crate::{
    cli::{args::UnusedCommand, context::CheckContext},
    issues::Issue,
    rules::check_unused_keys,
};

pub fn unused(cmd: UnusedCommand) -> Result<CommandResult> {
    let ctx = CheckContext::new(&cmd.common)?;

    let targets = if cmd.targets.is_empty() {
        all_locale_paths(&ctx)
    } else {
        cmd.targets.clone()
    };
    let issues = run_unused_pass(&ctx, &targets)?;

    Ok(finish(CommandSummary::Unused, issues, 0, targets.len()))
}

pub fn all_locale_paths(ctx: &CheckContext) -> Vec<PathBuf> {
    ctx.store.files().iter().map(|f| f.path.clone()).collect()
}

/// Check each target against the ledger. Fails before looking at any target
/// when no missing-key pass ran within the window.
pub fn run_unused_pass(ctx: &CheckContext, targets: &[PathBuf]) -> Result<Vec<Issue>> {
    ctx.ledger.ensure_fresh()?;

    let mut issues = Vec::new();
    for target in targets {
        if ctx.store.find(target).is_none() {
            ctx.note(&format!(
                "{} is not a configured locale file, skipping",
                target.display()
            ));
            continue;
        }
        let found = check_unused_keys(target, &ctx.store, &ctx.ledger)?;
        issues.extend(found.into_iter().map(Issue::UnusedKey));
    }

    Ok(issues)
}
