use std::{collections::BTreeSet, fs, path::PathBuf};

use anyhow::Result;

use super::{CommandResult, CommandSummary, finish};
use crate::{
    cli::{args::MissingCommand, context::CheckContext},
    extract::{CallSite, extract_call_sites, parse_source, read_events, scan_files},
    issues::{Issue, ParseErrorIssue},
    rules::{MissingKeyRule, MissingKeyStats},
};

pub fn missing(cmd: MissingCommand) -> Result<CommandResult> {
    let mut ctx = CheckContext::new(&cmd.common)?;

    let outcome = match &cmd.events {
        Some(events) => run_events(&mut ctx, read_events(events)?)?,
        None => {
            let files = if cmd.files.is_empty() {
                discover_files(&ctx)
            } else {
                cmd.files.clone()
            };
            run_missing_pass(&mut ctx, &files)?
        }
    };

    Ok(finish(
        CommandSummary::Missing,
        outcome.issues,
        outcome.source_files_checked,
        ctx.store.len(),
    ))
}

pub struct PassOutcome {
    pub issues: Vec<Issue>,
    pub source_files_checked: usize,
}

/// Source files under the configured includes, in sorted order.
pub fn discover_files(ctx: &CheckContext) -> Vec<PathBuf> {
    let scan = scan_files(
        &ctx.root_dir,
        &ctx.config.includes,
        &ctx.config.ignores,
        ctx.verbose,
    );
    if scan.skipped_count > 0 {
        eprintln!(
            "Warning: {} path(s) skipped due to access errors{}",
            scan.skipped_count,
            if ctx.verbose { "" } else { " (use -v for details)" }
        );
    }
    scan.files
}

/// Parse each file and feed its call sites to the missing-key rule, one file
/// at a time so the ledger sees keys in discovery order.
pub fn run_missing_pass(ctx: &mut CheckContext, files: &[PathBuf]) -> Result<PassOutcome> {
    let mut issues = Vec::new();
    let mut calls_by_file = Vec::with_capacity(files.len());

    for path in files {
        let display_path = ctx.display_path(path);
        let parsed = fs::read_to_string(path)
            .map_err(anyhow::Error::from)
            .and_then(|code| parse_source(code, &display_path));

        match parsed {
            Ok(parsed) => {
                calls_by_file.push(extract_call_sites(&parsed, &display_path, &ctx.functions));
            }
            Err(e) => {
                issues.push(Issue::ParseError(ParseErrorIssue {
                    file_path: display_path,
                    error: e.to_string(),
                }));
            }
        }
    }

    let mut rule = MissingKeyRule::new(&ctx.store, &mut ctx.ledger);
    for calls in &calls_by_file {
        issues.extend(rule.check_all(calls)?.into_iter().map(Issue::MissingKey));
    }

    let stats = rule.stats();
    report_stats(ctx, stats);

    Ok(PassOutcome {
        issues,
        source_files_checked: files.len(),
    })
}

fn run_events(ctx: &mut CheckContext, calls: Vec<CallSite>) -> Result<PassOutcome> {
    let files: BTreeSet<&str> = calls
        .iter()
        .map(|c| c.context.location.file_path.as_str())
        .collect();
    let source_files_checked = files.len();

    let mut rule = MissingKeyRule::new(&ctx.store, &mut ctx.ledger);
    let issues = rule
        .check_all(&calls)?
        .into_iter()
        .map(Issue::MissingKey)
        .collect();

    let stats = rule.stats();
    report_stats(ctx, stats);

    Ok(PassOutcome {
        issues,
        source_files_checked,
    })
}

fn report_stats(ctx: &CheckContext, stats: MissingKeyStats) {
    ctx.note(&format!(
        "Checked {} call site(s) against {} locale file(s)",
        stats.checked,
        ctx.store.len()
    ));
    if stats.passes_started > 0 {
        ctx.note(&format!(
            "Started a new usage pass in {}",
            ctx.ledger.store().path().display()
        ));
    }
    if stats.skipped_dynamic > 0 {
        ctx.note(&format!(
            "Skipped {} call(s) with a non-literal key",
            stats.skipped_dynamic
        ));
    }
    if stats.unrecordable > 0 {
        ctx.note(&format!(
            "{} key(s) contain line breaks and were not recorded as used",
            stats.unrecordable
        ));
    }
}
