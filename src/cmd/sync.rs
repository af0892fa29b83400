// tugboat: multi-repository management for Gitea and GitHub
//
// SPDX-FileCopyrightText: 2026 Tugboat Developers
// SPDX-License-Identifier: GPL-3.0-or-later

//! Pull, push and sync commands.

use super::{build_engine, print_lines};
use crate::cli::global::GlobalOptions;
use crate::cli::repo::TargetArgs;
use crate::engine::decision::{ActionReport, Outcome, Step};
use crate::error::Result;

/// Which operation produced a set of reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Pull,
    Push,
    Sync,
}

/// Handler for `pull`, `push` and `sync`.
///
/// # Errors
///
/// Returns an error if the engine cannot be built or the targets cannot be
/// expanded. Per-repository failures are only reported.
pub async fn run_sync_command(action: Action, args: &TargetArgs, global: &GlobalOptions) -> Result<()> {
    let engine = build_engine(global)?;
    let reports = match action {
        Action::Pull => engine.pull(&args.targets).await?,
        Action::Push => engine.push(&args.targets).await?,
        Action::Sync => engine.sync(&args.targets).await?,
    };
    let lines = match action {
        Action::Pull => render_pull(&reports),
        Action::Push => render_push(&reports),
        Action::Sync => render_sync(&reports),
    };
    print_lines(&lines);
    Ok(())
}

/// Formats `pull` results.
#[must_use]
pub fn render_pull(reports: &[ActionReport]) -> Vec<String> {
    if reports.is_empty() {
        return vec!["Pull: no repositories found.".to_string()];
    }

    let (mut pulled, mut failed) = (0, 0);
    let mut lines = Vec::with_capacity(reports.len() + 1);
    for report in reports {
        let path = report.path.display();
        match &report.outcome {
            Outcome::Error(message) | Outcome::Failed { message, .. } => {
                lines.push(format!("  [ERROR] {path}: {message}"));
                failed += 1;
            }
            Outcome::Done { .. } => {
                lines.push(format!("  [PULL]  {path}"));
                pulled += 1;
            }
            Outcome::Skipped(_) | Outcome::Nothing => {}
        }
    }
    lines.push(format!("Pull complete: {pulled} pulled, {failed} failed"));
    lines
}

/// Formats `push` results.
#[must_use]
pub fn render_push(reports: &[ActionReport]) -> Vec<String> {
    let (mut pushed, mut skipped, mut failed) = (0, 0, 0);
    let mut lines = Vec::new();
    for report in reports {
        let path = report.path.display();
        match &report.outcome {
            Outcome::Error(message) | Outcome::Failed { message, .. } => {
                lines.push(format!("  [ERROR] {path}: {message}"));
                failed += 1;
            }
            Outcome::Skipped(reason) => {
                lines.push(format!("  [SKIP]  {path}: {reason}"));
                skipped += 1;
            }
            Outcome::Done { pushed: Some(n), .. } => {
                lines.push(format!("  [PUSH]  {path}: {n} commits"));
                pushed += 1;
            }
            Outcome::Done { .. } | Outcome::Nothing => {}
        }
    }
    lines.push(format!(
        "Push complete: {pushed} pushed, {skipped} skipped, {failed} failed"
    ));
    lines
}

/// Formats `sync` results.
#[must_use]
pub fn render_sync(reports: &[ActionReport]) -> Vec<String> {
    let (mut synced, mut skipped, mut failed) = (0, 0, 0);
    let mut lines = Vec::new();
    for report in reports {
        let path = report.path.display();
        match &report.outcome {
            Outcome::Error(message) => {
                lines.push(format!("  [ERROR] {path}: {message}"));
                failed += 1;
            }
            Outcome::Skipped(reason) => {
                lines.push(format!("  [SKIP]  {path}: {reason}"));
                skipped += 1;
            }
            Outcome::Failed { step, message } => {
                // A failed push means any planned pull already succeeded.
                if report.behind > 0 {
                    lines.push(format!("  [PULL]  {path}: {} behind", report.behind));
                }
                if *step == Step::Push {
                    lines.push(format!("  [PUSH]  {path}: {} ahead", report.ahead));
                }
                lines.push(format!("    error: {message}"));
                failed += 1;
            }
            Outcome::Done { pulled, pushed } => {
                if let Some(n) = pulled {
                    lines.push(format!("  [PULL]  {path}: {n} behind"));
                }
                if let Some(n) = pushed {
                    lines.push(format!("  [PUSH]  {path}: {n} ahead"));
                }
                synced += 1;
            }
            Outcome::Nothing => synced += 1,
        }
    }
    lines.push(format!(
        "Sync complete: {synced} synced, {skipped} skipped, {failed} failed"
    ));
    lines
}
