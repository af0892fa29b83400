// tugboat: multi-repository management for Gitea and GitHub
//
// SPDX-FileCopyrightText: 2026 Tugboat Developers
// SPDX-License-Identifier: GPL-3.0-or-later

//! Status command.

use std::time::Duration;

use super::{build_engine, print_lines};
use crate::cli::global::GlobalOptions;
use crate::cli::repo::StatusArgs;
use crate::engine::StatusReport;
use crate::error::Result;

/// Number of slowest repositories listed with `--debug`.
const SLOWEST_SHOWN: usize = 10;

/// Main handler for the status command.
///
/// # Errors
///
/// Returns an error if the engine cannot be built or the targets cannot be
/// expanded.
pub async fn run_status_command(args: &StatusArgs, global: &GlobalOptions) -> Result<()> {
    let engine = build_engine(global)?;
    let report = engine.status_report(&args.targets, args.debug).await?;
    print_lines(&render_status(&report, args.debug));
    Ok(())
}

/// Formats a status report.
#[must_use]
pub fn render_status(report: &StatusReport, debug: bool) -> Vec<String> {
    let mut lines = Vec::with_capacity(report.statuses.len() + 4);

    for status in &report.statuses {
        let path = status.path.display();
        if let Some(error) = &status.error {
            lines.push(format!("  [ERROR]    {path}: {error}"));
            continue;
        }
        let flags = status.flags();
        if flags.is_empty() {
            lines.push(format!("  [CLEAN]  {path}"));
        } else {
            lines.push(format!("  {path} ({}) [{}]", status.branch, flags.join(", ")));
        }
    }

    let s = report.summary();
    lines.push(String::new());
    lines.push(format!(
        "Summary: {} clean, {} dirty, {} ahead, {} behind, {} diverged, {} errors",
        s.clean, s.dirty, s.ahead, s.behind, s.diverged, s.errors
    ));

    if !report.degraded.is_empty() {
        lines.push(String::new());
        for degraded in &report.degraded {
            lines.push(format!(
                "Remote check skipped for {}: {}",
                degraded.key, degraded.reason
            ));
        }
    }

    if debug && !report.timings.is_empty() {
        let total: Duration = report.timings.iter().map(|t| t.total).sum();
        lines.push(String::new());
        lines.push(format!(
            "Debug: {} repos, total time {total:?}",
            report.timings.len()
        ));
        for t in report.timings.iter().take(SLOWEST_SHOWN) {
            lines.push(format!(
                "  {:?}  {} (branch {:?}, fetch {:?}, status {:?}, rev-list {:?}, merge-base {:?})",
                t.total,
                t.path.display(),
                t.branch,
                t.fetch,
                t.status,
                t.rev_list,
                t.merge_base
            ));
        }
    }

    lines
}
