// tugboat: multi-repository management for Gitea and GitHub
//
// SPDX-FileCopyrightText: 2026 Tugboat Developers
// SPDX-License-Identifier: GPL-3.0-or-later

//! Clone command.

use super::{build_engine, print_lines};
use crate::cli::global::GlobalOptions;
use crate::cli::repo::CloneArgs;
use crate::engine::{CloneOutcome, CloneReport, CloneResult, ParentClone};
use crate::error::Result;

/// Main handler for the clone command.
///
/// # Errors
///
/// Returns an error if the engine cannot be built, a listing fails or a
/// repository target cannot be cloned.
pub async fn run_clone_command(args: &CloneArgs, global: &GlobalOptions) -> Result<()> {
    let engine = build_engine(global)?;
    let reports = engine.clone_missing(&args.targets, args.filter()).await?;
    for report in &reports {
        print_lines(&render_clone(report));
    }
    Ok(())
}

fn push_results(lines: &mut Vec<String>, results: &[CloneResult]) -> (usize, usize) {
    let (mut cloned, mut failed) = (0, 0);
    for result in results {
        match &result.outcome {
            CloneOutcome::Cloned => {
                lines.push(format!("  [CLONED] {}", result.name));
                cloned += 1;
            }
            CloneOutcome::Failed(message) => {
                lines.push(format!("  [ERROR]  {}: {message}", result.name));
                failed += 1;
            }
        }
    }
    (cloned, failed)
}

/// Formats the clone results of one target.
#[must_use]
pub fn render_clone(report: &CloneReport) -> Vec<String> {
    let mut lines = Vec::new();
    match report {
        CloneReport::Org { org, results, .. } => {
            if results.is_empty() {
                lines.push(format!("Org {org}: nothing to clone"));
                return lines;
            }
            lines.push(format!("Org {org}: cloning {} repositories...", results.len()));
            let (cloned, failed) = push_results(&mut lines, results);
            lines.push(format!(
                "Org {org}: clone complete ({cloned} cloned, {failed} failed)"
            ));
        }
        CloneReport::Repo {
            full_name,
            path,
            parent,
            foldouts,
            missing,
            ..
        } => {
            let path = path.display();
            match parent {
                ParentClone::SkippedEmpty => {
                    lines.push(format!("Skipping empty repo: {full_name}"));
                    return lines;
                }
                ParentClone::SkippedArchived => {
                    lines.push(format!("Skipping archived repo: {full_name}"));
                    return lines;
                }
                ParentClone::Cloned => lines.push(format!("Cloned {full_name} -> {path}")),
                ParentClone::Exists => lines.push(format!("Exists: {path}")),
            }
            for name in missing {
                lines.push(format!("  [MISS] {name} not found"));
            }
            if !foldouts.is_empty() {
                lines.push(format!(
                    "Foldout: cloning {} repos under {path}",
                    foldouts.len()
                ));
                push_results(&mut lines, foldouts);
            }
        }
    }
    lines
}
