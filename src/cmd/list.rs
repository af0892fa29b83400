// tugboat: multi-repository management for Gitea and GitHub
//
// SPDX-FileCopyrightText: 2026 Tugboat Developers
// SPDX-License-Identifier: GPL-3.0-or-later

//! List command.

use super::{build_engine, print_lines};
use crate::cli::global::GlobalOptions;
use crate::cli::repo::ListArgs;
use crate::engine::TargetListing;
use crate::error::Result;

/// Main handler for the list command.
///
/// # Errors
///
/// Returns an error if the engine cannot be built or a foldout manifest is
/// unusable.
pub async fn run_list_command(args: &ListArgs, global: &GlobalOptions) -> Result<()> {
    let engine = build_engine(global)?;
    let listings = engine.list(&args.targets, args.include_archived).await?;
    for listing in &listings {
        print_lines(&render_listing(listing));
    }
    Ok(())
}

/// Formats one target's listing, followed by a blank line.
#[must_use]
pub fn render_listing(listing: &TargetListing) -> Vec<String> {
    let t = &listing.target;
    let mut lines = vec![format!(
        "Target: {} ({}/{}) path={}",
        t.name,
        t.provider,
        t.org,
        t.path.display()
    )];

    if let Some(error) = &listing.error {
        lines.push(format!("  [ERROR] listing org: {error}"));
    }

    for entry in &listing.entries {
        let mark = if entry.cloned { "[x]" } else { "[ ]" };
        let line = if let Some(target) = &entry.foldout_target {
            format!("  {mark} {} -> {target}", entry.name)
        } else if entry.orphan {
            format!("  {mark} {} (orphan)", entry.name)
        } else if entry.archived {
            format!("  {mark} {} (archived)", entry.name)
        } else {
            format!("  {mark} {}", entry.name)
        };
        lines.push(line);
    }

    lines.push(String::new());
    lines
}
