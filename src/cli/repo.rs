// tugboat: multi-repository management for Gitea and GitHub
//
// SPDX-FileCopyrightText: 2026 Tugboat Developers
// SPDX-License-Identifier: GPL-3.0-or-later

//! Arguments for the repository commands.

use clap::Args;

use crate::engine::CloneFilter;

/// Target selection shared by `sync`, `pull` and `push`.
#[derive(Debug, Clone, Default, Args)]
pub struct TargetArgs {
    /// Targets to operate on (default: all configured targets).
    #[arg(value_name = "TARGET")]
    pub targets: Vec<String>,
}

/// Arguments for the `clone` command.
#[derive(Debug, Clone, Default, Args)]
pub struct CloneArgs {
    /// Skip repositories without any commits.
    #[arg(short = 'E', long)]
    pub exclude_empty: bool,

    /// Also clone archived repositories.
    #[arg(short = 'a', long)]
    pub include_archived: bool,

    /// Targets to clone (default: all configured targets).
    #[arg(value_name = "TARGET")]
    pub targets: Vec<String>,
}

impl CloneArgs {
    #[must_use]
    pub const fn filter(&self) -> CloneFilter {
        CloneFilter {
            exclude_empty: self.exclude_empty,
            include_archived: self.include_archived,
        }
    }
}

/// Arguments for the `status` command.
#[derive(Debug, Clone, Default, Args)]
pub struct StatusArgs {
    /// Show per-repository timing information.
    #[arg(short = 'd', long)]
    pub debug: bool,

    #[arg(value_name = "TARGET")]
    pub targets: Vec<String>,
}

/// Arguments for the `list` command.
#[derive(Debug, Clone, Default, Args)]
pub struct ListArgs {
    /// Show archived repositories.
    #[arg(short = 'a', long)]
    pub include_archived: bool,

    #[arg(value_name = "TARGET")]
    pub targets: Vec<String>,
}

/// Arguments for the `migrate` command.
#[derive(Debug, Clone, Default, Args)]
pub struct MigrateArgs {
    /// Rewrite the config file in place, keeping a `.v1.backup` copy.
    #[arg(long)]
    pub write: bool,
}
