// tugboat: multi-repository management for Gitea and GitHub
//
// SPDX-FileCopyrightText: 2026 Tugboat Developers
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI module for tugboat using clap derive.
//!
//! # Command Structure
//!
//! ```text
//! tugboat [global options] <command>
//! clone  | c   [-E] [-a] [targets...]
//! sync   | s   [targets...]
//! status | st  [-d] [targets...]
//! list   | ls  [-a] [targets...]
//! pull         [targets...]
//! push         [targets...]
//! migrate      [--write]
//! version
//! ```

pub mod global;
pub mod repo;


use crate::cli::global::GlobalOptions;
use crate::cli::repo::{CloneArgs, ListArgs, MigrateArgs, StatusArgs, TargetArgs};
use clap::{Parser, Subcommand};

/// Multi-repository management for Gitea and GitHub.
#[derive(Debug, Parser)]
#[command(
    name = "tugboat",
    author,
    version,
    about = "Multi-repository management for Gitea and GitHub",
    long_about = "tugboat Copyright (C) 2026 Tugboat Developers\n\
                  This program comes with ABSOLUTELY NO WARRANTY\n\
                  This is free software, and you are welcome to redistribute it\n\
                  under certain conditions; see LICENSE for details.\n\n\
                  Keeps many local working copies in step with the organizations\n\
                  and repositories they mirror on Gitea and GitHub.",
    after_help = "CONFIGURATION:\n\n\
                  tugboat reads --config, then $TUGBOAT_CONFIG, then\n\
                  $XDG_CONFIG_HOME/tugboat/config.json, ~/.config/tugboat/config.json\n\
                  and ~/.tugboat.json. Tokens may also come from $GITEA_TOKEN and\n\
                  $GITHUB_TOKEN. Run `tugboat migrate` to upgrade a v1 config."
)]
pub struct Cli {
    /// Global options shared by all commands
    #[command(flatten)]
    pub global: GlobalOptions,

    /// Command to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Clones missing repositories of the selected targets.
    #[command(visible_alias = "c")]
    Clone(CloneArgs),

    /// Pulls then pushes every repository that can be synced safely.
    #[command(visible_alias = "s")]
    Sync(TargetArgs),

    /// Shows the state of every working copy, foldouts included.
    #[command(visible_alias = "st")]
    Status(StatusArgs),

    /// Lists remote repositories against local working copies.
    #[command(visible_alias = "ls")]
    List(ListArgs),

    /// Pulls every repository.
    Pull(TargetArgs),

    /// Pushes repositories that are ahead of their remote.
    Push(TargetArgs),

    /// Migrates a v1 config to the v2 format.
    Migrate(MigrateArgs),

    /// Shows the version.
    Version,
}

/// Parses command-line arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}

/// Parses command-line arguments from an iterator.
pub fn parse_from<I, T>(iter: I) -> Cli
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::parse_from(iter)
}

/// Tries to parse command-line arguments, returning an error on failure.
///
/// # Errors
///
/// Returns a `clap::Error` if the arguments are invalid or if help/version information
/// was requested.
pub fn try_parse() -> Result<Cli, clap::Error> {
    Cli::try_parse()
}
