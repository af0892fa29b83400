// tugboat: multi-repository management for Gitea and GitHub
//
// SPDX-FileCopyrightText: 2026 Tugboat Developers
// SPDX-License-Identifier: GPL-3.0-or-later

//! Command implementations.
//!
//! ```text
//! CLI args --> cmd::run_* handlers
//!   clone, list, migrate, status, sync (pull / push / sync)
//!
//! Each handler builds an Engine, runs one operation and prints the
//! lines produced by its render_* function to stdout.
//! ```

pub mod clone;
pub mod list;
pub mod migrate;
pub mod status;
pub mod sync;


use anyhow::Context;
use std::sync::Arc;
use tracing::debug;

use crate::cli::global::GlobalOptions;
use crate::config::loader;
use crate::engine::Engine;
use crate::error::Result;
use crate::git::ShellGit;
use crate::remote::build_providers;

/// Loads the configuration and wires an engine against the real git CLI
/// and provider APIs.
///
/// # Errors
///
/// Returns an error if the config cannot be loaded, a provider client cannot
/// be built or git is not installed.
pub fn build_engine(global: &GlobalOptions) -> Result<Engine> {
    let loaded = loader::load(global.config.as_deref(), global.workers)
        .context("loading config")?;
    let providers = build_providers(&loaded.config).context("building clients")?;
    let git = ShellGit::new()?;
    debug!(
        git = %git.program().display(),
        workers = loaded.config.workers,
        "engine ready"
    );
    Ok(Engine::new(Arc::new(loaded.config), providers, Arc::new(git)))
}

pub(crate) fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{line}");
    }
}
