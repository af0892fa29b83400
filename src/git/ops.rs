// tugboat: multi-repository management for Gitea and GitHub
//
// SPDX-FileCopyrightText: 2026 Tugboat Developers
// SPDX-License-Identifier: GPL-3.0-or-later

//! Mutating git operations: pull, push and clone.

use std::path::Path;
use tracing::{debug, info};

use super::backend::GitRunner;
use crate::error::{GitError, TugResult};

/// Pulls the current branch, fast-forward only when `ff_only`.
///
/// # Errors
///
/// Returns an error if git cannot be started or the pull fails.
pub async fn pull(git: &dyn GitRunner, repo: &Path, ff_only: bool) -> TugResult<()> {
    let args: &[&str] = if ff_only {
        &["pull", "--ff-only"]
    } else {
        &["pull"]
    };
    debug!(repo = %repo.display(), ff_only, "pulling");
    git.run(repo, args).await?.check(args)?;
    Ok(())
}

/// Pushes the current branch to its upstream.
///
/// # Errors
///
/// Returns an error if git cannot be started or the push fails.
pub async fn push(git: &dyn GitRunner, repo: &Path) -> TugResult<()> {
    let args = ["push"];
    debug!(repo = %repo.display(), "pushing");
    git.run(repo, &args).await?.check(&args)?;
    Ok(())
}

/// Clones `url` into `dest`, creating missing parent directories first.
///
/// # Errors
///
/// Returns `GitError::CloneFailed` if the clone fails, an I/O error if the
/// parent directory cannot be created, or a process error if git cannot be
/// started.
pub async fn clone(git: &dyn GitRunner, url: &str, dest: &Path) -> TugResult<()> {
    let parent = dest.parent().unwrap_or_else(|| Path::new("."));
    if !parent.as_os_str().is_empty() {
        std::fs::create_dir_all(parent)?;
    }
    let dest_arg = dest.to_string_lossy();
    let args = ["clone", "--quiet", url, &*dest_arg];

    info!(url, dest = %dest.display(), "cloning");
    let output = git.run(parent, &args).await?;
    if output.success() {
        return Ok(());
    }
    Err(GitError::CloneFailed {
        url: url.to_string(),
        message: output.failure_message(),
    }
    .into())
}
