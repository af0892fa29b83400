// tugboat: multi-repository management for Gitea and GitHub
//
// SPDX-FileCopyrightText: 2026 Tugboat Developers
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git operations module.
//!
//! ```text
//!        Public API
//!    status.rs      ops.rs
//!   repo_status   pull/push/clone
//!         \         /
//!          v       v
//!     ,------------------,
//!     | backend (trait)  |
//!     '--------+---------'
//!              |
//!              v
//!          GitRunner
//!              |
//!              v
//!          ShellGit (git CLI, tokio::process)
//! ```
//!
//! Working-copy detection is a plain `.git` directory check; everything
//! else goes through [`backend::GitRunner`] so it can be scripted in tests.

pub mod backend;
pub mod ops;
pub mod status;


use std::path::Path;

pub use backend::{GitOutput, GitRunner, ShellGit};
pub use status::{RepoStatus, RepoTiming, StatusJob, repo_status};

/// Returns true if `path` contains a `.git` directory.
#[must_use]
pub fn is_git_repo(path: &Path) -> bool {
    path.join(".git").is_dir()
}
