// tugboat: multi-repository management for Gitea and GitHub
//
// SPDX-FileCopyrightText: 2026 Tugboat Developers
// SPDX-License-Identifier: GPL-3.0-or-later

//! Target expansion: configured targets to local repositories.
//!
//! ```text
//! org target   path/            every child dir with .git
//!                a/.git   -> job(name a)
//!                b/.git   -> job(name b)
//!                notes.md    (skipped)
//!
//! repo target  path/.git        -> job(name = repo)
//!              path/.tugboat.json
//!                vendor/lib/.git -> job(name lib, org from manifest)
//!                docs/           (not cloned: status skips, clone takes)
//! ```

use std::collections::BTreeSet;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::config::Target;
use crate::error::{TargetError, TugResult};
use crate::foldout;
use crate::git::{StatusJob, is_git_repo};

/// Which foldout entries an expansion wants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpandMode {
    /// Only foldouts that are already working copies.
    Status,
    /// Only foldouts that still need to be cloned.
    Clone,
}

impl ExpandMode {
    const fn wants(self, cloned: bool) -> bool {
        match self {
            Self::Status => cloned,
            Self::Clone => !cloned,
        }
    }
}

/// A `(provider, organization)` pair used as remote index key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OrgKey {
    pub provider: String,
    pub org: String,
}

impl OrgKey {
    #[must_use]
    pub fn new(provider: impl Into<String>, org: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            org: org.into(),
        }
    }
}

impl fmt::Display for OrgKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.provider, self.org)
    }
}

/// One foldout entry resolved against its parent target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoldoutJob {
    /// `org/repo` as written in the manifest.
    pub manifest_name: String,
    pub org: String,
    pub repo: String,
    /// Target directory relative to the parent.
    pub relative: String,
    pub path: PathBuf,
}

/// Result of expanding targets for status-type commands.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Expansion {
    pub jobs: Vec<StatusJob>,
    /// Distinct keys touched by `jobs`, in first-seen order.
    pub org_keys: Vec<OrgKey>,
}

impl Expansion {
    fn push(&mut self, job: StatusJob, seen: &mut BTreeSet<OrgKey>) {
        let key = OrgKey::new(&job.provider, &job.org);
        if seen.insert(key.clone()) {
            self.org_keys.push(key);
        }
        self.jobs.push(job);
    }
}

fn ensure_exists(target: &Target) -> TugResult<()> {
    if target.path.exists() {
        return Ok(());
    }
    Err(TargetError::PathNotFound {
        name: target.name.clone(),
        path: target.path.display().to_string(),
    }
    .into())
}

/// Working copies directly under an organization directory, sorted by name.
///
/// An unreadable directory yields no repositories.
#[must_use]
pub fn org_repositories(dir: &Path) -> Vec<(String, PathBuf)> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            warn!(path = %dir.display(), error = %e, "cannot read organization directory");
            return Vec::new();
        }
    };

    let mut repos: Vec<(String, PathBuf)> = entries
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_ok_and(|t| t.is_dir()))
        .filter_map(|entry| {
            let path = entry.path();
            is_git_repo(&path).then(|| (entry.file_name().to_string_lossy().into_owned(), path))
        })
        .collect();
    repos.sort();
    repos
}

/// Resolves a repository target's foldout manifest.
///
/// # Errors
///
/// Returns a foldout error if the manifest is malformed or invalid.
pub fn foldout_jobs(target: &Target, mode: ExpandMode) -> TugResult<Vec<FoldoutJob>> {
    let Some(manifest) = foldout::load_validated(&target.path)? else {
        return Ok(Vec::new());
    };

    Ok(manifest
        .entries
        .iter()
        .map(|entry| FoldoutJob {
            manifest_name: entry.name.clone(),
            org: entry.org_or(&target.org).to_string(),
            repo: entry.repo().to_string(),
            relative: entry.target.clone(),
            path: entry.path_under(&target.path),
        })
        .filter(|job| mode.wants(is_git_repo(&job.path)))
        .collect())
}

/// Expands targets into status jobs.
///
/// # Errors
///
/// Returns `TargetError::PathNotFound` if a target directory is missing, or
/// a foldout error for a malformed or invalid manifest. Nothing is expanded
/// when any target fails.
pub fn expand_targets(targets: &[Target]) -> TugResult<Expansion> {
    let mut expansion = Expansion::default();
    let mut seen = BTreeSet::new();

    for target in targets {
        ensure_exists(target)?;

        match &target.repo {
            None => {
                for (name, path) in org_repositories(&target.path) {
                    expansion.push(
                        StatusJob {
                            path,
                            target: target.name.clone(),
                            provider: target.provider.clone(),
                            org: target.org.clone(),
                            name,
                        },
                        &mut seen,
                    );
                }
            }
            Some(repo) => {
                if is_git_repo(&target.path) {
                    expansion.push(
                        StatusJob {
                            path: target.path.clone(),
                            target: target.name.clone(),
                            provider: target.provider.clone(),
                            org: target.org.clone(),
                            name: repo.clone(),
                        },
                        &mut seen,
                    );
                }
                for job in foldout_jobs(target, ExpandMode::Status)? {
                    expansion.push(
                        StatusJob {
                            path: job.path,
                            target: target.name.clone(),
                            provider: target.provider.clone(),
                            org: job.org,
                            name: job.repo,
                        },
                        &mut seen,
                    );
                }
            }
        }
    }

    debug!(
        jobs = expansion.jobs.len(),
        orgs = expansion.org_keys.len(),
        "targets expanded"
    );
    Ok(expansion)
}
