// tugboat: multi-repository management for Gitea and GitHub
//
// SPDX-FileCopyrightText: 2026 Tugboat Developers
// SPDX-License-Identifier: GPL-3.0-or-later

//! Per-repository status snapshot.
//!
//! ```text
//! rev-parse --abbrev-ref HEAD         fail -> error "getting branch: .."
//!        |
//! fetch --quiet                       fail -> remote_error (continue)
//!        |
//! status --porcelain                  fail -> error "checking status: .."
//!        |
//! rev-list --left-right --count       fail -> ahead/behind stay 0
//!   <branch>...origin/<branch>
//!        |
//! merge-base --is-ancestor            only when behind > 0
//!   <branch> origin/<branch>
//! ```
//!
//! Ahead/behind come from whatever remote-tracking refs exist locally, so
//! after a failed fetch they may be stale; `remote_error` marks that case.

use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::debug;

use super::backend::{GitOutput, GitRunner};
use crate::error::TugResult;

/// One repository to inspect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusJob {
    pub path: PathBuf,
    /// Name of the configured target this repository came from.
    pub target: String,
    pub provider: String,
    pub org: String,
    /// Remote repository name used for reconciliation.
    pub name: String,
}

/// Snapshot of one repository.
///
/// When `error` is set no other derived field is meaningful.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepoStatus {
    pub path: PathBuf,
    pub target: String,
    pub provider: String,
    pub org: String,
    pub name: String,
    pub branch: String,
    pub dirty: bool,
    pub ahead: u32,
    pub behind: u32,
    pub can_fast_forward: bool,
    pub archived: bool,
    pub orphan: bool,
    /// First line of the fetch error, if the fetch failed.
    pub remote_error: Option<String>,
    pub error: Option<String>,
}

impl RepoStatus {
    fn for_job(job: &StatusJob) -> Self {
        Self {
            path: job.path.clone(),
            target: job.target.clone(),
            provider: job.provider.clone(),
            org: job.org.clone(),
            name: job.name.clone(),
            ..Self::default()
        }
    }

    /// A status whose inspection failed.
    #[must_use]
    pub fn failed(job: &StatusJob, error: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
            ..Self::for_job(job)
        }
    }

    #[must_use]
    pub const fn is_error(&self) -> bool {
        self.error.is_some()
    }

    /// Behind the remote without a fast-forward path.
    #[must_use]
    pub const fn is_diverged(&self) -> bool {
        self.behind > 0 && !self.can_fast_forward
    }

    /// Human-readable condition flags, empty for a clean repository.
    #[must_use]
    pub fn flags(&self) -> Vec<String> {
        let mut flags = Vec::new();
        if self.dirty {
            flags.push("dirty".to_string());
        }
        if self.ahead > 0 {
            flags.push(format!("{} ahead", self.ahead));
        }
        if self.behind > 0 {
            flags.push(format!("{} behind", self.behind));
            if !self.can_fast_forward {
                flags.push("diverged".to_string());
            }
        }
        if let Some(remote_error) = &self.remote_error {
            flags.push(format!("remote: {remote_error}"));
        }
        if self.archived {
            flags.push("archived".to_string());
        }
        if self.orphan {
            flags.push("orphan".to_string());
        }
        flags
    }
}

/// Phase durations for one repository.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepoTiming {
    pub path: PathBuf,
    pub total: Duration,
    pub branch: Duration,
    pub fetch: Duration,
    pub status: Duration,
    pub rev_list: Duration,
    pub merge_base: Duration,
}

fn describe(result: &TugResult<GitOutput>) -> Option<String> {
    match result {
        Ok(output) if output.success() => None,
        Ok(output) => Some(output.failure_message()),
        Err(e) => Some(e.to_string()),
    }
}

fn parse_counts(stdout: &str) -> Option<(u32, u32)> {
    let mut fields = stdout.split_whitespace();
    let ahead = fields.next()?.parse().ok()?;
    let behind = fields.next()?.parse().ok()?;
    if fields.next().is_some() {
        return None;
    }
    Some((ahead, behind))
}

/// Computes the status of one repository.
///
/// Never fails: problems are recorded on the returned status. When `timing`
/// is given, each phase's duration is written to it.
pub async fn repo_status(
    git: &dyn GitRunner,
    job: &StatusJob,
    mut timing: Option<&mut RepoTiming>,
) -> RepoStatus {
    let started = Instant::now();
    let path = job.path.as_path();
    let mut status = RepoStatus::for_job(job);
    if let Some(t) = timing.as_deref_mut() {
        t.path = job.path.clone();
    }

    let phase = Instant::now();
    let branch = git.run(path, &["rev-parse", "--abbrev-ref", "HEAD"]).await;
    if let Some(t) = timing.as_deref_mut() {
        t.branch = phase.elapsed();
    }
    if let Some(message) = describe(&branch) {
        debug!(repo = %path.display(), error = %message, "branch lookup failed");
        status.error = Some(format!("getting branch: {message}"));
        return finish(status, timing, started);
    }
    status.branch = branch.map(|o| o.stdout.trim().to_string()).unwrap_or_default();

    let phase = Instant::now();
    let fetch = git.run(path, &["fetch", "--quiet"]).await;
    if let Some(t) = timing.as_deref_mut() {
        t.fetch = phase.elapsed();
    }
    if let Some(message) = describe(&fetch) {
        debug!(repo = %path.display(), error = %message, "fetch failed");
        status.remote_error = Some(message);
    }

    let phase = Instant::now();
    let porcelain = git.run(path, &["status", "--porcelain"]).await;
    if let Some(t) = timing.as_deref_mut() {
        t.status = phase.elapsed();
    }
    if let Some(message) = describe(&porcelain) {
        status.error = Some(format!("checking status: {message}"));
        return finish(status, timing, started);
    }
    status.dirty = porcelain.is_ok_and(|o| !o.stdout.trim().is_empty());

    let upstream = format!("origin/{}", status.branch);
    let range = format!("{}...{upstream}", status.branch);
    let phase = Instant::now();
    let counts = git
        .run(path, &["rev-list", "--left-right", "--count", range.as_str()])
        .await;
    if let Some(t) = timing.as_deref_mut() {
        t.rev_list = phase.elapsed();
    }
    if let Ok(output) = &counts
        && output.success()
        && let Some((ahead, behind)) = parse_counts(&output.stdout)
    {
        status.ahead = ahead;
        status.behind = behind;
    }

    let phase = Instant::now();
    status.can_fast_forward = if status.behind > 0 {
        let ancestor = git
            .run(
                path,
                &[
                    "merge-base",
                    "--is-ancestor",
                    status.branch.as_str(),
                    upstream.as_str(),
                ],
            )
            .await
            .is_ok_and(|o| o.success());
        ancestor || status.ahead == 0
    } else {
        true
    };
    if let Some(t) = timing.as_deref_mut() {
        t.merge_base = phase.elapsed();
    }

    debug!(
        repo = %path.display(),
        branch = %status.branch,
        dirty = status.dirty,
        ahead = status.ahead,
        behind = status.behind,
        "status computed"
    );
    finish(status, timing, started)
}

fn finish(status: RepoStatus, timing: Option<&mut RepoTiming>, started: Instant) -> RepoStatus {
    if let Some(t) = timing {
        t.total = started.elapsed();
    }
    status
}
