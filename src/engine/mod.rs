// tugboat: multi-repository management for Gitea and GitHub
//
// SPDX-FileCopyrightText: 2026 Tugboat Developers
// SPDX-License-Identifier: GPL-3.0-or-later

//! Repository reconciliation engine.
//!
//! ```text
//! targets_for(names)
//!        |
//!        v
//! expand_targets ---------> StatusJob[] + OrgKey[]
//!        |                        |
//!        v (pool)                 v (pool)
//! repo_status per job       RemoteIndex::build
//!        \                       /
//!         v                     v
//!          RemoteIndex::annotate
//!                   |
//!                   v
//!     StatusReport (sorted by target, name)
//!                   |
//!      +------------+-------------+
//!      v            v             v
//!  decide_pull  decide_push   plan_sync
//!      \            |             /
//!       v           v            v
//!        execute (pool) -> ActionReport[]
//! ```
//!
//! Clone and list work from the remote side instead: they ask the provider
//! what exists and compare it with the working copies on disk.

pub mod decision;
pub mod expand;
pub mod reconcile;

#[cfg(test)]
mod tests;

use anyhow::Context;
use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info, instrument};

use crate::config::{CloneProtocol, Config, Target};
use crate::error::{RemoteError, Result, TargetError, TugResult};
use crate::git::backend::GitRunner;
use crate::git::{RepoStatus, RepoTiming, StatusJob, is_git_repo, ops, repo_status};
use crate::pool;
use crate::remote::{ProviderMap, RemoteProvider, RemoteRepository};

use decision::{ActionReport, Plan};
use expand::{ExpandMode, expand_targets, foldout_jobs, org_repositories};
use reconcile::{DegradedOrg, RemoteIndex};

/// Statuses of every selected repository plus run diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusReport {
    /// Sorted by target name, then repository name.
    pub statuses: Vec<RepoStatus>,
    /// Slowest first; empty unless requested.
    pub timings: Vec<RepoTiming>,
    pub degraded: Vec<DegradedOrg>,
}

/// Counts shown under a status report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusSummary {
    pub clean: usize,
    pub dirty: usize,
    pub ahead: usize,
    pub behind: usize,
    pub diverged: usize,
    pub errors: usize,
}

impl StatusReport {
    #[must_use]
    pub fn summary(&self) -> StatusSummary {
        let mut summary = StatusSummary::default();
        for status in &self.statuses {
            if status.is_error() {
                summary.errors += 1;
                continue;
            }
            if status.flags().is_empty() {
                summary.clean += 1;
            }
            summary.dirty += usize::from(status.dirty);
            summary.ahead += usize::from(status.ahead > 0);
            summary.behind += usize::from(status.behind > 0);
            summary.diverged += usize::from(status.is_diverged());
        }
        summary
    }
}

/// Filters for `clone`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CloneFilter {
    pub exclude_empty: bool,
    pub include_archived: bool,
}

impl CloneFilter {
    fn accepts(self, repo: &RemoteRepository) -> bool {
        !(repo.empty && self.exclude_empty) && !(repo.archived && !self.include_archived)
    }
}

/// Result of one clone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CloneOutcome {
    Cloned,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloneResult {
    pub name: String,
    pub path: PathBuf,
    pub outcome: CloneOutcome,
}

/// What happened to a repository target's own working copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParentClone {
    Cloned,
    Exists,
    SkippedEmpty,
    SkippedArchived,
}

/// Per-target clone results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CloneReport {
    Org {
        target: String,
        org: String,
        /// Sorted by name.
        results: Vec<CloneResult>,
    },
    Repo {
        target: String,
        full_name: String,
        path: PathBuf,
        parent: ParentClone,
        foldouts: Vec<CloneResult>,
        /// Foldout entries that do not exist on the remote.
        missing: Vec<String>,
    },
}

/// One line of a listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListEntry {
    pub name: String,
    pub cloned: bool,
    pub archived: bool,
    pub orphan: bool,
    /// Local directory for foldout entries.
    pub foldout_target: Option<String>,
}

/// Listing of one target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetListing {
    pub target: Target,
    pub entries: Vec<ListEntry>,
    pub error: Option<String>,
}

#[derive(Debug, Clone)]
struct CloneJob {
    name: String,
    url: String,
    path: PathBuf,
}

/// Runs reconciliation operations for a configuration.
pub struct Engine {
    config: Arc<Config>,
    providers: ProviderMap,
    git: Arc<dyn GitRunner>,
    workers: usize,
}

impl Engine {
    /// Creates an engine using the configuration's worker count.
    #[must_use]
    pub fn new(config: Arc<Config>, providers: ProviderMap, git: Arc<dyn GitRunner>) -> Self {
        let workers = config.workers;
        Self {
            config,
            providers,
            git,
            workers,
        }
    }

    /// Resolves target names; no names selects every target.
    ///
    /// Duplicates are dropped, order follows the request.
    ///
    /// # Errors
    ///
    /// Returns `TargetError::Unknown` listing every unknown name.
    pub fn targets_for(&self, names: &[String]) -> TugResult<Vec<Target>> {
        if names.is_empty() {
            return Ok(self.config.targets.clone());
        }

        let mut selected = Vec::new();
        let mut missing = Vec::new();
        let mut seen = BTreeSet::new();
        for name in names {
            match self.config.target(name) {
                Some(target) => {
                    if seen.insert(name.as_str()) {
                        selected.push(target.clone());
                    }
                }
                None => missing.push(name.clone()),
            }
        }

        if missing.is_empty() {
            Ok(selected)
        } else {
            Err(TargetError::Unknown(missing).into())
        }
    }

    fn provider(&self, id: &str) -> TugResult<&Arc<dyn RemoteProvider>> {
        self.providers.get(id).ok_or_else(|| {
            RemoteError::NoClient {
                provider: id.to_string(),
            }
            .into()
        })
    }

    fn protocol(&self, provider: &str) -> CloneProtocol {
        self.config
            .providers
            .get(provider)
            .map(|p| p.options.clone.protocol)
            .unwrap_or_default()
    }

    /// Computes the status of every repository in the selected targets.
    ///
    /// # Errors
    ///
    /// Returns an error for unknown target names, a missing target path or
    /// an unusable foldout manifest.
    #[instrument(skip(self), level = "debug")]
    pub async fn status_report(&self, names: &[String], with_timings: bool) -> Result<StatusReport> {
        let targets = self.targets_for(names)?;
        let expansion = expand_targets(&targets)?;
        if expansion.jobs.is_empty() {
            return Ok(StatusReport::default());
        }

        let git = Arc::clone(&self.git);
        let results = pool::run(expansion.jobs, self.workers, move |job: StatusJob| {
            let git = Arc::clone(&git);
            async move {
                let mut timing = with_timings.then(RepoTiming::default);
                let status = repo_status(git.as_ref(), &job, timing.as_mut()).await;
                (status, timing)
            }
        })
        .await;

        let (mut statuses, timings): (Vec<_>, Vec<_>) = results.into_iter().unzip();
        let mut timings: Vec<RepoTiming> = timings.into_iter().flatten().collect();

        let index = RemoteIndex::build(&self.providers, expansion.org_keys, self.workers).await;
        index.annotate(&mut statuses);

        statuses.sort_by(|a, b| (&a.target, &a.name).cmp(&(&b.target, &b.name)));
        timings.sort_by(|a, b| b.total.cmp(&a.total));

        Ok(StatusReport {
            statuses,
            timings,
            degraded: index.degraded(),
        })
    }

    async fn apply_plans<F>(&self, names: &[String], decide: F) -> Result<Vec<ActionReport>>
    where
        F: Fn(&RepoStatus, bool) -> Plan,
    {
        let report = self.status_report(names, false).await?;
        let work: Vec<(RepoStatus, Plan)> = report
            .statuses
            .into_iter()
            .map(|status| {
                let plan = decide(&status, self.config.ff_only(&status.provider));
                (status, plan)
            })
            .collect();

        let git = Arc::clone(&self.git);
        let mut reports = pool::run(work, self.workers, move |(status, plan)| {
            let git = Arc::clone(&git);
            async move { decision::execute(git.as_ref(), &status, plan).await }
        })
        .await;
        reports.sort_by(|a, b| (&a.target, &a.name).cmp(&(&b.target, &b.name)));
        Ok(reports)
    }

    /// Pulls every repository whose status could be computed.
    ///
    /// # Errors
    ///
    /// Returns the same per-run errors as [`Engine::status_report`].
    pub async fn pull(&self, names: &[String]) -> Result<Vec<ActionReport>> {
        self.apply_plans(names, decision::decide_pull).await
    }

    /// Pushes repositories that are ahead and not behind.
    ///
    /// # Errors
    ///
    /// Returns the same per-run errors as [`Engine::status_report`].
    pub async fn push(&self, names: &[String]) -> Result<Vec<ActionReport>> {
        self.apply_plans(names, |status, _| decision::decide_push(status))
            .await
    }

    /// Pulls then pushes every repository that can be synced safely.
    ///
    /// # Errors
    ///
    /// Returns the same per-run errors as [`Engine::status_report`].
    pub async fn sync(&self, names: &[String]) -> Result<Vec<ActionReport>> {
        self.apply_plans(names, decision::plan_sync).await
    }

    async fn run_clones(&self, jobs: Vec<CloneJob>) -> Vec<CloneResult> {
        let git = Arc::clone(&self.git);
        let mut results = pool::run(jobs, self.workers, move |job: CloneJob| {
            let git = Arc::clone(&git);
            async move {
                let outcome = match ops::clone(git.as_ref(), &job.url, &job.path).await {
                    Ok(()) => CloneOutcome::Cloned,
                    Err(e) => CloneOutcome::Failed(e.to_string()),
                };
                CloneResult {
                    name: job.name,
                    path: job.path,
                    outcome,
                }
            }
        })
        .await;
        results.sort_by(|a, b| a.name.cmp(&b.name));
        results
    }

    /// Clones missing repositories for the selected targets.
    ///
    /// # Errors
    ///
    /// Returns an error for unknown targets, a failed remote call, a missing
    /// repository target on the remote, a failed clone of a repository
    /// target, or an unusable foldout manifest.
    pub async fn clone_missing(&self, names: &[String], filter: CloneFilter) -> Result<Vec<CloneReport>> {
        let targets = self.targets_for(names)?;
        let mut reports = Vec::with_capacity(targets.len());
        for target in &targets {
            let report = if target.is_org() {
                self.clone_org(target, filter).await?
            } else {
                self.clone_repo(target, filter).await?
            };
            reports.push(report);
        }
        Ok(reports)
    }

    async fn clone_org(&self, target: &Target, filter: CloneFilter) -> Result<CloneReport> {
        let client = self.provider(&target.provider)?;
        let mut repos = client
            .list_org_repos(&target.org)
            .await
            .with_context(|| format!("listing repos for {}", target.org))?;
        repos.sort_by(|a, b| a.name.cmp(&b.name));

        std::fs::create_dir_all(&target.path)
            .with_context(|| format!("creating directory {}", target.path.display()))?;

        let protocol = self.protocol(&target.provider);
        let jobs: Vec<CloneJob> = repos
            .iter()
            .filter(|repo| filter.accepts(repo))
            .map(|repo| CloneJob {
                name: repo.name.clone(),
                url: repo.clone_url_for(protocol).to_string(),
                path: target.path.join(&repo.name),
            })
            .filter(|job| !is_git_repo(&job.path))
            .collect();

        info!(org = %target.org, count = jobs.len(), "cloning organization");
        Ok(CloneReport::Org {
            target: target.name.clone(),
            org: target.org.clone(),
            results: self.run_clones(jobs).await,
        })
    }

    async fn clone_repo(&self, target: &Target, filter: CloneFilter) -> Result<CloneReport> {
        let repo_name = target.repo.as_deref().unwrap_or_default();
        let full_name = format!("{}/{repo_name}", target.org);
        let client = self.provider(&target.provider)?;
        let remote = client
            .get_repo(&target.org, repo_name)
            .await
            .with_context(|| format!("fetching repo {full_name}"))?
            .ok_or_else(|| TargetError::RepoNotFound {
                org: target.org.clone(),
                repo: repo_name.to_string(),
            })?;

        let skipped = |parent: ParentClone| CloneReport::Repo {
            target: target.name.clone(),
            full_name: full_name.clone(),
            path: target.path.clone(),
            parent,
            foldouts: Vec::new(),
            missing: Vec::new(),
        };
        if remote.empty && filter.exclude_empty {
            return Ok(skipped(ParentClone::SkippedEmpty));
        }
        if remote.archived && !filter.include_archived {
            return Ok(skipped(ParentClone::SkippedArchived));
        }

        if let Some(parent_dir) = target.path.parent() {
            std::fs::create_dir_all(parent_dir)
                .with_context(|| format!("creating directory {}", parent_dir.display()))?;
        }

        let protocol = self.protocol(&target.provider);
        let parent = if is_git_repo(&target.path) {
            ParentClone::Exists
        } else {
            ops::clone(
                self.git.as_ref(),
                remote.clone_url_for(protocol),
                &target.path,
            )
            .await
            .with_context(|| format!("cloning {full_name}"))?;
            ParentClone::Cloned
        };

        let mut jobs = Vec::new();
        let mut missing = Vec::new();
        for foldout in foldout_jobs(target, ExpandMode::Clone)? {
            let record = client
                .get_repo(&foldout.org, &foldout.repo)
                .await
                .with_context(|| format!("fetching foldout repo {}", foldout.manifest_name))?;
            let Some(record) = record else {
                debug!(repo = %foldout.manifest_name, "foldout repository not found");
                missing.push(foldout.manifest_name);
                continue;
            };
            if filter.accepts(&record) {
                jobs.push(CloneJob {
                    name: foldout.manifest_name,
                    url: record.clone_url_for(protocol).to_string(),
                    path: foldout.path,
                });
            }
        }

        Ok(CloneReport::Repo {
            target: target.name.clone(),
            full_name,
            path: target.path.clone(),
            parent,
            foldouts: self.run_clones(jobs).await,
            missing,
        })
    }

    /// Lists remote and local repositories per target.
    ///
    /// # Errors
    ///
    /// Returns an error for unknown targets or an unusable foldout manifest.
    pub async fn list(&self, names: &[String], include_archived: bool) -> Result<Vec<TargetListing>> {
        let targets = self.targets_for(names)?;
        let mut listings = Vec::with_capacity(targets.len());
        for target in targets {
            let listing = if target.is_org() {
                self.list_org(target, include_archived).await
            } else {
                list_repo(target)?
            };
            listings.push(listing);
        }
        Ok(listings)
    }

    async fn list_org(&self, target: Target, include_archived: bool) -> TargetListing {
        let local: BTreeSet<String> = org_repositories(&target.path)
            .into_iter()
            .map(|(name, _)| name)
            .collect();

        let remote = match self.provider(&target.provider) {
            Ok(client) => client.list_org_repos(&target.org).await,
            Err(e) => Err(e),
        };

        let (entries, error) = match remote {
            Ok(repos) => {
                let remote: BTreeMap<String, RemoteRepository> =
                    repos.into_iter().map(|r| (r.name.clone(), r)).collect();
                let mut entries: Vec<ListEntry> = remote
                    .values()
                    .filter(|r| include_archived || !r.archived)
                    .map(|r| ListEntry {
                        name: r.name.clone(),
                        cloned: local.contains(&r.name),
                        archived: r.archived,
                        orphan: false,
                        foldout_target: None,
                    })
                    .collect();
                entries.extend(local.iter().filter(|n| !remote.contains_key(*n)).map(|n| {
                    ListEntry {
                        name: n.clone(),
                        cloned: true,
                        archived: false,
                        orphan: true,
                        foldout_target: None,
                    }
                }));
                (entries, None)
            }
            Err(e) => {
                let entries = local
                    .iter()
                    .map(|n| ListEntry {
                        name: n.clone(),
                        cloned: true,
                        archived: false,
                        orphan: false,
                        foldout_target: None,
                    })
                    .collect();
                (entries, Some(e.to_string()))
            }
        };

        TargetListing {
            target,
            entries,
            error,
        }
    }
}

fn list_repo(target: Target) -> Result<TargetListing> {
    let mut entries = vec![ListEntry {
        name: target.repo.clone().unwrap_or_default(),
        cloned: is_git_repo(&target.path),
        archived: false,
        orphan: false,
        foldout_target: None,
    }];

    if let Some(manifest) = crate::foldout::load(&target.path)? {
        entries.extend(manifest.entries.into_iter().map(|entry| {
            let cloned = is_git_repo(&entry.path_under(&target.path));
            ListEntry {
                name: entry.name,
                cloned,
                archived: false,
                orphan: false,
                foldout_target: Some(entry.target),
            }
        }));
    }

    Ok(TargetListing {
        target,
        entries,
        error: None,
    })
}
