// tugboat: multi-repository management for Gitea and GitHub
//
// SPDX-FileCopyrightText: 2026 Tugboat Developers
// SPDX-License-Identifier: GPL-3.0-or-later

//! Pull, push and sync decisions.
//!
//! ```text
//! sync:  error          -> Error
//!        dirty          -> Skip "dirty"
//!        behind && !ff  -> Skip "diverged (ff-only)"     (ff_only policy)
//!        otherwise      -> Sync { pull: behind > 0, push: ahead > 0 }
//!
//! push:  error          -> Error
//!        behind > 0     -> Skip "behind remote, pull first"
//!        ahead == 0     -> Nothing
//!        otherwise      -> Push
//!
//! pull:  error          -> Error
//!        otherwise      -> Pull { ff_only }
//! ```
//!
//! Deciding is pure; [`execute`] applies a plan through the git seam.
//! Nothing is ever forced.

use std::fmt;
use std::path::PathBuf;
use tracing::{info, warn};

use crate::git::backend::GitRunner;
use crate::git::{RepoStatus, ops};

/// Why a repository was left alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    Dirty,
    DivergedFastForwardOnly,
    BehindRemote,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dirty => write!(f, "dirty"),
            Self::DivergedFastForwardOnly => write!(f, "diverged (ff-only)"),
            Self::BehindRemote => write!(f, "behind remote, pull first"),
        }
    }
}

/// What to do with one repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Plan {
    /// The status could not be computed.
    Error(String),
    Skip(SkipReason),
    /// Nothing to push; not reported.
    Nothing,
    /// Pull (when set) then push (when set).
    Apply {
        pull: Option<PullMode>,
        push: bool,
    },
}

/// Pull flavour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PullMode {
    pub ff_only: bool,
}

/// Decision for `pull`.
#[must_use]
pub fn decide_pull(status: &RepoStatus, ff_only: bool) -> Plan {
    if let Some(error) = &status.error {
        return Plan::Error(error.clone());
    }
    Plan::Apply {
        pull: Some(PullMode { ff_only }),
        push: false,
    }
}

/// Decision for `push`.
#[must_use]
pub fn decide_push(status: &RepoStatus) -> Plan {
    if let Some(error) = &status.error {
        return Plan::Error(error.clone());
    }
    if status.behind > 0 {
        return Plan::Skip(SkipReason::BehindRemote);
    }
    if status.ahead == 0 {
        return Plan::Nothing;
    }
    Plan::Apply {
        pull: None,
        push: true,
    }
}

/// Decision for `sync`.
///
/// A clean repository with nothing to do is still `Apply` with no steps and
/// counts as synced.
#[must_use]
pub fn plan_sync(status: &RepoStatus, ff_only: bool) -> Plan {
    if let Some(error) = &status.error {
        return Plan::Error(error.clone());
    }
    if status.dirty {
        return Plan::Skip(SkipReason::Dirty);
    }
    if status.behind > 0 && !status.can_fast_forward && ff_only {
        return Plan::Skip(SkipReason::DivergedFastForwardOnly);
    }
    Plan::Apply {
        pull: (status.behind > 0).then_some(PullMode { ff_only }),
        push: status.ahead > 0,
    }
}

/// Step that failed during execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Pull,
    Push,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pull => write!(f, "pull"),
            Self::Push => write!(f, "push"),
        }
    }
}

/// Result of applying a plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Error(String),
    Skipped(SkipReason),
    Nothing,
    Failed { step: Step, message: String },
    /// Commits brought in and sent out (`None` when the step did not run).
    Done {
        pulled: Option<u32>,
        pushed: Option<u32>,
    },
}

/// Outcome for one repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionReport {
    pub path: PathBuf,
    pub target: String,
    pub name: String,
    /// Counts from the status the plan was made from.
    pub ahead: u32,
    pub behind: u32,
    pub outcome: Outcome,
}

/// Applies `plan` to the repository described by `status`.
///
/// A failed pull stops the repository before any push.
pub async fn execute(git: &dyn GitRunner, status: &RepoStatus, plan: Plan) -> ActionReport {
    let outcome = match plan {
        Plan::Error(message) => Outcome::Error(message),
        Plan::Skip(reason) => Outcome::Skipped(reason),
        Plan::Nothing => Outcome::Nothing,
        Plan::Apply { pull, push } => apply(git, status, pull, push).await,
    };
    ActionReport {
        path: status.path.clone(),
        target: status.target.clone(),
        name: status.name.clone(),
        ahead: status.ahead,
        behind: status.behind,
        outcome,
    }
}

async fn apply(
    git: &dyn GitRunner,
    status: &RepoStatus,
    pull: Option<PullMode>,
    push: bool,
) -> Outcome {
    let path = status.path.as_path();

    let pulled = if let Some(mode) = pull {
        if let Err(e) = ops::pull(git, path, mode.ff_only).await {
            warn!(repo = %path.display(), error = %e, "pull failed");
            return Outcome::Failed {
                step: Step::Pull,
                message: e.to_string(),
            };
        }
        info!(repo = %path.display(), behind = status.behind, "pulled");
        Some(status.behind)
    } else {
        None
    };

    let pushed = if push {
        if let Err(e) = ops::push(git, path).await {
            warn!(repo = %path.display(), error = %e, "push failed");
            return Outcome::Failed {
                step: Step::Push,
                message: e.to_string(),
            };
        }
        info!(repo = %path.display(), ahead = status.ahead, "pushed");
        Some(status.ahead)
    } else {
        None
    };

    Outcome::Done { pulled, pushed }
}
