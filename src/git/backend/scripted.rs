// tugboat: multi-repository management for Gitea and GitHub
//
// SPDX-FileCopyrightText: 2026 Tugboat Developers
// SPDX-License-Identifier: GPL-3.0-or-later

//! In-memory `GitRunner` returning canned outputs.

use futures_util::future::BoxFuture;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use super::{GitOutput, GitRunner};
use crate::error::{ProcessError, TugResult};

#[derive(Debug, Clone)]
enum Reply {
    Output(GitOutput),
    SpawnError(String),
}

/// Answers `git <args>` per working directory. Unscripted commands succeed
/// with empty output. Every call is recorded.
#[derive(Debug, Default)]
pub(crate) struct ScriptedGit {
    replies: BTreeMap<(PathBuf, String), Reply>,
    calls: Mutex<Vec<(PathBuf, String)>>,
}

impl ScriptedGit {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Scripts `git <args>` (space-joined) in `cwd`.
    pub(crate) fn on(mut self, cwd: impl AsRef<Path>, args: &str, output: GitOutput) -> Self {
        self.replies.insert(
            (cwd.as_ref().to_path_buf(), args.to_string()),
            Reply::Output(output),
        );
        self
    }

    /// Makes `git <args>` in `cwd` fail to spawn.
    pub(crate) fn spawn_error(mut self, cwd: impl AsRef<Path>, args: &str, message: &str) -> Self {
        self.replies.insert(
            (cwd.as_ref().to_path_buf(), args.to_string()),
            Reply::SpawnError(message.to_string()),
        );
        self
    }

    /// Scripts a healthy repository on `branch` with the given counts.
    pub(crate) fn repo(self, cwd: impl AsRef<Path>, branch: &str, ahead: u32, behind: u32) -> Self {
        let cwd = cwd.as_ref();
        self.on(cwd, "rev-parse --abbrev-ref HEAD", GitOutput::ok(format!("{branch}\n")))
            .on(
                cwd,
                &format!("rev-list --left-right --count {branch}...origin/{branch}"),
                GitOutput::ok(format!("{ahead}\t{behind}\n")),
            )
    }

    /// Every recorded call as `(cwd, args)`.
    pub(crate) fn calls(&self) -> Vec<(PathBuf, String)> {
        self.calls
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }

    /// Recorded calls in `cwd` whose args start with `prefix`.
    pub(crate) fn calls_in(&self, cwd: impl AsRef<Path>, prefix: &str) -> Vec<String> {
        let cwd = cwd.as_ref();
        self.calls()
            .into_iter()
            .filter(|(dir, args)| dir == cwd && args.starts_with(prefix))
            .map(|(_, args)| args)
            .collect()
    }
}

impl GitRunner for ScriptedGit {
    fn run<'a>(&'a self, cwd: &'a Path, args: &'a [&'a str]) -> BoxFuture<'a, TugResult<GitOutput>> {
        Box::pin(async move {
            let key = (cwd.to_path_buf(), args.join(" "));
            self.calls
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner)
                .push(key.clone());

            match self.replies.get(&key) {
                Some(Reply::Output(output)) => Ok(output.clone()),
                Some(Reply::SpawnError(message)) => Err(ProcessError::SpawnFailed {
                    command: format!("git {}", key.1),
                    source: std::io::Error::other(message.clone()),
                }
                .into()),
                None => Ok(GitOutput::default()),
            }
        })
    }
}
