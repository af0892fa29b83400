// tugboat: multi-repository management for Gitea and GitHub
//
// SPDX-FileCopyrightText: 2026 Tugboat Developers
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git command execution seam.
//!
//! ```text
//! GitRunner (trait, dyn-compatible)
//!     .run(cwd, args) -> GitOutput { exit_code, stdout, stderr }
//!        |
//!        +--> ShellGit        git CLI via tokio::process
//!        +--> ScriptedGit     canned outputs (tests only)
//! ```
//!
//! `run` fails only when the process cannot be started. A git command that
//! exits non-zero is an `Ok` output with a non-zero `exit_code`.

#[cfg(test)]
pub(crate) mod scripted;


use futures_util::future::BoxFuture;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;
use tracing::trace;

use crate::error::{GitError, ProcessError, TugResult};

/// Captured result of one git invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GitOutput {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl GitOutput {
    /// Successful output with the given stdout.
    #[must_use]
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self {
            exit_code: 0,
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    /// Failed output with the given exit code and stderr.
    #[must_use]
    pub fn failed(exit_code: i32, stderr: impl Into<String>) -> Self {
        Self {
            exit_code,
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }

    #[must_use]
    pub const fn success(&self) -> bool {
        self.exit_code == 0
    }

    /// First non-empty line of stderr, trimmed.
    #[must_use]
    pub fn first_stderr_line(&self) -> Option<&str> {
        self.stderr.lines().map(str::trim).find(|l| !l.is_empty())
    }

    /// Short description of a failed invocation.
    #[must_use]
    pub fn failure_message(&self) -> String {
        self.first_stderr_line().map_or_else(
            || format!("exit status {}", self.exit_code),
            str::to_string,
        )
    }

    /// Converts a non-zero exit into `GitError::CommandFailed`.
    ///
    /// # Errors
    ///
    /// Returns `GitError::CommandFailed` carrying stderr (and stdout, which
    /// some git commands use for their diagnostics) when the exit code is not
    /// zero.
    pub fn check(self, args: &[&str]) -> TugResult<Self> {
        if self.success() {
            return Ok(self);
        }
        let combined = [self.stderr.trim(), self.stdout.trim()]
            .into_iter()
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join("\n");
        let message = if combined.is_empty() {
            format!("exit status {}", self.exit_code)
        } else {
            combined
        };
        Err(GitError::CommandFailed {
            command: format!("git {}", args.join(" ")),
            message,
        }
        .into())
    }
}

/// Runs git commands in a working directory.
pub trait GitRunner: Send + Sync {
    /// Runs `git <args>` in `cwd`.
    ///
    /// # Errors
    ///
    /// Returns an error only if the process cannot be spawned.
    fn run<'a>(&'a self, cwd: &'a Path, args: &'a [&'a str]) -> BoxFuture<'a, TugResult<GitOutput>>;
}

/// Runs the `git` executable found in `PATH`.
///
/// Credential prompts are disabled so a repository needing interactive
/// authentication fails instead of blocking its worker.
#[derive(Debug, Clone)]
pub struct ShellGit {
    program: PathBuf,
}

impl ShellGit {
    /// Locates `git` in `PATH`.
    ///
    /// # Errors
    ///
    /// Returns `ProcessError::ExecutableNotFound` if git is not installed.
    pub fn new() -> Result<Self, ProcessError> {
        which::which("git")
            .map(Self::with_program)
            .map_err(|_| ProcessError::ExecutableNotFound {
                name: "git".to_string(),
            })
    }

    /// Uses an explicit git executable.
    #[must_use]
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    #[must_use]
    pub fn program(&self) -> &Path {
        &self.program
    }
}

impl GitRunner for ShellGit {
    fn run<'a>(&'a self, cwd: &'a Path, args: &'a [&'a str]) -> BoxFuture<'a, TugResult<GitOutput>> {
        Box::pin(async move {
            trace!(cwd = %cwd.display(), ?args, "running git");

            let output = Command::new(&self.program)
                .args(args)
                .current_dir(cwd)
                .env("GIT_TERMINAL_PROMPT", "0")
                .env("GCM_INTERACTIVE", "never")
                .stdin(Stdio::null())
                .kill_on_drop(true)
                .output()
                .await
                .map_err(|source| ProcessError::SpawnFailed {
                    command: format!("git {}", args.join(" ")),
                    source,
                })?;

            let result = GitOutput {
                exit_code: output.status.code().unwrap_or(-1),
                stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            };
            trace!(cwd = %cwd.display(), exit_code = result.exit_code, "git finished");
            Ok(result)
        })
    }
}
