// tugboat: multi-repository management for Gitea and GitHub
//
// SPDX-FileCopyrightText: 2026 Tugboat Developers
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error handling module.
//!
//! ```text
//!             TugboatError (~24 bytes)
//!                     |
//!   +------+------+---+---+-------+-------+----+
//!   |      |      |       |       |       |    |
//!   v      v      v       v       v       v    v
//!  Git  Remote  Config Foldout  Target Process  Io
//!  Box   Box     Box     Box     Box     Box   Box
//!
//! Sub-errors (unboxed internally):
//!   Git      CommandFailed, CloneFailed
//!   Remote   Reqwest, Http, InvalidUrl, NoClient
//!   Config   Read, Parse, Invalid, NotFound, UnsupportedVersion
//!   Foldout  ManifestFormat, Invalid, Io
//!   Target   Unknown, PathNotFound, RepoNotFound
//!   Process  ExecutableNotFound, SpawnFailed
//! ```
//!
//! Per-repository failures never travel through these types; they are
//! captured as data on `RepoStatus` so one repository cannot abort a run.

use thiserror::Error;

/// Convenience alias for `anyhow::Result`.
pub type Result<T> = anyhow::Result<T>;

/// Result type using [`TugboatError`].
pub type TugResult<T> = std::result::Result<T, TugboatError>;

/// Top-level application error type.
///
/// All sub-errors are boxed to keep this enum at ~24 bytes on the stack.
#[derive(Debug, Error)]
pub enum TugboatError {
    /// Git operation failed.
    #[error("git error: {0}")]
    Git(#[from] Box<GitError>),

    /// Remote provider call failed.
    #[error("remote error: {0}")]
    Remote(#[from] Box<RemoteError>),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(#[from] Box<ConfigError>),

    /// Foldout manifest error.
    #[error("foldout error: {0}")]
    Foldout(#[from] Box<FoldoutError>),

    /// Target selection or expansion error.
    #[error("target error: {0}")]
    Target(#[from] Box<TargetError>),

    /// Process execution error.
    #[error("process error: {0}")]
    Process(#[from] Box<ProcessError>),

    /// I/O error.
    #[error("io error: {0}")]
    Io(Box<std::io::Error>),
}

/// Macro to generate `From` implementations that box the source error.
macro_rules! impl_from_boxed {
    ($($error:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$error> for TugboatError {
                fn from(err: $error) -> Self {
                    TugboatError::$variant(Box::new(err))
                }
            }
        )+
    };
}

impl_from_boxed! {
    GitError => Git,
    RemoteError => Remote,
    ConfigError => Config,
    FoldoutError => Foldout,
    TargetError => Target,
    ProcessError => Process,
    std::io::Error => Io,
}

// --- Git Errors ---

/// Git operation errors.
#[derive(Debug, Error)]
pub enum GitError {
    /// Git command exited unsuccessfully.
    #[error("git command failed: {command} - {message}")]
    CommandFailed { command: String, message: String },

    /// Clone operation failed.
    #[error("failed to clone {url}: {message}")]
    CloneFailed { url: String, message: String },
}

// --- Remote Errors ---

/// Remote provider errors.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// Error from reqwest library (connect, timeout, decode).
    #[error("request failed: {0}")]
    Reqwest(#[from] reqwest::Error),

    /// Non-success HTTP status.
    #[error("API error (status {status}) from {url}: {body}")]
    Http {
        status: u16,
        url: String,
        body: String,
    },

    /// The configured API URL cannot be used as a base URL.
    #[error("invalid API URL {url}: {message}")]
    InvalidUrl { url: String, message: String },

    /// No client is configured for the provider id.
    #[error("no client for provider {provider}")]
    NoClient { provider: String },
}

// --- Config Errors ---

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("failed to read config file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse configuration content.
    #[error("failed to parse {what}: {message}")]
    Parse { what: String, message: String },

    /// Configuration content is structurally valid but semantically wrong.
    #[error("{0}")]
    Invalid(String),

    /// No configuration file could be located.
    #[error("no config file found")]
    NotFound,

    /// Detected version has no reader.
    #[error("unsupported config version: {0}")]
    UnsupportedVersion(i64),
}

// --- Foldout Errors ---

/// Foldout manifest errors.
#[derive(Debug, Error)]
pub enum FoldoutError {
    /// The manifest is not valid JSON or an entry name is not `org/repo`.
    #[error("invalid foldout manifest {path}: {message}")]
    ManifestFormat { path: String, message: String },

    /// The manifest parsed but its entries are unusable.
    #[error("invalid foldout: {0}")]
    Invalid(String),

    /// Reading the manifest failed for a reason other than absence.
    #[error("failed to read foldout manifest {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

// --- Target Errors ---

/// Target selection and expansion errors.
#[derive(Debug, Error)]
pub enum TargetError {
    /// One or more requested target names are not configured.
    #[error("unknown targets: {}", .0.join(", "))]
    Unknown(Vec<String>),

    /// A target's local path does not exist.
    #[error("target {name:?} path does not exist: {path}")]
    PathNotFound { name: String, path: String },

    /// A repository target does not exist on the remote.
    #[error("repo {org}/{repo} not found")]
    RepoNotFound { org: String, repo: String },
}

// --- Process Errors ---

/// Process execution errors.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// Executable not found in PATH.
    #[error("executable not found: '{name}' (not in PATH)")]
    ExecutableNotFound { name: String },

    /// Failed to spawn process.
    #[error("failed to spawn process '{command}': {source}")]
    SpawnFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },
}
