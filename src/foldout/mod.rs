// tugboat: multi-repository management for Gitea and GitHub
//
// SPDX-FileCopyrightText: 2026 Tugboat Developers
// SPDX-License-Identifier: GPL-3.0-or-later

//! Foldout manifests: repositories nested inside another working copy.
//!
//! ```text
//! <repo>/.tugboat.json
//! {
//!   "repos": [
//!     { "name": "org/lib",  "target": "vendor/lib" },
//!     { "name": "org/docs" }                     -> target "docs"
//!   ]
//! }
//! ```
//!
//! A missing manifest is `Ok(None)`, which is not the same as an empty one.


use serde::Deserialize;
use std::collections::BTreeSet;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use crate::error::FoldoutError;

/// Manifest file name at the root of a repository target.
pub const MANIFEST_FILE: &str = ".tugboat.json";

#[derive(Debug, Deserialize)]
struct RawManifest {
    #[serde(default)]
    repos: Vec<RawEntry>,
}

#[derive(Debug, Deserialize)]
struct RawEntry {
    name: String,
    #[serde(default)]
    target: Option<String>,
}

/// One nested repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoldoutEntry {
    /// `org/repo` as written in the manifest.
    pub name: String,
    /// Directory relative to the parent working copy.
    pub target: String,
    org: String,
    repo: String,
}

impl FoldoutEntry {
    /// Parses an `org/repo` name. The target defaults to `repo`.
    ///
    /// # Errors
    ///
    /// Returns a message when the name is not exactly two `/`-separated
    /// segments.
    pub fn new(name: &str, target: Option<&str>) -> Result<Self, String> {
        let mut parts = name.split('/');
        let (Some(org), Some(repo), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(format!("invalid repo name {name:?} (expected org/repo)"));
        };
        let target = target
            .filter(|t| !t.is_empty())
            .unwrap_or(repo)
            .to_string();
        Ok(Self {
            name: name.to_string(),
            target,
            org: org.to_string(),
            repo: repo.to_string(),
        })
    }

    /// Organization to reconcile against: the manifest's own org segment,
    /// or `parent_org` when that segment is empty.
    #[must_use]
    pub fn org_or<'a>(&'a self, parent_org: &'a str) -> &'a str {
        if self.org.is_empty() {
            parent_org
        } else {
            &self.org
        }
    }

    /// Remote repository name.
    #[must_use]
    pub fn repo(&self) -> &str {
        &self.repo
    }

    /// Local path of this entry under `parent`.
    #[must_use]
    pub fn path_under(&self, parent: &Path) -> PathBuf {
        parent.join(&self.target)
    }
}

/// A parsed foldout manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Foldout {
    pub entries: Vec<FoldoutEntry>,
}

impl Foldout {
    /// Parses manifest JSON. `path` is used only in error messages.
    ///
    /// # Errors
    ///
    /// Returns `FoldoutError::ManifestFormat` for malformed JSON or a bad
    /// entry name.
    pub fn parse(content: &str, path: &Path) -> Result<Self, FoldoutError> {
        let format_error = |message: String| FoldoutError::ManifestFormat {
            path: path.display().to_string(),
            message,
        };
        let raw: RawManifest =
            serde_json::from_str(content).map_err(|e| format_error(e.to_string()))?;
        let entries = raw
            .repos
            .iter()
            .map(|e| FoldoutEntry::new(&e.name, e.target.as_deref()))
            .collect::<Result<Vec<_>, _>>()
            .map_err(format_error)?;
        Ok(Self { entries })
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Reads `<repo>/.tugboat.json`.
///
/// # Errors
///
/// Returns `FoldoutError::ManifestFormat` for an unparsable manifest and
/// `FoldoutError::Io` if it exists but cannot be read.
pub fn load(repo: &Path) -> Result<Option<Foldout>, FoldoutError> {
    let path = repo.join(MANIFEST_FILE);
    let content = match std::fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(FoldoutError::Io {
                path: path.display().to_string(),
                source,
            });
        }
    };
    Foldout::parse(&content, &path).map(Some)
}

/// Checks that every target is non-empty, relative, free of `..` and unique.
///
/// # Errors
///
/// Returns `FoldoutError::Invalid` describing the first offending entry.
pub fn validate(entries: &[FoldoutEntry]) -> Result<(), FoldoutError> {
    let mut seen = BTreeSet::new();
    for entry in entries {
        if entry.target.is_empty() {
            return Err(FoldoutError::Invalid(format!(
                "foldout target empty for {}",
                entry.name
            )));
        }
        let target = Path::new(&entry.target);
        let rooted = target.is_absolute()
            || target
                .components()
                .any(|c| matches!(c, Component::RootDir | Component::Prefix(_)));
        if rooted {
            return Err(FoldoutError::Invalid(format!(
                "foldout target {} must be a relative path",
                entry.target
            )));
        }
        let traverses = entry.target.contains("..")
            || target
                .components()
                .any(|c| matches!(c, Component::ParentDir));
        if traverses {
            return Err(FoldoutError::Invalid(format!(
                "foldout target {} must not contain ..",
                entry.target
            )));
        }
        if !seen.insert(entry.target.as_str()) {
            return Err(FoldoutError::Invalid(format!(
                "duplicate foldout target {}",
                entry.target
            )));
        }
    }
    Ok(())
}

/// [`load`] followed by [`validate`].
///
/// # Errors
///
/// Returns any error from either step.
pub fn load_validated(repo: &Path) -> Result<Option<Foldout>, FoldoutError> {
    let foldout = load(repo)?;
    if let Some(foldout) = &foldout {
        validate(&foldout.entries)?;
    }
    Ok(foldout)
}
