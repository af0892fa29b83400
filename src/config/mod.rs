// tugboat: multi-repository management for Gitea and GitHub
//
// SPDX-FileCopyrightText: 2026 Tugboat Developers
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration management for tugboat.
//!
//! # Lookup Order
//!
//! ```text
//! 1. --config FILE
//! 2. $TUGBOAT_CONFIG
//! 3. $XDG_CONFIG_HOME/tugboat/config.json
//! 4. ~/.config/tugboat/config.json
//! 5. ~/.tugboat.json
//! ```
//!
//! # Versions
//!
//! ```text
//! v1  { gitea_url, gitea_token, organizations: [{name, path}] }
//!       --migrate--> one "gitea" provider, one org target per organization
//! v2  { workers?, providers: {id: {type, api_url, token, options}},
//!       targets: [{name?, provider, org, repo?, path}] }
//! ```

pub mod loader;
pub mod v1;


use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Default API root for github.com.
pub const GITHUB_API_URL: &str = "https://api.github.com";

/// Complete application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Worker count for parallel operations (0 = number of CPU cores).
    #[serde(skip_serializing_if = "is_zero")]
    pub workers: usize,
    /// Remote hosting providers keyed by provider id.
    pub providers: BTreeMap<String, ProviderConfig>,
    /// Checkout targets.
    pub targets: Vec<Target>,
}

#[allow(clippy::trivially_copy_pass_by_ref)]
const fn is_zero(value: &usize) -> bool {
    *value == 0
}

/// Supported hosting services.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    Gitea,
    #[serde(rename = "github")]
    GitHub,
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gitea => write!(f, "gitea"),
            Self::GitHub => write!(f, "github"),
        }
    }
}

/// How to talk to one remote hosting service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderConfig {
    #[serde(rename = "type")]
    pub kind: ProviderKind,
    /// Base API endpoint.
    #[serde(default)]
    pub api_url: String,
    /// Personal access token.
    #[serde(default)]
    pub token: String,
    #[serde(default)]
    pub options: ProviderOptions,
}

impl ProviderConfig {
    /// Creates a provider with default options.
    #[must_use]
    pub fn new(kind: ProviderKind, api_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            kind,
            api_url: api_url.into(),
            token: token.into(),
            options: ProviderOptions::default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderOptions {
    pub clone: CloneOptions,
    pub sync: SyncOptions,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CloneOptions {
    pub protocol: CloneProtocol,
}

/// Which clone URL to use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CloneProtocol {
    #[default]
    Https,
    Ssh,
    /// SSH when the provider reports an SSH URL, otherwise HTTPS.
    Auto,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ff_only: Option<bool>,
}

impl SyncOptions {
    /// Fast-forward-only policy, defaulting to `true`.
    #[must_use]
    pub fn ff_only(&self) -> bool {
        self.ff_only.unwrap_or(true)
    }
}

/// A checkout target: a whole organization (`repo` unset) or a single
/// repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Target {
    /// CLI name; defaults to `repo` or `org`.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    pub provider: String,
    pub org: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repo: Option<String>,
    pub path: PathBuf,
}

impl Target {
    /// Returns true for organization targets.
    #[must_use]
    pub const fn is_org(&self) -> bool {
        self.repo.is_none()
    }
}

impl Config {
    /// Look up a target by name.
    #[must_use]
    pub fn target(&self, name: &str) -> Option<&Target> {
        self.targets.iter().find(|t| t.name == name)
    }

    /// Fast-forward-only policy for a provider id (true when unknown).
    #[must_use]
    pub fn ff_only(&self, provider: &str) -> bool {
        self.providers
            .get(provider)
            .is_none_or(|p| p.options.sync.ff_only())
    }

    /// Worker count to use: an explicit CLI value wins over the config value.
    #[must_use]
    pub const fn resolve_workers(&self, cli_workers: Option<usize>) -> usize {
        match cli_workers {
            Some(n) if n > 0 => n,
            _ => self.workers,
        }
    }

    /// Serializes the config as pretty v2 JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        serde_json::to_string_pretty(self).map_err(|e| ConfigError::Parse {
            what: "config".to_string(),
            message: e.to_string(),
        })
    }

    /// Validates the config and fills in defaults.
    ///
    /// Provider ids are lowercased, the github API root is defaulted, empty
    /// tokens fall back to `$GITEA_TOKEN` / `$GITHUB_TOKEN`, target names are
    /// defaulted and checked for uniqueness and `~/` paths are expanded.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` describing the first problem found.
    pub fn validate_and_normalize(&mut self) -> Result<(), ConfigError> {
        self.validate_and_normalize_with(|key| std::env::var(key).ok())
    }

    pub(crate) fn validate_and_normalize_with(
        &mut self,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if self.providers.is_empty() {
            return Err(invalid("at least one provider must be configured"));
        }

        let providers = std::mem::take(&mut self.providers);
        for (name, mut provider) in providers {
            let name = name.to_lowercase();
            match provider.kind {
                ProviderKind::Gitea if provider.api_url.is_empty() => {
                    return Err(invalid(format!("provider {name:?} (gitea) requires api_url")));
                }
                ProviderKind::GitHub if provider.api_url.is_empty() => {
                    provider.api_url = GITHUB_API_URL.to_string();
                }
                _ => {}
            }
            provider.api_url = provider.api_url.trim_end_matches('/').to_string();
            if provider.token.is_empty() {
                let key = format!("{}_TOKEN", provider.kind.to_string().to_uppercase());
                provider.token = env(&key).unwrap_or_default();
            }
            if provider.token.is_empty() {
                return Err(invalid(format!("provider {name:?} requires token")));
            }
            self.providers.insert(name, provider);
        }

        if self.targets.is_empty() {
            return Err(invalid("at least one target must be configured"));
        }

        let mut names = BTreeSet::new();
        for (i, target) in self.targets.iter_mut().enumerate() {
            if target.provider.is_empty() {
                return Err(invalid(format!("target {i} missing provider")));
            }
            target.provider = target.provider.to_lowercase();
            if !self.providers.contains_key(&target.provider) {
                return Err(invalid(format!(
                    "target {i} references unknown provider {:?}",
                    target.provider
                )));
            }
            if target.org.is_empty() {
                return Err(invalid(format!("target {i} missing org")));
            }
            if target.path.as_os_str().is_empty() {
                return Err(invalid(format!("target {} missing path", target.org)));
            }
            target.path = expand_home(&target.path);
            if target.repo.as_deref().is_some_and(str::is_empty) {
                target.repo = None;
            }
            if target.name.is_empty() {
                target.name = target.repo.clone().unwrap_or_else(|| target.org.clone());
            }
            if !names.insert(target.name.clone()) {
                return Err(invalid(format!("duplicate target name {:?}", target.name)));
            }
        }

        Ok(())
    }
}

fn invalid(message: impl Into<String>) -> ConfigError {
    ConfigError::Invalid(message.into())
}

/// Home directory from `$HOME` (or `%USERPROFILE%`).
pub(crate) fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .filter(|h| !h.is_empty())
        .map(PathBuf::from)
}

/// Expands a leading `~/` to the home directory.
#[must_use]
pub fn expand_home(path: &Path) -> PathBuf {
    if let Ok(rest) = path.strip_prefix("~")
        && let Some(home) = home_dir()
    {
        return home.join(rest);
    }
    path.to_path_buf()
}
