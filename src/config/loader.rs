// tugboat: multi-repository management for Gitea and GitHub
//
// SPDX-FileCopyrightText: 2026 Tugboat Developers
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration loading.
//!
//! # Loader Pipeline
//!
//! ```text
//! locate_config(--config)
//!        |
//!        v
//!   read file --> detect_version
//!                   |         |
//!                  v1         v2
//!                   |         |
//!        ConfigV1::parse   ConfigLoader::new()
//!          .migrate()        .add_json_str()
//!                   |        .set("workers", n)
//!                   |        .build()
//!                   v         v
//!            validate_and_normalize --> LoadResult
//! ```

use anyhow::Context;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use super::v1::ConfigV1;
use super::{Config, expand_home, home_dir};
use crate::error::{ConfigError, Result};

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "TUGBOAT_CONFIG";

/// Builder for loading a v2 configuration through the `config` crate.
pub struct ConfigLoader {
    builder: config::ConfigBuilder<config::builder::DefaultState>,
    sources: Vec<String>,
}

impl ConfigLoader {
    #[must_use]
    pub fn new() -> Self {
        Self {
            builder: config::Config::builder(),
            sources: Vec::new(),
        }
    }

    /// Adds a JSON configuration file. A missing file fails `build()`.
    #[must_use]
    pub fn add_json_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        use config::{File, FileFormat};
        let p = path.as_ref();
        self.builder = self
            .builder
            .add_source(File::from(p).format(FileFormat::Json).required(true));
        self.sources.push(p.display().to_string());
        self
    }

    #[must_use]
    pub fn add_json_str(mut self, content: &str) -> Self {
        use config::{File, FileFormat};
        self.builder = self
            .builder
            .add_source(File::from_str(content, FileFormat::Json));
        self.sources.push("<string>".to_string());
        self
    }

    /// Sets a configuration override (e.g. `workers` from the command line).
    ///
    /// # Errors
    ///
    /// Returns an error if the key is invalid.
    pub fn set<T: Into<config::Value>>(mut self, key: &str, value: T) -> Result<Self> {
        self.builder = self
            .builder
            .set_override(key, value)
            .map_err(|e| anyhow::anyhow!("config error: {e}"))?;
        Ok(self)
    }

    /// Builds, validates and normalizes the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if a source cannot be read or parsed, or if the
    /// merged result fails validation.
    pub fn build(self) -> Result<Config> {
        let cfg = self
            .builder
            .build()
            .with_context(|| format!("failed to load config from {}", self.sources.join(", ")))?;
        let mut config: Config = cfg.try_deserialize().map_err(|e| ConfigError::Parse {
            what: "v2 config".to_string(),
            message: e.to_string(),
        })?;
        config.validate_and_normalize()?;
        Ok(config)
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// A loaded configuration plus how it was obtained.
#[derive(Debug, Clone)]
pub struct LoadResult {
    pub config: Config,
    pub version: i64,
    pub is_deprecated: bool,
    pub path: Option<PathBuf>,
}

/// Determines the schema version of raw config JSON.
///
/// A `providers` object means v2, an explicit positive `version` is taken
/// as-is and a `gitea_url` means v1.
///
/// # Errors
///
/// Returns `ConfigError::Parse` for malformed JSON and `ConfigError::Invalid`
/// when no version marker is present.
pub fn detect_version(content: &str) -> std::result::Result<i64, ConfigError> {
    let probe: serde_json::Value =
        serde_json::from_str(content).map_err(|e| ConfigError::Parse {
            what: "config for version detection".to_string(),
            message: e.to_string(),
        })?;

    if probe.get("providers").is_some_and(serde_json::Value::is_object) {
        return Ok(2);
    }
    if let Some(version) = probe.get("version").and_then(serde_json::Value::as_i64)
        && version > 0
    {
        return Ok(version);
    }
    if probe
        .get("gitea_url")
        .and_then(serde_json::Value::as_str)
        .is_some_and(|url| !url.is_empty())
    {
        return Ok(1);
    }

    Err(ConfigError::Invalid(
        "unrecognized config format: missing 'providers' (v2) or 'gitea_url' (v1)".to_string(),
    ))
}

/// Parses config content of any supported version.
///
/// `workers` overrides the file's worker count when set.
///
/// # Errors
///
/// Returns an error if the version is unknown or the content is invalid.
pub fn load_from_str(content: &str, workers: Option<usize>) -> Result<LoadResult> {
    let version = detect_version(content)?;
    let mut config = match version {
        1 => {
            let mut config = ConfigV1::parse(content)?.migrate();
            config.validate_and_normalize()?;
            config
        }
        2 => {
            let mut loader = ConfigLoader::new().add_json_str(content);
            if let Some(n) = workers.filter(|&n| n > 0) {
                loader = loader.set("workers", n as u64)?;
            }
            loader.build()?
        }
        other => return Err(ConfigError::UnsupportedVersion(other).into()),
    };
    config.workers = config.resolve_workers(workers);

    Ok(LoadResult {
        config,
        version,
        is_deprecated: version < 2,
        path: None,
    })
}

/// Locates, reads and parses the configuration file.
///
/// A deprecated v1 file is loaded with a warning suggesting `tugboat migrate`.
///
/// # Errors
///
/// Returns an error if no config file exists, it cannot be read, or its
/// content is invalid.
pub fn load(explicit: Option<&Path>, workers: Option<usize>) -> Result<LoadResult> {
    let path = locate_config(explicit).ok_or(ConfigError::NotFound)?;
    debug!(path = %path.display(), "loading config");

    let content = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
        path: path.display().to_string(),
        source,
    })?;
    let mut result = load_from_str(&content, workers)
        .with_context(|| format!("invalid config file {}", path.display()))?;

    if result.is_deprecated {
        warn!("using deprecated v1 config format, run 'tugboat migrate' to upgrade");
    }
    result.path = Some(path);
    Ok(result)
}

/// Finds the config file using the process environment.
#[must_use]
pub fn locate_config(explicit: Option<&Path>) -> Option<PathBuf> {
    locate_config_with(explicit, |key| std::env::var(key).ok(), home_dir())
}

/// Finds the config file.
///
/// An explicit path or `$TUGBOAT_CONFIG` is returned whether or not it
/// exists; the remaining candidates must be existing files.
pub(crate) fn locate_config_with(
    explicit: Option<&Path>,
    env: impl Fn(&str) -> Option<String>,
    home: Option<PathBuf>,
) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(expand_home(path));
    }
    if let Some(path) = env(CONFIG_ENV).filter(|p| !p.is_empty()) {
        return Some(expand_home(Path::new(&path)));
    }

    let mut candidates = Vec::new();
    if let Some(xdg) = env("XDG_CONFIG_HOME").filter(|p| !p.is_empty()) {
        candidates.push(PathBuf::from(xdg).join("tugboat").join("config.json"));
    }
    if let Some(home) = home {
        candidates.push(home.join(".config").join("tugboat").join("config.json"));
        candidates.push(home.join(".tugboat.json"));
    }

    candidates.into_iter().find(|p| p.is_file())
}
