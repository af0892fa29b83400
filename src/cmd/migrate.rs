// tugboat: multi-repository management for Gitea and GitHub
//
// SPDX-FileCopyrightText: 2026 Tugboat Developers
// SPDX-License-Identifier: GPL-3.0-or-later

//! Migrate command: v1 config to v2.
//!
//! ```text
//! locate_config --> detect_version
//!                     v2: "no migration needed"
//!                     v1: ConfigV1::parse().migrate().to_json()
//!                          --write: copy to <path>.v1.backup,
//!                                   persist temp file over <path>
//!                          else:    print the JSON
//! ```

use anyhow::Context;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

use super::print_lines;
use crate::cli::global::GlobalOptions;
use crate::cli::repo::MigrateArgs;
use crate::config::loader::{detect_version, locate_config};
use crate::config::v1::ConfigV1;
use crate::error::{ConfigError, Result};

/// Suffix appended to the original file when migrating in place.
pub const BACKUP_SUFFIX: &str = ".v1.backup";

/// What `migrate_file` did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Migration {
    /// The file is already in the current format.
    AlreadyCurrent,
    /// The migrated JSON, not written anywhere.
    Preview(String),
    Written { path: PathBuf, backup: PathBuf },
}

/// Main handler for the migrate command.
///
/// # Errors
///
/// Returns an error if no config file exists or it cannot be migrated.
pub fn run_migrate_command(args: &MigrateArgs, global: &GlobalOptions) -> Result<()> {
    let path = locate_config(global.config.as_deref()).ok_or(ConfigError::NotFound)?;
    let migration = migrate_file(&path, args.write)?;
    print_lines(&render_migration(&migration));
    Ok(())
}

/// Path of the backup written next to `path`.
#[must_use]
pub fn backup_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(BACKUP_SUFFIX);
    PathBuf::from(name)
}

/// Migrates the config at `path`, rewriting it when `write` is set.
///
/// # Errors
///
/// Returns an error if the file cannot be read, is not a valid v1 or v2
/// config, or the backup or rewrite fails.
pub fn migrate_file(path: &Path, write: bool) -> Result<Migration> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.display().to_string(),
        source,
    })?;

    match detect_version(&content)? {
        1 => {}
        2 => return Ok(Migration::AlreadyCurrent),
        other => return Err(ConfigError::UnsupportedVersion(other).into()),
    }

    let json = ConfigV1::parse(&content)?.migrate().to_json()?;
    if !write {
        return Ok(Migration::Preview(json));
    }

    let backup = backup_path(path);
    std::fs::copy(path, &backup)
        .with_context(|| format!("creating backup {}", backup.display()))?;

    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let mut tmp = tempfile::NamedTempFile::new_in(dir)
        .with_context(|| format!("creating temporary file in {}", dir.display()))?;
    tmp.write_all(json.as_bytes())?;
    tmp.write_all(b"\n")?;
    tmp.persist(path)
        .with_context(|| format!("writing v2 config {}", path.display()))?;

    info!(path = %path.display(), backup = %backup.display(), "config migrated");
    Ok(Migration::Written {
        path: path.to_path_buf(),
        backup,
    })
}

#[must_use]
pub fn render_migration(migration: &Migration) -> Vec<String> {
    match migration {
        Migration::AlreadyCurrent => {
            vec!["Config is already v2 format. No migration needed.".to_string()]
        }
        Migration::Preview(json) => vec![
            "# Migrated v2 config (use --write to save in place):".to_string(),
            json.clone(),
        ],
        Migration::Written { path, backup } => vec![
            format!("Backed up v1 config to: {}", backup.display()),
            format!("Migrated config to v2: {}", path.display()),
        ],
    }
}
