// tugboat: multi-repository management for Gitea and GitHub
//
// SPDX-FileCopyrightText: 2026 Tugboat Developers
// SPDX-License-Identifier: GPL-3.0-or-later

//! Legacy single-provider (Gitea only) configuration format.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

use super::{CloneProtocol, Config, ProviderConfig, ProviderKind, Target, expand_home};
use crate::error::ConfigError;

/// Provider id assigned to the migrated Gitea server.
pub const V1_PROVIDER: &str = "gitea";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ConfigV1 {
    pub gitea_url: String,
    pub gitea_token: String,
    pub organizations: Vec<OrganizationV1>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OrganizationV1 {
    pub name: String,
    pub path: String,
}

impl ConfigV1 {
    /// Parses v1 JSON and checks required fields.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` on malformed JSON and
    /// `ConfigError::Invalid` when a required field is missing.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let v1: Self = serde_json::from_str(content).map_err(|e| ConfigError::Parse {
            what: "v1 config".to_string(),
            message: e.to_string(),
        })?;

        if v1.gitea_url.is_empty() {
            return Err(ConfigError::Invalid("gitea_url is required".to_string()));
        }
        if v1.gitea_token.is_empty() {
            return Err(ConfigError::Invalid("gitea_token is required".to_string()));
        }
        if v1.organizations.is_empty() {
            return Err(ConfigError::Invalid(
                "at least one organization must be configured".to_string(),
            ));
        }
        Ok(v1)
    }

    /// Converts to the current format: a single `gitea` provider and one
    /// organization target per configured organization.
    #[must_use]
    pub fn migrate(self) -> Config {
        let mut provider = ProviderConfig::new(
            ProviderKind::Gitea,
            self.gitea_url.trim_end_matches('/'),
            self.gitea_token,
        );
        provider.options.clone.protocol = CloneProtocol::Https;

        let targets = self
            .organizations
            .into_iter()
            .map(|org| Target {
                name: org.name.clone(),
                provider: V1_PROVIDER.to_string(),
                org: org.name,
                repo: None,
                path: expand_home(&PathBuf::from(org.path)),
            })
            .collect();

        Config {
            workers: 0,
            providers: BTreeMap::from([(V1_PROVIDER.to_string(), provider)]),
            targets,
        }
    }
}
