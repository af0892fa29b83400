// tugboat: multi-repository management for Gitea and GitHub
//
// SPDX-FileCopyrightText: 2026 Tugboat Developers
// SPDX-License-Identifier: GPL-3.0-or-later

//! Remote hosting providers.
//!
//! ```text
//! RemoteProvider (trait, dyn-compatible)
//!   .list_org_repos(org)      -> Vec<RemoteRepository>
//!   .get_repo(owner, name)    -> Option<RemoteRepository>   (404 = None)
//!        |
//!        v
//! ProviderClient (closed enum)
//!   Gitea(GiteaClient)    {api}/api/v1/...   limit=50
//!   GitHub(GitHubClient)  {api}/...          per_page=100
//!        |
//!        v
//! shared reqwest::Client (user agent, 30s timeout)
//! ```

pub mod gitea;
pub mod github;

#[cfg(test)]
mod tests;

use futures_util::future::BoxFuture;
use reqwest::{RequestBuilder, Response, StatusCode, Url};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::trace;

use crate::config::{CloneProtocol, Config, ProviderConfig, ProviderKind};
use crate::error::{RemoteError, TugResult};

pub use gitea::GiteaClient;
pub use github::GitHubClient;

/// Request timeout applied to every provider call.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Provider-independent repository metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemoteRepository {
    pub id: i64,
    pub name: String,
    pub full_name: String,
    pub description: String,
    /// HTTPS clone URL.
    pub clone_url: String,
    pub ssh_url: String,
    pub html_url: String,
    pub default_branch: String,
    pub archived: bool,
    pub private: bool,
    pub fork: bool,
    pub empty: bool,
}

impl RemoteRepository {
    /// Clone URL for the given protocol preference.
    #[must_use]
    pub fn clone_url_for(&self, protocol: CloneProtocol) -> &str {
        match protocol {
            CloneProtocol::Ssh | CloneProtocol::Auto if !self.ssh_url.is_empty() => &self.ssh_url,
            _ => &self.clone_url,
        }
    }
}

/// Minimal operations needed from a hosting service.
pub trait RemoteProvider: Send + Sync {
    /// Lists every repository of an organization, following pagination.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-success response.
    fn list_org_repos<'a>(&'a self, org: &'a str)
    -> BoxFuture<'a, TugResult<Vec<RemoteRepository>>>;

    /// Fetches one repository, `None` when it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-success, non-404
    /// response.
    fn get_repo<'a>(
        &'a self,
        owner: &'a str,
        name: &'a str,
    ) -> BoxFuture<'a, TugResult<Option<RemoteRepository>>>;
}

/// Provider clients keyed by provider id.
pub type ProviderMap = BTreeMap<String, Arc<dyn RemoteProvider>>;

/// Closed set of supported provider clients.
#[derive(Debug, Clone)]
pub enum ProviderClient {
    Gitea(GiteaClient),
    GitHub(GitHubClient),
}

impl ProviderClient {
    /// Creates the client matching a provider's type.
    ///
    /// # Errors
    ///
    /// Returns `RemoteError::InvalidUrl` if the API URL cannot be parsed.
    pub fn from_config(config: &ProviderConfig, http: reqwest::Client) -> TugResult<Self> {
        Ok(match config.kind {
            ProviderKind::Gitea => Self::Gitea(GiteaClient::new(http, &config.api_url, &config.token)?),
            ProviderKind::GitHub => {
                Self::GitHub(GitHubClient::new(http, &config.api_url, &config.token)?)
            }
        })
    }
}

impl RemoteProvider for ProviderClient {
    fn list_org_repos<'a>(
        &'a self,
        org: &'a str,
    ) -> BoxFuture<'a, TugResult<Vec<RemoteRepository>>> {
        match self {
            Self::Gitea(client) => client.list_org_repos(org),
            Self::GitHub(client) => client.list_org_repos(org),
        }
    }

    fn get_repo<'a>(
        &'a self,
        owner: &'a str,
        name: &'a str,
    ) -> BoxFuture<'a, TugResult<Option<RemoteRepository>>> {
        match self {
            Self::Gitea(client) => client.get_repo(owner, name),
            Self::GitHub(client) => client.get_repo(owner, name),
        }
    }
}

/// Builds the HTTP client shared by all providers.
///
/// # Errors
///
/// Returns an error if the TLS backend cannot be initialized.
pub fn http_client() -> TugResult<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(format!("tugboat/{}", env!("CARGO_PKG_VERSION")))
        .timeout(REQUEST_TIMEOUT)
        .build()
        .map_err(|e| RemoteError::Reqwest(e).into())
}

/// Creates a client for every configured provider.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be built or a provider's API
/// URL is invalid.
pub fn build_providers(config: &Config) -> TugResult<ProviderMap> {
    let http = http_client()?;
    config
        .providers
        .iter()
        .map(|(id, provider)| -> TugResult<(String, Arc<dyn RemoteProvider>)> {
            let client = ProviderClient::from_config(provider, http.clone())?;
            Ok((id.clone(), Arc::new(client)))
        })
        .collect()
}

/// Parses a provider base URL.
pub(crate) fn parse_base(api_url: &str) -> TugResult<Url> {
    let trimmed = api_url.trim_end_matches('/');
    let url = Url::parse(trimmed).map_err(|e| RemoteError::InvalidUrl {
        url: api_url.to_string(),
        message: e.to_string(),
    })?;
    if url.cannot_be_a_base() {
        return Err(RemoteError::InvalidUrl {
            url: api_url.to_string(),
            message: "not a base URL".to_string(),
        }
        .into());
    }
    Ok(url)
}

/// Appends escaped path segments to `base`.
pub(crate) fn endpoint(base: &Url, segments: &[&str]) -> Url {
    let mut url = base.clone();
    if let Ok(mut path) = url.path_segments_mut() {
        path.pop_if_empty().extend(segments);
    }
    url
}

/// Sends a request, turning non-success statuses other than 404 into
/// `RemoteError::Http`. A 404 yields `None`.
pub(crate) async fn send(request: RequestBuilder, url: &Url) -> TugResult<Option<Response>> {
    trace!(%url, "GET");
    let response = request.send().await.map_err(RemoteError::Reqwest)?;
    let status = response.status();
    if status == StatusCode::NOT_FOUND {
        return Ok(None);
    }
    if status != StatusCode::OK {
        let body = response.text().await.unwrap_or_default();
        return Err(RemoteError::Http {
            status: status.as_u16(),
            url: url.to_string(),
            body: body.trim().to_string(),
        }
        .into());
    }
    Ok(Some(response))
}

/// Like [`send`], but a 404 is an error too.
pub(crate) async fn send_required(request: RequestBuilder, url: &Url) -> TugResult<Response> {
    send(request, url).await?.ok_or_else(|| {
        RemoteError::Http {
            status: StatusCode::NOT_FOUND.as_u16(),
            url: url.to_string(),
            body: String::new(),
        }
        .into()
    })
}
