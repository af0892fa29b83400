// tugboat: multi-repository management for Gitea and GitHub
//
// SPDX-FileCopyrightText: 2026 Tugboat Developers
// SPDX-License-Identifier: GPL-3.0-or-later

//! GitHub REST client (github.com or Enterprise).
//!
//! GitHub has no `empty` flag; a repository with `size == 0` is treated as
//! empty.

use futures_util::future::BoxFuture;
use reqwest::Url;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use serde::Deserialize;
use tracing::debug;

use super::{RemoteProvider, RemoteRepository, endpoint, parse_base, send, send_required};
use crate::error::{RemoteError, TugResult};

/// Page size for organization listings.
pub const PER_PAGE: usize = 100;

#[derive(Debug, Deserialize)]
struct GitHubRepo {
    #[serde(default)]
    id: i64,
    name: String,
    #[serde(default)]
    full_name: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    clone_url: Option<String>,
    #[serde(default)]
    ssh_url: Option<String>,
    #[serde(default)]
    html_url: Option<String>,
    #[serde(default)]
    default_branch: Option<String>,
    #[serde(default)]
    archived: bool,
    #[serde(default)]
    private: bool,
    #[serde(default)]
    fork: bool,
    #[serde(default)]
    size: u64,
}

impl From<GitHubRepo> for RemoteRepository {
    fn from(r: GitHubRepo) -> Self {
        Self {
            id: r.id,
            name: r.name,
            full_name: r.full_name.unwrap_or_default(),
            description: r.description.unwrap_or_default(),
            clone_url: r.clone_url.unwrap_or_default(),
            ssh_url: r.ssh_url.unwrap_or_default(),
            html_url: r.html_url.unwrap_or_default(),
            default_branch: r.default_branch.unwrap_or_default(),
            archived: r.archived,
            private: r.private,
            fork: r.fork,
            empty: r.size == 0,
        }
    }
}

/// Client for the GitHub API.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    http: reqwest::Client,
    base: Url,
    token: String,
}

impl GitHubClient {
    /// Creates a client for the API root `api_url`
    /// (e.g. `https://api.github.com`).
    ///
    /// # Errors
    ///
    /// Returns `RemoteError::InvalidUrl` if `api_url` is not a base URL.
    pub fn new(http: reqwest::Client, api_url: &str, token: &str) -> TugResult<Self> {
        Ok(Self {
            http,
            base: parse_base(api_url)?,
            token: token.to_string(),
        })
    }

    fn get(&self, url: &Url) -> reqwest::RequestBuilder {
        let request = self
            .http
            .get(url.clone())
            .header(ACCEPT, "application/vnd.github+json");
        if self.token.is_empty() {
            request
        } else {
            request.header(AUTHORIZATION, format!("token {}", self.token))
        }
    }

    async fn list_page(&self, org: &str, page: usize) -> TugResult<Vec<RemoteRepository>> {
        let mut url = endpoint(&self.base, &["orgs", org, "repos"]);
        url.query_pairs_mut()
            .append_pair("per_page", &PER_PAGE.to_string())
            .append_pair("page", &page.to_string())
            .append_pair("type", "all");

        let response = send_required(self.get(&url), &url).await?;
        let repos: Vec<GitHubRepo> = response.json().await.map_err(RemoteError::Reqwest)?;
        Ok(repos.into_iter().map(RemoteRepository::from).collect())
    }
}

impl RemoteProvider for GitHubClient {
    fn list_org_repos<'a>(
        &'a self,
        org: &'a str,
    ) -> BoxFuture<'a, TugResult<Vec<RemoteRepository>>> {
        Box::pin(async move {
            let mut all = Vec::new();
            for page in 1.. {
                let repos = self.list_page(org, page).await?;
                let count = repos.len();
                debug!(org, page, count, "listed github repositories");
                all.extend(repos);
                if count < PER_PAGE {
                    break;
                }
            }
            Ok(all)
        })
    }

    fn get_repo<'a>(
        &'a self,
        owner: &'a str,
        name: &'a str,
    ) -> BoxFuture<'a, TugResult<Option<RemoteRepository>>> {
        Box::pin(async move {
            let url = endpoint(&self.base, &["repos", owner, name]);
            let Some(response) = send(self.get(&url), &url).await? else {
                return Ok(None);
            };
            let repo: GitHubRepo = response.json().await.map_err(RemoteError::Reqwest)?;
            Ok(Some(repo.into()))
        })
    }
}
