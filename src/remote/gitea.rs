// tugboat: multi-repository management for Gitea and GitHub
//
// SPDX-FileCopyrightText: 2026 Tugboat Developers
// SPDX-License-Identifier: GPL-3.0-or-later

//! Gitea REST client (`/api/v1`).

use futures_util::future::BoxFuture;
use reqwest::Url;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use serde::Deserialize;
use tracing::debug;

use super::{RemoteProvider, RemoteRepository, endpoint, parse_base, send, send_required};
use crate::error::{RemoteError, TugResult};

/// Page size for organization listings.
pub const PAGE_LIMIT: usize = 50;

#[derive(Debug, Deserialize)]
struct GiteaRepo {
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
    empty: bool,
    #[serde(default)]
    archived: bool,
    #[serde(default)]
    private: bool,
    #[serde(default)]
    fork: bool,
}

impl From<GiteaRepo> for RemoteRepository {
    fn from(r: GiteaRepo) -> Self {
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
            empty: r.empty,
        }
    }
}

/// Client for one Gitea server.
#[derive(Debug, Clone)]
pub struct GiteaClient {
    http: reqwest::Client,
    base: Url,
    token: String,
}

impl GiteaClient {
    /// Creates a client for the server at `api_url` (the site root, without
    /// `/api/v1`).
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
        self.http
            .get(url.clone())
            .header(AUTHORIZATION, format!("token {}", self.token))
            .header(ACCEPT, "application/json")
    }

    async fn list_page(&self, org: &str, page: usize) -> TugResult<Vec<RemoteRepository>> {
        let mut url = endpoint(&self.base, &["api", "v1", "orgs", org, "repos"]);
        url.query_pairs_mut()
            .append_pair("page", &page.to_string())
            .append_pair("limit", &PAGE_LIMIT.to_string());

        let response = send_required(self.get(&url), &url).await?;
        let repos: Vec<GiteaRepo> = response.json().await.map_err(RemoteError::Reqwest)?;
        Ok(repos.into_iter().map(RemoteRepository::from).collect())
    }
}

impl RemoteProvider for GiteaClient {
    fn list_org_repos<'a>(
        &'a self,
        org: &'a str,
    ) -> BoxFuture<'a, TugResult<Vec<RemoteRepository>>> {
        Box::pin(async move {
            let mut all = Vec::new();
            for page in 1.. {
                let repos = self.list_page(org, page).await?;
                let count = repos.len();
                debug!(org, page, count, "listed gitea repositories");
                all.extend(repos);
                if count < PAGE_LIMIT {
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
            let url = endpoint(&self.base, &["api", "v1", "repos", owner, name]);
            let Some(response) = send(self.get(&url), &url).await? else {
                return Ok(None);
            };
            let repo: GiteaRepo = response.json().await.map_err(RemoteError::Reqwest)?;
            Ok(Some(repo.into()))
        })
    }
}
