// tugboat: multi-repository management for Gitea and GitHub
//
// SPDX-FileCopyrightText: 2026 Tugboat Developers
// SPDX-License-Identifier: GPL-3.0-or-later

//! Remote reconciliation: archived and orphan detection.
//!
//! ```text
//! org keys --pool--> list_org_repos --> RemoteIndex
//!                                        key -> Ready(name -> repo)
//!                                        key -> Degraded(reason)
//!
//! annotate(status):
//!   key Degraded        -> untouched, reported separately
//!   key absent          -> orphan
//!   name absent in org  -> orphan
//!   name present        -> archived = remote.archived
//! ```

use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, warn};

use super::expand::OrgKey;
use crate::git::RepoStatus;
use crate::pool;
use crate::remote::{ProviderMap, RemoteProvider, RemoteRepository};

/// An organization whose listing could not be obtained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DegradedOrg {
    pub key: OrgKey,
    pub reason: String,
}

/// Remote state of one organization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexEntry {
    Ready(BTreeMap<String, RemoteRepository>),
    Degraded(DegradedOrg),
}

/// Remote repositories per `(provider, org)`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemoteIndex {
    entries: BTreeMap<OrgKey, IndexEntry>,
}

impl RemoteIndex {
    /// Lists every organization once, in parallel.
    pub async fn build(providers: &ProviderMap, keys: Vec<OrgKey>, workers: usize) -> Self {
        let jobs: Vec<(OrgKey, Option<Arc<dyn RemoteProvider>>)> = keys
            .into_iter()
            .map(|key| {
                let client = providers.get(&key.provider).cloned();
                (key, client)
            })
            .collect();

        let entries = pool::run(jobs, workers, |(key, client)| async move {
            let Some(client) = client else {
                let reason = format!("no client for provider {}", key.provider);
                return (key.clone(), IndexEntry::Degraded(DegradedOrg { key, reason }));
            };
            match client.list_org_repos(&key.org).await {
                Ok(repos) => {
                    debug!(org = %key, count = repos.len(), "remote index entry ready");
                    let by_name = repos.into_iter().map(|r| (r.name.clone(), r)).collect();
                    (key, IndexEntry::Ready(by_name))
                }
                Err(e) => {
                    let reason = e.to_string();
                    (key.clone(), IndexEntry::Degraded(DegradedOrg { key, reason }))
                }
            }
        })
        .await;

        let index = Self {
            entries: entries.into_iter().collect(),
        };
        for degraded in index.degraded() {
            warn!(org = %degraded.key, reason = %degraded.reason, "remote listing failed, skipping archived/orphan checks");
        }
        index
    }

    /// Builds an index from known entries.
    #[must_use]
    pub fn from_entries(entries: impl IntoIterator<Item = (OrgKey, IndexEntry)>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    #[must_use]
    pub fn get(&self, key: &OrgKey) -> Option<&IndexEntry> {
        self.entries.get(key)
    }

    /// Organizations whose listing failed, in key order.
    #[must_use]
    pub fn degraded(&self) -> Vec<DegradedOrg> {
        self.entries
            .values()
            .filter_map(|entry| match entry {
                IndexEntry::Degraded(d) => Some(d.clone()),
                IndexEntry::Ready(_) => None,
            })
            .collect()
    }

    /// Sets `archived` and `orphan` on each status. Statuses that failed are
    /// left alone.
    pub fn annotate(&self, statuses: &mut [RepoStatus]) {
        for status in statuses.iter_mut().filter(|s| !s.is_error()) {
            let key = OrgKey::new(&status.provider, &status.org);
            match self.entries.get(&key) {
                Some(IndexEntry::Degraded(_)) => {}
                None => status.orphan = true,
                Some(IndexEntry::Ready(repos)) => match repos.get(&status.name) {
                    Some(remote) => status.archived = remote.archived,
                    None => status.orphan = true,
                },
            }
        }
    }
}
