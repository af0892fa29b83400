// tugboat: multi-repository management for Gitea and GitHub
//
// SPDX-FileCopyrightText: 2026 Tugboat Developers
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{ProviderClient, RemoteRepository, build_providers, endpoint, parse_base};
use crate::config::{CloneProtocol, Config, ProviderConfig, ProviderKind};
use std::collections::BTreeMap;

fn repo(ssh_url: &str) -> RemoteRepository {
    RemoteRepository {
        name: "api".to_string(),
        clone_url: "https://git.example.com/infra/api.git".to_string(),
        ssh_url: ssh_url.to_string(),
        ..RemoteRepository::default()
    }
}

#[test]
fn test_clone_url_protocols() {
    let with_ssh = repo("git@git.example.com:infra/api.git");
    assert_eq!(
        with_ssh.clone_url_for(CloneProtocol::Https),
        "https://git.example.com/infra/api.git"
    );
    assert_eq!(
        with_ssh.clone_url_for(CloneProtocol::Ssh),
        "git@git.example.com:infra/api.git"
    );
    assert_eq!(
        with_ssh.clone_url_for(CloneProtocol::Auto),
        "git@git.example.com:infra/api.git"
    );

    let without_ssh = repo("");
    assert_eq!(
        without_ssh.clone_url_for(CloneProtocol::Ssh),
        "https://git.example.com/infra/api.git"
    );
    assert_eq!(
        without_ssh.clone_url_for(CloneProtocol::Auto),
        "https://git.example.com/infra/api.git"
    );
}

#[test]
fn test_endpoint_escapes_segments() {
    let base = parse_base("https://ghe.example.com/api/v3/").unwrap();
    let url = endpoint(&base, &["orgs", "my org", "repos"]);
    assert_eq!(
        url.as_str(),
        "https://ghe.example.com/api/v3/orgs/my%20org/repos"
    );

    let root = parse_base("https://api.github.com").unwrap();
    let url = endpoint(&root, &["repos", "acme", "tools"]);
    assert_eq!(url.as_str(), "https://api.github.com/repos/acme/tools");
}

#[test]
fn test_parse_base_rejects_garbage() {
    assert!(parse_base("not a url").is_err());
    assert!(parse_base("mailto:ops@example.com").is_err());
}

#[test]
fn test_provider_client_matches_kind() {
    let http = reqwest::Client::new();
    let gitea = ProviderConfig::new(ProviderKind::Gitea, "https://git.example.com", "t");
    let github = ProviderConfig::new(ProviderKind::GitHub, "https://api.github.com", "t");

    assert!(matches!(
        ProviderClient::from_config(&gitea, http.clone()).unwrap(),
        ProviderClient::Gitea(_)
    ));
    assert!(matches!(
        ProviderClient::from_config(&github, http).unwrap(),
        ProviderClient::GitHub(_)
    ));
}

#[test]
fn test_build_providers_keys_by_id() {
    let config = Config {
        workers: 0,
        providers: BTreeMap::from([
            (
                "work".to_string(),
                ProviderConfig::new(ProviderKind::Gitea, "https://git.example.com", "t"),
            ),
            (
                "gh".to_string(),
                ProviderConfig::new(ProviderKind::GitHub, "https://api.github.com", "t"),
            ),
        ]),
        targets: Vec::new(),
    };
    let providers = build_providers(&config).unwrap();
    let ids: Vec<_> = providers.keys().map(String::as_str).collect();
    assert_eq!(ids, ["gh", "work"]);
}
