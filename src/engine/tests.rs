// tugboat: multi-repository management for Gitea and GitHub
//
// SPDX-FileCopyrightText: 2026 Tugboat Developers
// SPDX-License-Identifier: GPL-3.0-or-later

use super::decision::{
    Outcome, Plan, PullMode, SkipReason, Step, decide_pull, decide_push, execute, plan_sync,
};
use super::expand::{ExpandMode, OrgKey, expand_targets, foldout_jobs};
use super::reconcile::{DegradedOrg, IndexEntry, RemoteIndex};
use super::{CloneFilter, CloneOutcome, CloneReport, Engine, ParentClone};
use crate::config::{Config, ProviderConfig, ProviderKind, Target};
use crate::error::{RemoteError, TargetError, TugResult, TugboatError};
use crate::foldout::MANIFEST_FILE;
use crate::git::RepoStatus;
use crate::git::backend::GitOutput;
use crate::git::backend::scripted::ScriptedGit;
use crate::remote::{ProviderMap, RemoteProvider, RemoteRepository};
use futures_util::future::BoxFuture;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Provider answering from fixed per-org listings.
#[derive(Default)]
struct FakeProvider {
    orgs: BTreeMap<String, Result<Vec<RemoteRepository>, (u16, String)>>,
}

fn http_error(org: &str, status: u16, body: &str) -> TugboatError {
    RemoteError::Http {
        status,
        url: format!("https://git.example.com/api/v1/orgs/{org}/repos"),
        body: body.to_string(),
    }
    .into()
}

impl FakeProvider {
    fn org(mut self, org: &str, repos: Vec<RemoteRepository>) -> Self {
        self.orgs.insert(org.to_string(), Ok(repos));
        self
    }

    fn failing(mut self, org: &str, status: u16, body: &str) -> Self {
        self.orgs
            .insert(org.to_string(), Err((status, body.to_string())));
        self
    }
}

impl RemoteProvider for FakeProvider {
    fn list_org_repos<'a>(
        &'a self,
        org: &'a str,
    ) -> BoxFuture<'a, TugResult<Vec<RemoteRepository>>> {
        Box::pin(async move {
            match self.orgs.get(org) {
                Some(Ok(repos)) => Ok(repos.clone()),
                Some(Err((status, body))) => Err(http_error(org, *status, body)),
                None => Ok(Vec::new()),
            }
        })
    }

    fn get_repo<'a>(
        &'a self,
        owner: &'a str,
        name: &'a str,
    ) -> BoxFuture<'a, TugResult<Option<RemoteRepository>>> {
        Box::pin(async move {
            match self.orgs.get(owner) {
                Some(Ok(repos)) => Ok(repos.iter().find(|r| r.name == name).cloned()),
                Some(Err((status, body))) => Err(http_error(owner, *status, body)),
                None => Ok(None),
            }
        })
    }
}

fn remote(org: &str, name: &str) -> RemoteRepository {
    RemoteRepository {
        name: name.to_string(),
        full_name: format!("{org}/{name}"),
        clone_url: format!("https://git.example.com/{org}/{name}.git"),
        ssh_url: format!("git@git.example.com:{org}/{name}.git"),
        ..RemoteRepository::default()
    }
}

fn archived(mut repo: RemoteRepository) -> RemoteRepository {
    repo.archived = true;
    repo
}

fn empty(mut repo: RemoteRepository) -> RemoteRepository {
    repo.empty = true;
    repo
}

fn org_target(name: &str, path: &Path) -> Target {
    Target {
        name: name.to_string(),
        provider: "gitea".to_string(),
        org: name.to_string(),
        repo: None,
        path: path.to_path_buf(),
    }
}

fn repo_target(name: &str, org: &str, repo: &str, path: &Path) -> Target {
    Target {
        name: name.to_string(),
        provider: "gitea".to_string(),
        org: org.to_string(),
        repo: Some(repo.to_string()),
        path: path.to_path_buf(),
    }
}

fn config(targets: Vec<Target>) -> Arc<Config> {
    Arc::new(Config {
        workers: 2,
        providers: BTreeMap::from([(
            "gitea".to_string(),
            ProviderConfig::new(ProviderKind::Gitea, "https://git.example.com", "tok"),
        )]),
        targets,
    })
}

fn providers(fake: FakeProvider) -> ProviderMap {
    let fake: Arc<dyn RemoteProvider> = Arc::new(fake);
    BTreeMap::from([("gitea".to_string(), fake)])
}

fn mkrepo(path: &Path) {
    std::fs::create_dir_all(path.join(".git")).unwrap();
}

fn status(name: &str) -> RepoStatus {
    RepoStatus {
        path: PathBuf::from("/work/infra").join(name),
        target: "infra".to_string(),
        provider: "gitea".to_string(),
        org: "infra".to_string(),
        name: name.to_string(),
        branch: "main".to_string(),
        can_fast_forward: true,
        ..RepoStatus::default()
    }
}

// --- expansion ---

#[test]
fn test_expand_org_lists_working_copies() {
    let dir = tempfile::tempdir().unwrap();
    let infra = dir.path().join("infra");
    mkrepo(&infra.join("web"));
    mkrepo(&infra.join("api"));
    std::fs::create_dir_all(infra.join("notes")).unwrap();
    std::fs::write(infra.join("README"), "x").unwrap();

    let expansion = expand_targets(&[org_target("infra", &infra)]).unwrap();
    let names: Vec<_> = expansion.jobs.iter().map(|j| j.name.as_str()).collect();
    assert_eq!(names, ["api", "web"]);
    assert!(expansion.jobs.iter().all(|j| j.target == "infra"));
    assert_eq!(expansion.org_keys, [OrgKey::new("gitea", "infra")]);
}

#[test]
fn test_expand_repo_target_with_foldouts() {
    let dir = tempfile::tempdir().unwrap();
    let app = dir.path().join("app");
    mkrepo(&app);
    mkrepo(&app.join("vendor/lib"));
    std::fs::write(
        app.join(MANIFEST_FILE),
        r#"{"repos": [{"name": "shared/lib", "target": "vendor/lib"}, {"name": "tools/cli"}]}"#,
    )
    .unwrap();
    let target = repo_target("app", "acme", "app", &app);

    let expansion = expand_targets(std::slice::from_ref(&target)).unwrap();
    let jobs: Vec<_> = expansion
        .jobs
        .iter()
        .map(|j| (j.org.as_str(), j.name.as_str()))
        .collect();
    assert_eq!(jobs, [("acme", "app"), ("shared", "lib")]);
    assert_eq!(
        expansion.org_keys,
        [OrgKey::new("gitea", "acme"), OrgKey::new("gitea", "shared")]
    );

    let pending = foldout_jobs(&target, ExpandMode::Clone).unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].manifest_name, "tools/cli");
    assert_eq!(pending[0].path, app.join("cli"));
}

#[test]
fn test_expand_missing_path_fails() {
    let dir = tempfile::tempdir().unwrap();
    let err = expand_targets(&[org_target("infra", &dir.path().join("gone"))]).unwrap_err();
    assert!(matches!(err, TugboatError::Target(ref e) if matches!(**e, TargetError::PathNotFound { .. })));
}

#[test]
fn test_expand_invalid_foldout_fails() {
    let dir = tempfile::tempdir().unwrap();
    let app = dir.path().join("app");
    mkrepo(&app);
    std::fs::write(
        app.join(MANIFEST_FILE),
        r#"{"repos": [{"name": "a/x", "target": "dup"}, {"name": "b/y", "target": "dup"}]}"#,
    )
    .unwrap();

    let err = expand_targets(&[repo_target("app", "acme", "app", &app)]).unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"foldout error: invalid foldout: duplicate foldout target dup");
}

// --- target selection ---

#[test]
fn test_targets_for_selection() {
    let engine = Engine::new(
        config(vec![
            org_target("infra", Path::new("/a")),
            org_target("web", Path::new("/b")),
        ]),
        ProviderMap::new(),
        Arc::new(ScriptedGit::new()),
    );

    assert_eq!(engine.targets_for(&[]).unwrap().len(), 2);

    let names = ["web".to_string(), "infra".to_string(), "web".to_string()];
    let selected: Vec<_> = engine
        .targets_for(&names)
        .unwrap()
        .into_iter()
        .map(|t| t.name)
        .collect();
    assert_eq!(selected, ["web", "infra"]);

    let err = engine
        .targets_for(&["nope".to_string(), "infra".to_string(), "gone".to_string()])
        .unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"target error: unknown targets: nope, gone");
}

// --- reconciliation ---

#[test]
fn test_annotate_marks_archived_and_orphans() {
    let index = RemoteIndex::from_entries([
        (
            OrgKey::new("gitea", "infra"),
            IndexEntry::Ready(BTreeMap::from([
                ("api".to_string(), remote("infra", "api")),
                ("old".to_string(), archived(remote("infra", "old"))),
            ])),
        ),
        (
            OrgKey::new("gitea", "web"),
            IndexEntry::Degraded(DegradedOrg {
                key: OrgKey::new("gitea", "web"),
                reason: "timeout".to_string(),
            }),
        ),
    ]);

    let mut site = status("site");
    site.org = "web".to_string();
    let mut other = status("tool");
    other.provider = "github".to_string();
    let mut broken = status("ghost");
    broken.error = Some("getting branch: boom".to_string());

    let mut statuses = vec![status("api"), status("old"), status("gone"), site, other, broken];
    index.annotate(&mut statuses);

    let marks: Vec<_> = statuses
        .iter()
        .map(|s| (s.name.as_str(), s.archived, s.orphan))
        .collect();
    assert_eq!(
        marks,
        [
            ("api", false, false),
            ("old", true, false),
            ("gone", false, true),
            ("site", false, false),
            ("tool", false, true),
            ("ghost", false, false),
        ]
    );
    assert_eq!(index.degraded().len(), 1);
}

#[tokio::test]
async fn test_index_build_degrades_failed_orgs() {
    let fake = FakeProvider::default()
        .org("infra", vec![remote("infra", "api")])
        .failing("web", 500, "internal");
    let keys = vec![
        OrgKey::new("gitea", "infra"),
        OrgKey::new("gitea", "web"),
        OrgKey::new("gitlab", "x"),
    ];

    let index = RemoteIndex::build(&providers(fake), keys, 2).await;
    assert!(matches!(
        index.get(&OrgKey::new("gitea", "infra")),
        Some(IndexEntry::Ready(repos)) if repos.contains_key("api")
    ));
    let reasons: Vec<_> = index
        .degraded()
        .into_iter()
        .map(|d| format!("{}: {}", d.key, d.reason))
        .collect();
    insta::assert_debug_snapshot!(reasons, @r#"
    [
        "gitea/web: remote error: API error (status 500) from https://git.example.com/api/v1/orgs/web/repos: internal",
        "gitlab/x: no client for provider gitlab",
    ]
    "#);
}

// --- decisions ---

#[test]
fn test_plan_sync_scenarios() {
    let mut behind = status("a");
    behind.behind = 2;
    assert_eq!(
        plan_sync(&behind, true),
        Plan::Apply {
            pull: Some(PullMode { ff_only: true }),
            push: false
        }
    );

    let mut ahead = status("b");
    ahead.ahead = 3;
    assert_eq!(
        plan_sync(&ahead, true),
        Plan::Apply {
            pull: None,
            push: true
        }
    );

    let mut diverged = status("c");
    diverged.ahead = 1;
    diverged.behind = 1;
    diverged.can_fast_forward = false;
    assert_eq!(
        plan_sync(&diverged, true),
        Plan::Skip(SkipReason::DivergedFastForwardOnly)
    );
    assert_eq!(
        plan_sync(&diverged, false),
        Plan::Apply {
            pull: Some(PullMode { ff_only: false }),
            push: true
        }
    );

    let mut dirty = status("d");
    dirty.dirty = true;
    dirty.behind = 1;
    assert_eq!(plan_sync(&dirty, false), Plan::Skip(SkipReason::Dirty));

    assert_eq!(
        plan_sync(&status("e"), true),
        Plan::Apply {
            pull: None,
            push: false
        }
    );
}

#[test]
fn test_push_and_pull_decisions() {
    let mut both = status("a");
    both.ahead = 1;
    both.behind = 1;
    assert_eq!(decide_push(&both), Plan::Skip(SkipReason::BehindRemote));
    assert_eq!(decide_push(&status("b")), Plan::Nothing);

    let mut failed = status("c");
    failed.error = Some("checking status: boom".to_string());
    assert_eq!(
        decide_push(&failed),
        Plan::Error("checking status: boom".to_string())
    );
    assert_eq!(
        decide_pull(&failed, true),
        Plan::Error("checking status: boom".to_string())
    );
    assert_eq!(
        decide_pull(&status("d"), false),
        Plan::Apply {
            pull: Some(PullMode { ff_only: false }),
            push: false
        }
    );
    assert_eq!(SkipReason::BehindRemote.to_string(), "behind remote, pull first");
}

#[tokio::test]
async fn test_execute_pull_failure_skips_push() {
    let mut repo = status("api");
    repo.ahead = 1;
    repo.behind = 1;
    let git = ScriptedGit::new().on(
        &repo.path,
        "pull --ff-only",
        GitOutput::failed(128, "fatal: Not possible to fast-forward, aborting.\n"),
    );

    let plan = Plan::Apply {
        pull: Some(PullMode { ff_only: true }),
        push: true,
    };
    let report = execute(&git, &repo, plan).await;

    match report.outcome {
        Outcome::Failed { step, message } => {
            assert_eq!(step, Step::Pull);
            assert!(message.contains("Not possible to fast-forward"));
        }
        other => panic!("expected pull failure, got {other:?}"),
    }
    assert!(git.calls_in(&repo.path, "push").is_empty());
}

#[tokio::test]
async fn test_execute_pull_then_push() {
    let mut repo = status("api");
    repo.ahead = 2;
    repo.behind = 1;
    let git = ScriptedGit::new();

    let report = execute(&git, &repo, plan_sync(&repo, true)).await;
    assert_eq!(
        report.outcome,
        Outcome::Done {
            pulled: Some(1),
            pushed: Some(2)
        }
    );
    let args: Vec<_> = git.calls().into_iter().map(|(_, args)| args).collect();
    assert_eq!(args, ["pull --ff-only", "push"]);
}

// --- engine ---

#[tokio::test]
async fn test_status_report_sorts_and_reconciles() {
    let dir = tempfile::tempdir().unwrap();
    let infra = dir.path().join("infra");
    let web = dir.path().join("web");
    for path in [infra.join("api"), infra.join("stale"), web.join("site")] {
        mkrepo(&path);
    }

    let git = ScriptedGit::new()
        .repo(infra.join("api"), "main", 2, 0)
        .repo(infra.join("stale"), "main", 0, 0)
        .repo(web.join("site"), "main", 0, 0)
        .on(web.join("site"), "status --porcelain", GitOutput::ok(" M index.html\n"));
    let fake = FakeProvider::default()
        .org("infra", vec![remote("infra", "api")])
        .org("web", vec![archived(remote("web", "site"))]);

    let engine = Engine::new(
        config(vec![org_target("web", &web), org_target("infra", &infra)]),
        providers(fake),
        Arc::new(git),
    );
    let report = engine.status_report(&[], true).await.unwrap();

    let rows: Vec<_> = report
        .statuses
        .iter()
        .map(|s| format!("{}/{} [{}]", s.target, s.name, s.flags().join(", ")))
        .collect();
    insta::assert_debug_snapshot!(rows, @r#"
    [
        "infra/api [2 ahead]",
        "infra/stale [orphan]",
        "web/site [dirty, archived]",
    ]
    "#);
    assert_eq!(report.timings.len(), 3);
    assert!(report.degraded.is_empty());

    let summary = report.summary();
    assert_eq!(summary.clean, 0);
    assert_eq!(summary.dirty, 1);
    assert_eq!(summary.ahead, 1);
    assert_eq!(summary.errors, 0);
}

#[tokio::test]
async fn test_status_report_degraded_org_keeps_flags() {
    let dir = tempfile::tempdir().unwrap();
    let infra = dir.path().join("infra");
    mkrepo(&infra.join("api"));

    let git = ScriptedGit::new().repo(infra.join("api"), "main", 0, 0);
    let fake = FakeProvider::default().failing("infra", 502, "bad gateway");
    let engine = Engine::new(
        config(vec![org_target("infra", &infra)]),
        providers(fake),
        Arc::new(git),
    );

    let report = engine.status_report(&[], false).await.unwrap();
    assert!(!report.statuses[0].orphan);
    assert!(report.timings.is_empty());
    assert_eq!(report.degraded.len(), 1);
    assert_eq!(
        report.degraded[0].reason,
        "remote error: API error (status 502) from https://git.example.com/api/v1/orgs/infra/repos: bad gateway"
    );
    assert_eq!(report.summary().clean, 1);
}

#[tokio::test]
async fn test_sync_mutates_only_where_decided() {
    let dir = tempfile::tempdir().unwrap();
    let infra = dir.path().join("infra");
    let names = ["dirty", "behind", "diverged", "ahead"];
    for name in names {
        mkrepo(&infra.join(name));
    }

    let git = Arc::new(
        ScriptedGit::new()
            .repo(infra.join("dirty"), "main", 2, 1)
            .on(infra.join("dirty"), "status --porcelain", GitOutput::ok(" M lib.rs\n"))
            .repo(infra.join("behind"), "main", 0, 3)
            .repo(infra.join("diverged"), "main", 2, 3)
            .on(
                infra.join("diverged"),
                "merge-base --is-ancestor main origin/main",
                GitOutput::failed(1, ""),
            )
            .repo(infra.join("ahead"), "main", 5, 0),
    );
    let fake = FakeProvider::default().org(
        "infra",
        names.iter().map(|name| remote("infra", name)).collect(),
    );
    let engine = Engine::new(
        config(vec![org_target("infra", &infra)]),
        providers(fake),
        Arc::clone(&git) as Arc<dyn crate::git::GitRunner>,
    );

    let reports = engine.sync(&[]).await.unwrap();
    let outcomes: BTreeMap<_, _> = reports
        .iter()
        .map(|r| (r.name.as_str(), r.outcome.clone()))
        .collect();
    assert_eq!(outcomes["dirty"], Outcome::Skipped(SkipReason::Dirty));
    assert_eq!(
        outcomes["diverged"],
        Outcome::Skipped(SkipReason::DivergedFastForwardOnly)
    );
    assert_eq!(
        outcomes["behind"],
        Outcome::Done {
            pulled: Some(3),
            pushed: None
        }
    );
    assert_eq!(
        outcomes["ahead"],
        Outcome::Done {
            pulled: None,
            pushed: Some(5)
        }
    );

    let mutations = |name: &str| {
        let path = infra.join(name);
        (
            git.calls_in(&path, "pull").len(),
            git.calls_in(&path, "push").len(),
        )
    };
    assert_eq!(mutations("dirty"), (0, 0));
    assert_eq!(mutations("diverged"), (0, 0));
    assert_eq!(mutations("behind"), (1, 0));
    assert_eq!(mutations("ahead"), (0, 1));
}

#[tokio::test]
async fn test_push_skips_repos_behind() {
    let dir = tempfile::tempdir().unwrap();
    let infra = dir.path().join("infra");
    mkrepo(&infra.join("api"));
    mkrepo(&infra.join("web"));

    let git = Arc::new(
        ScriptedGit::new()
            .repo(infra.join("api"), "main", 1, 0)
            .repo(infra.join("web"), "main", 1, 1)
            .on(
                infra.join("web"),
                "merge-base --is-ancestor main origin/main",
                GitOutput::failed(1, ""),
            ),
    );
    let fake = FakeProvider::default().org("infra", vec![remote("infra", "api"), remote("infra", "web")]);
    let engine = Engine::new(
        config(vec![org_target("infra", &infra)]),
        providers(fake),
        Arc::clone(&git) as Arc<dyn crate::git::GitRunner>,
    );

    let reports = engine.push(&[]).await.unwrap();
    let outcomes: Vec<_> = reports.iter().map(|r| (r.name.as_str(), &r.outcome)).collect();
    assert_eq!(
        outcomes,
        [
            (
                "api",
                &Outcome::Done {
                    pulled: None,
                    pushed: Some(1)
                }
            ),
            ("web", &Outcome::Skipped(SkipReason::BehindRemote)),
        ]
    );
    assert!(git.calls_in(infra.join("web"), "push").is_empty());
}

#[tokio::test]
async fn test_clone_org_filters_and_skips_existing() {
    let dir = tempfile::tempdir().unwrap();
    let infra = dir.path().join("infra");
    mkrepo(&infra.join("api"));

    let web_dest = infra.join("web");
    let git = Arc::new(ScriptedGit::new().on(
        &infra,
        &format!(
            "clone --quiet https://git.example.com/infra/web.git {}",
            web_dest.display()
        ),
        GitOutput::failed(128, "fatal: could not read Username\n"),
    ));
    let fake = FakeProvider::default().org(
        "infra",
        vec![
            remote("infra", "web"),
            remote("infra", "api"),
            archived(remote("infra", "old")),
            empty(remote("infra", "blank")),
            remote("infra", "docs"),
        ],
    );
    let engine = Engine::new(
        config(vec![org_target("infra", &infra)]),
        providers(fake),
        Arc::clone(&git) as Arc<dyn crate::git::GitRunner>,
    );

    let filter = CloneFilter {
        exclude_empty: true,
        include_archived: false,
    };
    let reports = engine.clone_missing(&[], filter).await.unwrap();
    let CloneReport::Org { results, .. } = &reports[0] else {
        panic!("expected org report");
    };

    let names: Vec<_> = results.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, ["docs", "web"]);
    assert_eq!(results[0].outcome, CloneOutcome::Cloned);
    assert!(matches!(
        &results[1].outcome,
        CloneOutcome::Failed(message) if message.contains("could not read Username")
    ));
}

#[tokio::test]
async fn test_clone_repo_target_and_foldouts() {
    let dir = tempfile::tempdir().unwrap();
    let app = dir.path().join("app");
    mkrepo(&app);
    std::fs::write(
        app.join(MANIFEST_FILE),
        r#"{"repos": [{"name": "acme/lib"}, {"name": "acme/ghost"}]}"#,
    )
    .unwrap();

    let git = Arc::new(ScriptedGit::new());
    let fake = FakeProvider::default().org("acme", vec![remote("acme", "app"), remote("acme", "lib")]);
    let engine = Engine::new(
        config(vec![repo_target("app", "acme", "app", &app)]),
        providers(fake),
        Arc::clone(&git) as Arc<dyn crate::git::GitRunner>,
    );

    let reports = engine
        .clone_missing(&[], CloneFilter::default())
        .await
        .unwrap();
    let CloneReport::Repo {
        parent,
        foldouts,
        missing,
        ..
    } = &reports[0]
    else {
        panic!("expected repo report");
    };
    assert_eq!(*parent, ParentClone::Exists);
    assert_eq!(missing, &["acme/ghost".to_string()]);
    assert_eq!(foldouts.len(), 1);
    assert_eq!(foldouts[0].path, app.join("lib"));
    assert_eq!(git.calls_in(&app, "clone").len(), 1);
}

#[tokio::test]
async fn test_clone_missing_repo_target_fails() {
    let dir = tempfile::tempdir().unwrap();
    let engine = Engine::new(
        config(vec![repo_target("app", "acme", "app", &dir.path().join("app"))]),
        providers(FakeProvider::default().org("acme", Vec::new())),
        Arc::new(ScriptedGit::new()),
    );

    let err = engine
        .clone_missing(&[], CloneFilter::default())
        .await
        .unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"repo acme/app not found");
}

#[tokio::test]
async fn test_list_org_marks_clones_and_orphans() {
    let dir = tempfile::tempdir().unwrap();
    let infra = dir.path().join("infra");
    mkrepo(&infra.join("api"));
    mkrepo(&infra.join("legacy"));

    let fake = FakeProvider::default().org(
        "infra",
        vec![
            remote("infra", "api"),
            remote("infra", "web"),
            archived(remote("infra", "old")),
        ],
    );
    let engine = Engine::new(
        config(vec![org_target("infra", &infra)]),
        providers(fake),
        Arc::new(ScriptedGit::new()),
    );

    let listings = engine.list(&[], false).await.unwrap();
    let rows: Vec<_> = listings[0]
        .entries
        .iter()
        .map(|e| (e.name.as_str(), e.cloned, e.orphan))
        .collect();
    assert_eq!(
        rows,
        [("api", true, false), ("web", false, false), ("legacy", true, true)]
    );

    let listings = engine.list(&[], true).await.unwrap();
    assert!(listings[0].entries.iter().any(|e| e.name == "old" && e.archived));
}

#[tokio::test]
async fn test_list_org_listing_failure() {
    let dir = tempfile::tempdir().unwrap();
    let infra = dir.path().join("infra");
    mkrepo(&infra.join("api"));

    let engine = Engine::new(
        config(vec![org_target("infra", &infra)]),
        providers(FakeProvider::default().failing("infra", 403, "forbidden")),
        Arc::new(ScriptedGit::new()),
    );

    let listings = engine.list(&[], false).await.unwrap();
    assert_eq!(
        listings[0].error.as_deref(),
        Some(
            "remote error: API error (status 403) from https://git.example.com/api/v1/orgs/infra/repos: forbidden"
        )
    );
    assert!(listings[0].entries.iter().all(|e| e.cloned && !e.orphan));
}
