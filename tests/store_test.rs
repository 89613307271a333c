// tests/store_test.rs
//
// GitStore tests against throwaway repositories created with git2.

use chrono::{TimeZone, Utc};
use git2::{Repository, Signature, Time};
use mono_version::domain::NewRelease;
use mono_version::store::{CommitStore, GitStore, ReleaseStore};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Create a repo with two commits on branch "main" at controlled times
fn setup_test_repo() -> (TempDir, Vec<String>) {
    let temp_dir = TempDir::new().expect("Could not create temp dir");
    let repo = Repository::init(temp_dir.path()).expect("Could not init git repo");

    let mut shas = Vec::new();
    let mut parent: Option<git2::Oid> = None;

    let history: [(&str, i64); 2] = [
        ("feat(foo): first change", 1_000),
        ("fix(foo): second change", 2_000),
    ];

    for (i, (message, secs)) in history.iter().enumerate() {
        let file = temp_dir.path().join("README.md");
        fs::write(&file, format!("revision {}\n", i)).expect("Could not write file");

        let mut index = repo.index().expect("Could not get index");
        index
            .add_path(Path::new("README.md"))
            .expect("Could not add file");
        index.write().expect("Could not write index");

        let tree_id = index.write_tree().expect("Could not write tree");
        let tree = repo.find_tree(tree_id).expect("Could not find tree");
        let signature = Signature::new("Test User", "test@example.com", &Time::new(*secs, 0))
            .expect("Could not build signature");

        let parents: Vec<git2::Commit> = parent
            .map(|oid| vec![repo.find_commit(oid).unwrap()])
            .unwrap_or_default();
        let parent_refs: Vec<&git2::Commit> = parents.iter().collect();

        let oid = repo
            .commit(Some("HEAD"), &signature, &signature, message, &tree, &parent_refs)
            .expect("Could not create commit");

        shas.push(oid.to_string());
        parent = Some(oid);
    }

    let head_commit = repo.find_commit(parent.unwrap()).unwrap();
    repo.branch("main", &head_commit, true)
        .expect("Could not create main branch");

    (temp_dir, shas)
}

#[test]
fn test_list_commits_respects_window() {
    let (temp_dir, shas) = setup_test_repo();
    let store = GitStore::open(temp_dir.path()).unwrap();

    let commits = store
        .list_commits(
            "main",
            Utc.timestamp_opt(1_500, 0).unwrap(),
            Utc.timestamp_opt(2_001, 0).unwrap(),
        )
        .unwrap();

    assert_eq!(commits.len(), 1);
    assert_eq!(commits[0].sha, shas[1]);
    assert_eq!(commits[0].message, "fix(foo): second change");
    assert_eq!(commits[0].author, "Test User");
}

#[test]
fn test_list_commits_upper_bound_is_exclusive() {
    let (temp_dir, shas) = setup_test_repo();
    let store = GitStore::open(temp_dir.path()).unwrap();

    let commits = store
        .list_commits(
            "main",
            Utc.timestamp_opt(0, 0).unwrap(),
            Utc.timestamp_opt(2_000, 0).unwrap(),
        )
        .unwrap();

    assert_eq!(commits.len(), 1);
    assert_eq!(commits[0].sha, shas[0]);
}

#[test]
fn test_list_commits_unknown_branch_fails() {
    let (temp_dir, _) = setup_test_repo();
    let store = GitStore::open(temp_dir.path()).unwrap();

    let result = store.list_commits(
        "does-not-exist",
        Utc.timestamp_opt(0, 0).unwrap(),
        Utc.timestamp_opt(3_000, 0).unwrap(),
    );
    assert!(result.is_err());
}

#[test]
fn test_commit_timestamp() {
    let (temp_dir, shas) = setup_test_repo();
    let store = GitStore::open(temp_dir.path()).unwrap();

    let timestamp = store.commit_timestamp(&shas[1]).unwrap();
    assert_eq!(timestamp.timestamp(), 2_000);
}

#[test]
fn test_commit_timestamp_unknown_revision_fails() {
    let (temp_dir, _) = setup_test_repo();
    let store = GitStore::open(temp_dir.path()).unwrap();

    assert!(store.commit_timestamp("deadbeefdeadbeef").is_err());
}

#[test]
fn test_create_and_list_release_roundtrip() {
    let (temp_dir, shas) = setup_test_repo();

    // Tag creation needs a committer identity in repo config
    {
        let repo = Repository::open(temp_dir.path()).unwrap();
        let mut config = repo.config().unwrap();
        config.set_str("user.name", "Test User").unwrap();
        config.set_str("user.email", "test@example.com").unwrap();
    }

    let store = GitStore::open(temp_dir.path()).unwrap();

    let release = NewRelease {
        tag: "foo-1.0.0".to_string(),
        title: "Foo: 1.0.0".to_string(),
        target_commit: shas[1].clone(),
        body: "changelog body".to_string(),
        prerelease: false,
    };
    store.create_release(&release).unwrap();

    let releases = store.list_releases().unwrap();
    assert_eq!(releases.len(), 1);
    assert_eq!(releases[0].tag, "foo-1.0.0");
    assert_eq!(releases[0].target_commit, shas[1]);
    assert!(releases[0].body.contains("Foo: 1.0.0"));
    assert!(releases[0].body.contains("changelog body"));
}

#[test]
fn test_list_releases_includes_lightweight_tags() {
    let (temp_dir, shas) = setup_test_repo();

    {
        let repo = Repository::open(temp_dir.path()).unwrap();
        let object = repo
            .find_object(git2::Oid::from_str(&shas[0]).unwrap(), None)
            .unwrap();
        repo.tag_lightweight("foo-0.9.0", &object, false).unwrap();
    }

    let store = GitStore::open(temp_dir.path()).unwrap();
    let releases = store.list_releases().unwrap();

    assert_eq!(releases.len(), 1);
    assert_eq!(releases[0].tag, "foo-0.9.0");
    assert_eq!(releases[0].target_commit, shas[0]);
    // Lightweight tags have no tagger; the commit time stands in
    assert_eq!(releases[0].published_at.timestamp(), 1_000);
}

#[test]
fn test_open_outside_repository_fails() {
    let temp_dir = TempDir::new().unwrap();
    assert!(GitStore::open(temp_dir.path()).is_err());
}
