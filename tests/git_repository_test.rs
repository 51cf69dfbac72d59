use std::path::Path;

use git2::{Oid, Repository, Signature, Time};
use git_changelog::git::{CommitSource, Git2Repository};
use git_changelog::options::ResolvedOptions;
use regex::Regex;
use tempfile::TempDir;

fn signature(time: i64) -> Signature<'static> {
    Signature::new("Test User", "test@example.com", &Time::new(time, 0)).unwrap()
}

fn commit_on(repo: &Repository, update_ref: &str, parent: Option<Oid>, message: &str, time: i64) -> Oid {
    let workdir = repo.workdir().unwrap();
    std::fs::write(workdir.join("file.txt"), message).unwrap();

    let mut index = repo.index().unwrap();
    index.add_path(Path::new("file.txt")).unwrap();
    index.write().unwrap();
    let tree = repo.find_tree(index.write_tree().unwrap()).unwrap();

    let parents: Vec<git2::Commit<'_>> = parent.map(|id| repo.find_commit(id).unwrap()).into_iter().collect();
    let parent_refs: Vec<&git2::Commit<'_>> = parents.iter().collect();
    let sig = signature(time);
    repo.commit(Some(update_ref), &sig, &sig, message, &tree, &parent_refs).unwrap()
}

/// first (v0.1.0, lightweight) <- second <- third (v1.0.0, annotated) <- fourth
fn setup_repo() -> (TempDir, Repository) {
    let dir = TempDir::new().unwrap();
    let repo = Repository::init(dir.path()).unwrap();

    let first = commit_on(&repo, "HEAD", None, "First commit", 1_600_000_000);
    let second = commit_on(&repo, "HEAD", Some(first), "Fix crash\n\nFixes #3", 1_600_000_100);
    let third = commit_on(&repo, "HEAD", Some(second), "Release", 1_600_000_200);
    commit_on(&repo, "HEAD", Some(third), "Unreleased work", 1_600_000_300);

    let first_obj = repo.find_object(first, None).unwrap();
    repo.tag_lightweight("v0.1.0", &first_obj, false).unwrap();
    let third_obj = repo.find_object(third, None).unwrap();
    repo.tag("v1.0.0", &third_obj, &signature(1_600_000_250), "Release notes\n", false)
        .unwrap();
    repo.tag_lightweight("nightly", &third_obj, true).unwrap();

    repo.remote("origin", "git@github.com:user/repo.git").unwrap();
    drop(first_obj);
    drop(third_obj);

    (dir, repo)
}

#[test]
fn test_fetch_commits_newest_first() {
    let (_dir, repo) = setup_repo();
    let source = Git2Repository::from_git2(repo);

    let commits = source.fetch_commits(&ResolvedOptions::default(), None).unwrap();
    let subjects: Vec<&str> = commits.iter().map(|c| c.subject.as_str()).collect();
    assert_eq!(subjects, vec!["Unreleased work", "Release", "Fix crash", "First commit"]);
    assert_eq!(commits[2].body, "Fixes #3");
    assert_eq!(commits[0].author, "Test User");
    assert_eq!(commits[0].date.timestamp(), 1_600_000_300);
}

#[test]
fn test_release_tags() {
    let (_dir, repo) = setup_repo();
    let source = Git2Repository::from_git2(repo);

    let commits = source.fetch_commits(&ResolvedOptions::default(), None).unwrap();
    assert_eq!(commits[0].tag, None);
    // `nightly` is not a semantic version and is ignored
    assert_eq!(commits[1].tag.as_deref(), Some("v1.0.0"));
    assert_eq!(commits[1].tag_message.as_deref(), Some("Release notes"));
    assert_eq!(commits[3].tag.as_deref(), Some("v0.1.0"));
    assert_eq!(commits[3].tag_message, None);
}

#[test]
fn test_tag_pattern() {
    let (_dir, repo) = setup_repo();
    let source = Git2Repository::from_git2(repo);

    let options = ResolvedOptions {
        tag_pattern: Some(Regex::new(r"^v0\.").unwrap()),
        ..ResolvedOptions::default()
    };
    let commits = source.fetch_commits(&options, None).unwrap();
    let tags: Vec<&str> = commits.iter().filter_map(|c| c.tag.as_deref()).collect();
    assert_eq!(tags, vec!["v0.1.0"]);
}

#[test]
fn test_branch_history() {
    let (_dir, repo) = setup_repo();
    let first = repo.revparse_single("v0.1.0").unwrap().peel_to_commit().unwrap().id();
    commit_on(&repo, "refs/heads/release", Some(first), "Backport", 1_600_000_150);
    let source = Git2Repository::from_git2(repo);

    let commits = source
        .fetch_commits(&ResolvedOptions::default(), Some("release"))
        .unwrap();
    let subjects: Vec<&str> = commits.iter().map(|c| c.subject.as_str()).collect();
    assert_eq!(subjects, vec!["Backport", "First commit"]);

    assert!(source
        .fetch_commits(&ResolvedOptions::default(), Some("missing"))
        .is_err());
}

#[test]
fn test_fetch_remote() {
    let (_dir, repo) = setup_repo();
    let source = Git2Repository::from_git2(repo);

    let remote = source.fetch_remote("origin").unwrap();
    assert_eq!(
        remote.compare_url("v0.1.0", "v1.0.0").as_deref(),
        Some("https://github.com/user/repo/compare/v0.1.0...v1.0.0")
    );

    let missing = source.fetch_remote("upstream").unwrap();
    assert!(missing.compare_url("a", "b").is_none());
}

#[test]
fn test_message_in_legacy_encoding() {
    let (_dir, repo) = setup_repo();
    let head = repo.head().unwrap().peel_to_commit().unwrap();
    let tree = head.tree().unwrap();
    let sig = signature(1_600_000_400);

    // Latin-1 `é` is not valid UTF-8
    let buffer = repo
        .commit_create_buffer(&sig, &sig, "Fix caf? crash #7\n\nBREAKING CHANGE: none", &tree, &[&head])
        .unwrap();
    let mut bytes = buffer.to_vec();
    let pos = bytes.windows(4).position(|w| w == b"caf?").unwrap();
    bytes[pos + 3] = 0xE9;
    let oid = repo.odb().unwrap().write(git2::ObjectType::Commit, &bytes).unwrap();
    repo.set_head_detached(oid).unwrap();
    drop(tree);
    drop(head);

    let source = Git2Repository::from_git2(repo);
    let commits = source.fetch_commits(&ResolvedOptions::default(), None).unwrap();

    assert_eq!(commits.len(), 5);
    assert!(commits[0].subject.starts_with("Fix caf"));
    assert!(commits[0].subject.ends_with("crash #7"));
    assert_eq!(commits[0].body, "BREAKING CHANGE: none");
}
