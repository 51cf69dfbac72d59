mod common;

use git_changelog::cli::{run_changelog_workflow, Collaborators, WorkflowResult};
use git_changelog::files::MemoryFiles;
use git_changelog::git::MockRepository;
use git_changelog::{ChangelogError, Result};

fn run_with(source: &MockRepository, files: &MemoryFiles, args: &[&str]) -> Result<WorkflowResult> {
    let collab = Collaborators { source, files };
    let argv = std::iter::once("git-changelog").chain(args.iter().copied());
    run_changelog_workflow(argv, &collab)
}

fn run(args: &[&str]) -> Result<WorkflowResult> {
    run_with(&common::repository(), &MemoryFiles::new(), args)
}

#[test]
fn test_default_run_writes_changelog() {
    let source = common::repository();
    let files = MemoryFiles::new();
    let result = run_with(&source, &files, &[]).unwrap();

    let written = files.contents("CHANGELOG.md").expect("changelog written");
    assert_eq!(written, result.changelog);
    assert!(written.starts_with("### Changelog"));

    // Untagged head commits are dropped without --unreleased
    assert!(result.timeline.unreleased().is_none());
    assert!(!written.contains("Unreleased commit"));

    let titles: Vec<&str> = result.timeline.releases.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, vec!["v1.0.0", "v0.1.0"]);
}

#[test]
fn test_unreleased() {
    let result = run(&["--unreleased", "--stdout"]).unwrap();
    assert!(result
        .changelog
        .contains("[Unreleased](https://github.com/user/repo/compare/v1.0.0...HEAD)"));
    assert!(result.changelog.contains("Unreleased commit"));
}

#[test]
fn test_compare_links() {
    let result = run(&["--stdout"]).unwrap();
    assert!(result
        .changelog
        .contains("### [v1.0.0](https://github.com/user/repo/compare/v0.1.0...v1.0.0)"));
    assert!(result
        .changelog
        .contains("#### [v0.1.0](https://github.com/user/repo/compare/5e6f7a8b9c0d...v0.1.0)"));
}

#[test]
fn test_breaking_changes() {
    let result = run(&["--stdout"]).unwrap();
    assert!(result.changelog.contains("**Breaking change:** Some breaking change"));
}

#[test]
fn test_merge_and_fix_links() {
    let result = run(&["--stdout"]).unwrap();
    assert!(result
        .changelog
        .contains("Merge pull request #5 from user/branch [`#5`](https://github.com/user/repo/pull/5)"));
    assert!(result
        .changelog
        .contains("Minor release closes #2 [`#2`](https://github.com/user/repo/issues/2)"));
}

#[test]
fn test_issue_url() {
    let result = run(&["--stdout", "--issue-url", "https://test.issue.local/issues/{id}"]).unwrap();
    assert!(result.changelog.contains("[`#2`](https://test.issue.local/issues/2)"));
}

#[test]
fn test_release_summary() {
    let result = run(&["--stdout", "--release-summary"]).unwrap();
    assert!(result
        .changelog
        .contains("This is my major release description.\n\n- And a bullet point"));
}

#[test]
fn test_include_branch() {
    let result = run(&["--stdout", "--include-branch", "release"]).unwrap();
    let release = result.timeline.find("v0.2.0").expect("release from included branch");
    assert_eq!(release.commits.len(), 2);
    assert!(result.changelog.contains("Patch on release branch"));
    // The shared merge commit appears once
    assert_eq!(result.changelog.matches("Merge pull request #5").count(), 1);
}

#[test]
fn test_include_missing_branch() {
    let err = run(&["--stdout", "--include-branch", "does-not-exist"]).unwrap_err();
    assert!(matches!(err, ChangelogError::Remote(_)));
}

#[test]
fn test_package_version() {
    let files = MemoryFiles::new().with_file("Cargo.toml", "[package]\nname = \"demo\"\nversion = \"2.0.0\"\n");
    let result = run_with(&common::repository(), &files, &["--stdout", "--package"]).unwrap();

    assert_eq!(result.timeline.releases[0].title, "v2.0.0");
    assert!(result
        .changelog
        .contains("[v2.0.0](https://github.com/user/repo/compare/v1.0.0...v2.0.0)"));
}

#[test]
fn test_package_version_already_tagged() {
    let files = MemoryFiles::new().with_file("Cargo.toml", "[package]\nname = \"demo\"\nversion = \"1.0.0\"\n");
    let result = run_with(&common::repository(), &files, &["--stdout", "--package"]).unwrap();

    let titles: Vec<&str> = result.timeline.releases.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, vec!["v1.0.0", "v0.1.0"]);
    assert!(!result.changelog.contains("compare/v1.0.0...v1.0.0"));
    assert!(!result.changelog.contains("Unreleased commit"));

    let result = run_with(&common::repository(), &files, &["--stdout", "--package", "--unreleased"]).unwrap();
    assert!(result
        .changelog
        .contains("[Unreleased](https://github.com/user/repo/compare/v1.0.0...HEAD)"));
    assert_eq!(result.timeline.releases[1].title, "v1.0.0");
}

#[test]
fn test_package_version_without_prefix() {
    let commits = vec![
        git_changelog::domain::Commit::new("aaaaaaa1", "New work", common::day(3)),
        git_changelog::domain::Commit::new("bbbbbbb2", "Release", common::day(2)).with_tag("1.0.0"),
    ];
    let source = MockRepository::new(commits).with_remote(common::github());
    let files = MemoryFiles::new().with_file("Cargo.toml", "[package]\nname = \"demo\"\nversion = \"2.0.0\"\n");

    let result = run_with(&source, &files, &["--stdout", "--package"]).unwrap();
    assert_eq!(result.timeline.releases[0].title, "2.0.0");
}

#[test]
fn test_custom_package_file() {
    let files = MemoryFiles::new().with_file("test.json", r#"{ "version": "2.0.0" }"#);
    let result = run_with(&common::repository(), &files, &["--stdout", "--package", "test.json"]).unwrap();
    assert_eq!(result.timeline.releases[0].title, "v2.0.0");
}

#[test]
fn test_missing_package() {
    let err = run(&["--stdout", "--package", "does-not-exist.json"]).unwrap_err();
    assert!(matches!(err, ChangelogError::PackageNotFound(_)));
}

#[test]
fn test_latest_version() {
    let result = run(&["--stdout", "--latest-version", "v3.0.0"]).unwrap();
    let latest = &result.timeline.releases[0];
    assert_eq!(latest.title, "v3.0.0");
    assert!(!latest.is_unreleased);
    assert!(result.changelog.contains("Unreleased commit"));
}

#[test]
fn test_latest_version_wins_over_package() {
    let files = MemoryFiles::new().with_file("Cargo.toml", "[package]\nversion = \"2.0.0\"\n");
    let result = run_with(
        &common::repository(),
        &files,
        &["--stdout", "--package", "--latest-version", "v3.0.0"],
    )
    .unwrap();
    assert_eq!(result.timeline.releases[0].title, "v3.0.0");
}

#[test]
fn test_invalid_latest_version() {
    let err = run(&["--stdout", "--latest-version", "invalid"]).unwrap_err();
    assert!(matches!(err, ChangelogError::InvalidVersion(_)));
}

#[test]
fn test_template_not_found() {
    let err = run(&["--stdout", "--template", "not-found"]).unwrap_err();
    assert!(matches!(err, ChangelogError::TemplateNotFound(_)));
}

#[test]
fn test_json_template() {
    let result = run(&["--stdout", "--template", "json"]).unwrap();
    let value: serde_json::Value = serde_json::from_str(&result.changelog).unwrap();
    assert_eq!(value["releases"][0]["title"], "v1.0.0");
    assert_eq!(value["releases"][0]["major"], true);
}

#[test]
fn test_commit_limit() {
    let result = run(&["--stdout", "--commit-limit", "3"]).unwrap();
    assert_eq!(result.timeline.len(), 1);
    let release = &result.timeline.releases[0];
    assert_eq!(release.title, "v1.0.0");
    assert_eq!(release.commits.len(), 2);
    assert_eq!(release.compare_from, "2b3c4d5e6f7a");
}

#[test]
fn test_config_file() {
    let source = common::repository();
    let files = MemoryFiles::new().with_file(".changelog.toml", common::CONFIG_FIXTURE);
    let result = run_with(&source, &files, &[]).unwrap();

    let written = files.contents("HISTORY.md").expect("output from config file");
    assert!(written.starts_with("# Changelog"));
    assert!(written.contains("## [Unreleased]"));
    assert!(written.contains("## [v0.2.0] - 2016-01-07"));
    assert!(written.contains("https://issues.example.com/browse/2"));
    assert!(files.contents("CHANGELOG.md").is_none());
    assert_eq!(result.options.include_branch, vec!["release"]);
}

#[test]
fn test_unknown_flag() {
    let err = run(&["--no-such-flag"]).unwrap_err();
    assert!(matches!(err, ChangelogError::OptionParse(_)));
}
