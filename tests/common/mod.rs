#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use git_changelog::domain::{Commit, RemoteInfo};
use git_changelog::git::MockRepository;

pub const CONFIG_FIXTURE: &str = include_str!("../fixtures/changelog.toml");

pub fn day(d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2016, 1, d, 10, 0, 0).unwrap()
}

/// Two releases, one breaking change and an untagged head commit
pub fn history() -> Vec<Commit> {
    vec![
        Commit::from_message("8c2fb8c1d2e3", "Unreleased commit", day(10)),
        Commit::from_message(
            "1a2b3c4d5e6f",
            "Major release\n\nThis is my major release description.\n\n- And a bullet point",
            day(9),
        )
        .with_tag("v1.0.0"),
        Commit::from_message(
            "2b3c4d5e6f7a",
            "Some breaking change\n\nBREAKING CHANGE: settings moved",
            day(8),
        ),
        Commit::from_message("3c4d5e6f7a8b", "Merge pull request #5 from user/branch", day(6)),
        Commit::from_message("4d5e6f7a8b9c", "Minor release closes #2", day(5)).with_tag("v0.1.0"),
        Commit::from_message("5e6f7a8b9c0d", "First commit", day(4)),
    ]
}

/// Commits only reachable from the `release` branch
pub fn release_branch() -> Vec<Commit> {
    vec![
        Commit::from_message("6f7a8b9c0d1e", "Patch on release branch", day(7)).with_tag("v0.2.0"),
        Commit::from_message("3c4d5e6f7a8b", "Merge pull request #5 from user/branch", day(6)),
    ]
}

pub fn github() -> RemoteInfo {
    RemoteInfo::from_url("https://github.com/user/repo").unwrap()
}

pub fn repository() -> MockRepository {
    MockRepository::new(history())
        .with_remote(github())
        .with_branch("release", release_branch())
}
