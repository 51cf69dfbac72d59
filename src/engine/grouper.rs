use std::collections::HashSet;

use chrono::{DateTime, Utc};

use crate::domain::{Commit, ReleaseEntry};

/// How the commits above the newest tag are treated
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeadPolicy {
    /// Label for commits not yet tagged in history
    pub latest_version: Option<String>,
    /// Keep untagged head commits as an unreleased bucket
    pub unreleased: bool,
}

/// Partitions an annotated, newest-first commit sequence into releases.
///
/// Tags mark the top of each release: a tagged commit closes the group above
/// it and becomes the first commit of its own release. Commits above the
/// newest tag form the head bucket, which becomes
/// - a release labelled `latest_version`, if one is given,
/// - the unreleased entry, if `unreleased` is set,
/// - nothing otherwise (there is no tag to anchor them to).
///
/// When `latest_version` is given but the head bucket is empty, the newest
/// tagged group takes the `latest_version` label instead of its own tag.
///
/// Entries come back in history order with no display data attached.
pub fn group_releases(commits: Vec<Commit>, policy: &HeadPolicy, now: DateTime<Utc>) -> Vec<ReleaseEntry> {
    let mut releases = Vec::new();
    let mut current = head_bucket(policy, now);
    let mut seen_tag = false;

    for commit in commits {
        if let Some(tag) = commit.tag.clone() {
            if keep_group(&current, policy, seen_tag) {
                releases.push(current);
            } else if !current.commits.is_empty() {
                tracing::debug!(
                    dropped = current.commits.len(),
                    "dropping untagged commits above the newest tag"
                );
            }

            let version = if !seen_tag && releases.is_empty() {
                // Newest tagged group, head bucket was not kept
                policy.latest_version.clone().unwrap_or(tag)
            } else {
                tag
            };
            current = ReleaseEntry::new(Some(version), commit.date, false);
            seen_tag = true;
        }
        current.commits.push(commit);
    }

    if keep_group(&current, policy, seen_tag) {
        releases.push(current);
    } else if !current.commits.is_empty() {
        tracing::debug!(
            dropped = current.commits.len(),
            "no release tags found, dropping untagged commits"
        );
    }

    releases
}

fn head_bucket(policy: &HeadPolicy, now: DateTime<Utc>) -> ReleaseEntry {
    match &policy.latest_version {
        Some(version) => ReleaseEntry::new(Some(version.clone()), now, false),
        None => ReleaseEntry::new(None, now, true),
    }
}

/// Tagged groups are always kept; the head bucket only when it has commits
/// and the policy asks for it.
fn keep_group(group: &ReleaseEntry, policy: &HeadPolicy, seen_tag: bool) -> bool {
    if seen_tag {
        return true;
    }
    !group.commits.is_empty() && (policy.latest_version.is_some() || policy.unreleased)
}

/// Merges commits fetched from an included branch into the main sequence.
///
/// Commits already present (by hash) are skipped. The result is stably sorted
/// by date, newest first, so main-branch commits stay ahead of included ones
/// with the same timestamp.
pub fn merge_branch_commits(main: Vec<Commit>, included: Vec<Commit>) -> Vec<Commit> {
    let known: HashSet<String> = main.iter().map(|c| c.hash.clone()).collect();
    let before = main.len();

    let mut merged = main;
    merged.extend(included.into_iter().filter(|c| !known.contains(&c.hash)));
    tracing::debug!(added = merged.len() - before, "merged commits from included branch");

    merged.sort_by(|a, b| b.date.cmp(&a.date));
    merged
}
