//! Changelog assembly engine
//!
//! Pure functions from an in-memory commit history to a [Timeline]:
//!
//! 1. [annotator] marks breaking changes, issue references, merges and reverts
//! 2. the raw sequence is truncated by the commit limit
//! 3. [grouper] partitions commits into releases bounded by tags
//! 4. [assembler] attaches labels, compare links and summaries
//!
//! Nothing here performs I/O or keeps state between calls. The only input
//! that is not an argument is the current time used for head buckets, and
//! [build_timeline_at] takes even that explicitly.

pub mod annotator;
pub mod assembler;
pub mod grouper;

pub use annotator::CommitAnnotator;
pub use grouper::{group_releases, merge_branch_commits, HeadPolicy};

use chrono::{DateTime, Utc};

use crate::domain::{Commit, RemoteInfo, Timeline};
use crate::error::Result;
use crate::options::ResolvedOptions;
use crate::version;

/// Build a timeline, dating head buckets with the current time
pub fn build_timeline(
    commits: Vec<Commit>,
    options: &ResolvedOptions,
    remote: &RemoteInfo,
) -> Result<Timeline> {
    build_timeline_at(commits, options, remote, Utc::now())
}

/// Build a timeline from a newest-first commit sequence.
///
/// # Arguments
/// * `commits` - Raw commits, newest first, branches already merged in
/// * `options` - Resolved options
/// * `remote` - Link templates for compare URLs
/// * `now` - Date given to the unreleased or latest-version bucket
///
/// # Returns
/// * `Ok(Timeline)` - Possibly empty
/// * `Err(ChangelogError::InvalidVersion)` - If `latest_version` is malformed
pub fn build_timeline_at(
    commits: Vec<Commit>,
    options: &ResolvedOptions,
    remote: &RemoteInfo,
    now: DateTime<Utc>,
) -> Result<Timeline> {
    if let Some(latest) = &options.latest_version {
        version::validate_version(latest)?;
    }

    // A version that is already tagged has been released; the head commits
    // after it fall back to the unreleased policy
    let latest_version = options
        .latest_version
        .clone()
        .filter(|latest| {
            let tagged = version::is_tagged(latest, &commits);
            if tagged {
                tracing::debug!(version = %latest, "latest version is already tagged, not relabelling");
            }
            !tagged
        });

    let annotator = CommitAnnotator::new(options.breaking_pattern.clone());
    let annotated = annotator.annotate_all(commits);

    let total = annotated.len();
    let limited = options.commit_limit.apply(annotated);
    if limited.len() < total {
        tracing::debug!(
            kept = limited.len(),
            total,
            limit = %options.commit_limit,
            "truncated commit history"
        );
    }

    let initial_commit = limited
        .last()
        .map(|c| c.hash.clone())
        .unwrap_or_default();

    let policy = HeadPolicy {
        latest_version,
        unreleased: options.unreleased,
    };
    let releases = group_releases(limited, &policy, now);
    let releases = assembler::assemble(releases, remote, &initial_commit, options.release_summary);

    tracing::debug!(releases = releases.len(), "assembled timeline");
    Ok(Timeline::new(releases))
}
