use regex::Regex;

use crate::domain::Commit;
use crate::error::{ChangelogError, Result};

/// Parses a version label into a semantic version.
///
/// Strips a single leading `v` and hands the rest to `semver`, so pre-release
/// and build suffixes are accepted (`v2.0.0-rc.1+build.5`).
///
/// # Example
/// ```ignore
/// assert!(parse_version("v1.2.3").is_some());
/// assert!(parse_version("1.2").is_none());
/// ```
pub fn parse_version(label: &str) -> Option<semver::Version> {
    let clean = label.strip_prefix('v').unwrap_or(label);
    semver::Version::parse(clean).ok()
}

/// Validates a latest-version override.
///
/// # Returns
/// * `Ok(&str)` - The input, unchanged
/// * `Err(ChangelogError::InvalidVersion)` - If the input is not a semantic version
pub fn validate_version(version: &str) -> Result<&str> {
    match parse_version(version) {
        Some(_) => Ok(version),
        None => Err(ChangelogError::invalid_version(version)),
    }
}

/// Applies the tag prefix convention of the history to a bare version.
///
/// Package files carry versions without a prefix; if any tag in the history
/// starts with `v`, the returned label does too.
pub fn with_tag_prefix(version: &str, commits: &[Commit]) -> String {
    let uses_prefix = commits
        .iter()
        .filter_map(|c| c.tag.as_deref())
        .any(|tag| tag.starts_with('v'));

    if uses_prefix && !version.starts_with('v') {
        format!("v{}", version)
    } else {
        version.to_string()
    }
}

/// True when some commit carries a tag naming the same version.
///
/// Compares semantic versions, so `1.0.0` matches a `v1.0.0` tag; labels
/// that do not parse must match a tag exactly.
pub fn is_tagged(version: &str, commits: &[Commit]) -> bool {
    let wanted = parse_version(version);
    commits
        .iter()
        .filter_map(|c| c.tag.as_deref())
        .any(|tag| match (&wanted, parse_version(tag)) {
            (Some(wanted), Some(found)) => *wanted == found,
            _ => tag == version,
        })
}

/// Decides whether a tag name marks a release.
///
/// With a pattern the tag must match it; without one the tag must parse as a
/// semantic version.
pub fn is_release_tag(tag: &str, pattern: Option<&Regex>) -> bool {
    match pattern {
        Some(re) => re.is_match(tag),
        None => parse_version(tag).is_some(),
    }
}

/// True when `newer` has a different major component than `older`.
///
/// Labels that do not parse never count as major changes.
pub fn is_major_change(older: &str, newer: &str) -> bool {
    match (parse_version(older), parse_version(newer)) {
        (Some(old), Some(new)) => old.major != new.major,
        _ => false,
    }
}
