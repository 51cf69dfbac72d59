use crate::domain::{ReleaseEntry, RemoteInfo, HEAD_REVISION, UNRELEASED_TITLE};
use crate::version;

/// Attaches display data to grouped releases.
///
/// `initial_commit` is the hash of the oldest commit in the processed
/// sequence; it is the lower compare bound of the oldest release.
pub fn assemble(
    mut releases: Vec<ReleaseEntry>,
    remote: &RemoteInfo,
    initial_commit: &str,
    release_summary: bool,
) -> Vec<ReleaseEntry> {
    let older_versions: Vec<Option<String>> = releases
        .iter()
        .skip(1)
        .map(|r| r.version.clone())
        .chain(std::iter::once(None))
        .collect();

    for (entry, older) in releases.iter_mut().zip(older_versions) {
        entry.title = match &entry.version {
            Some(version) => version.clone(),
            None => UNRELEASED_TITLE.to_string(),
        };

        entry.compare_to = match &entry.version {
            Some(version) if !entry.is_unreleased => version.clone(),
            _ => HEAD_REVISION.to_string(),
        };
        entry.compare_from = older.clone().unwrap_or_else(|| initial_commit.to_string());
        entry.compare_url = remote.compare_url(&entry.compare_from, &entry.compare_to);

        entry.major = match (&older, &entry.version) {
            (Some(older), Some(current)) => version::is_major_change(older, current),
            _ => false,
        };

        if release_summary && !entry.is_unreleased {
            entry.summary = release_summary_text(entry);
        }
    }

    releases
}

/// Tag annotation if present, otherwise the tagged commit's body
fn release_summary_text(entry: &ReleaseEntry) -> Option<String> {
    let boundary = entry.boundary_commit()?;
    let text = boundary
        .tag_message
        .as_deref()
        .filter(|m| !m.trim().is_empty())
        .unwrap_or(boundary.body.as_str())
        .trim();

    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}
