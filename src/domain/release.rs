use chrono::{DateTime, Utc};
use serde::Serialize;

use super::commit::Commit;

/// Title shown for the synthetic bucket of commits after the latest tag
pub const UNRELEASED_TITLE: &str = "Unreleased";

/// Revision name used as the upper compare bound of the unreleased bucket
pub const HEAD_REVISION: &str = "HEAD";

/// One version's worth of history
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReleaseEntry {
    /// `None` only for the unreleased bucket
    pub version: Option<String>,
    pub title: String,
    pub date: DateTime<Utc>,
    /// Newest first
    pub commits: Vec<Commit>,
    pub is_unreleased: bool,
    pub compare_from: String,
    pub compare_to: String,
    pub compare_url: Option<String>,
    pub summary: Option<String>,
    /// Major component differs from the next older release
    pub major: bool,
}

impl ReleaseEntry {
    /// Create an entry with no display data attached yet
    pub fn new(version: Option<String>, date: DateTime<Utc>, is_unreleased: bool) -> Self {
        ReleaseEntry {
            version,
            title: String::new(),
            date,
            commits: Vec::new(),
            is_unreleased,
            compare_from: String::new(),
            compare_to: String::new(),
            compare_url: None,
            summary: None,
            major: false,
        }
    }

    /// The commit the release tag points at, if this entry is tagged in history
    pub fn boundary_commit(&self) -> Option<&Commit> {
        self.commits.iter().find(|c| c.tag.is_some())
    }

    pub fn has_breaking_changes(&self) -> bool {
        self.commits.iter().any(|c| c.breaking)
    }
}

/// Release entries, newest first
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Timeline {
    pub releases: Vec<ReleaseEntry>,
}

impl Timeline {
    pub fn new(releases: Vec<ReleaseEntry>) -> Self {
        Timeline { releases }
    }

    pub fn is_empty(&self) -> bool {
        self.releases.is_empty()
    }

    pub fn len(&self) -> usize {
        self.releases.len()
    }

    pub fn unreleased(&self) -> Option<&ReleaseEntry> {
        self.releases.first().filter(|r| r.is_unreleased)
    }

    /// Find a release by its display title
    pub fn find(&self, title: &str) -> Option<&ReleaseEntry> {
        self.releases.iter().find(|r| r.title == title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundary_commit_is_tagged_commit() {
        let date = DateTime::<Utc>::default();
        let mut entry = ReleaseEntry::new(Some("v1.0.0".to_string()), date, false);
        entry.commits.push(Commit::new("a", "fix: thing", date));
        entry
            .commits
            .push(Commit::new("b", "Release", date).with_tag("v1.0.0"));

        assert_eq!(entry.boundary_commit().map(|c| c.hash.as_str()), Some("b"));
    }

    #[test]
    fn test_unreleased_only_when_first() {
        let date = DateTime::<Utc>::default();
        let timeline = Timeline::new(vec![
            ReleaseEntry::new(Some("v1.0.0".to_string()), date, false),
            ReleaseEntry::new(None, date, true),
        ]);
        assert!(timeline.unreleased().is_none());
        assert_eq!(timeline.len(), 2);
    }
}
