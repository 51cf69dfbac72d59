use regex::Regex;

use crate::domain::{Commit, MergeInfo};

/// Derives breaking, issue, merge and revert markers from commit messages
pub struct CommitAnnotator {
    breaking: Regex,
    issue_ref: Regex,
    fixes: Regex,
    github_merge: Regex,
    bitbucket_merge: Regex,
    gitlab_merge: Regex,
    revert: Regex,
}

impl CommitAnnotator {
    /// Create an annotator flagging commits that match `breaking_pattern`
    pub fn new(breaking_pattern: Regex) -> Self {
        // Patterns below are literals; a failure to compile is a programming error
        let compile = |p: &str| Regex::new(p).expect("built-in commit pattern is valid");

        CommitAnnotator {
            breaking: breaking_pattern,
            issue_ref: compile(r"#(\d+)"),
            fixes: compile(r"(?i)\b(?:close[sd]?|fix(?:e[sd])?|resolve[sd]?):?\s+#(\d+)"),
            github_merge: compile(r"^Merge pull request #(\d+) from (\S+)"),
            bitbucket_merge: compile(r"^Merged in (\S+) \(pull request #(\d+)\)"),
            gitlab_merge: compile(r"(?m)^See merge request (?:\S+)?!(\d+)"),
            revert: compile(r#"^Revert "(.+)"$"#),
        }
    }

    /// Annotate one commit.
    ///
    /// Only adds information: a commit already marked breaking stays breaking,
    /// and fields set by the fetcher are left alone.
    pub fn annotate(&self, mut commit: Commit) -> Commit {
        if self.breaking.is_match(&commit.subject) || self.breaking.is_match(&commit.body) {
            commit.breaking = true;
        }

        commit.issue_ids.extend(
            self.issue_ref
                .captures_iter(&commit.subject)
                .filter_map(|c| c.get(1))
                .map(|m| m.as_str().to_string()),
        );

        for text in [&commit.subject, &commit.body] {
            let ids: Vec<String> = self
                .fixes
                .captures_iter(text)
                .filter_map(|c| c.get(1))
                .map(|m| m.as_str().to_string())
                .collect();
            commit.fixes.extend(ids);
        }

        if commit.merge.is_none() {
            commit.merge = self.parse_merge(&commit);
        }

        if commit.revert.is_none() {
            commit.revert = self
                .revert
                .captures(&commit.subject)
                .and_then(|c| c.get(1))
                .map(|m| m.as_str().to_string());
        }

        commit
    }

    /// Annotate every commit of a sequence, preserving order
    pub fn annotate_all(&self, commits: Vec<Commit>) -> Vec<Commit> {
        commits.into_iter().map(|c| self.annotate(c)).collect()
    }

    fn parse_merge(&self, commit: &Commit) -> Option<MergeInfo> {
        if let Some(captures) = self.github_merge.captures(&commit.subject) {
            return Some(MergeInfo {
                id: captures.get(1)?.as_str().to_string(),
                branch: captures.get(2).map(|m| m.as_str().to_string()),
            });
        }

        if let Some(captures) = self.bitbucket_merge.captures(&commit.subject) {
            return Some(MergeInfo {
                id: captures.get(2)?.as_str().to_string(),
                branch: captures.get(1).map(|m| m.as_str().to_string()),
            });
        }

        // GitLab puts the request reference in the body
        if commit.subject.starts_with("Merge branch ") {
            let captures = self.gitlab_merge.captures(&commit.body)?;
            return Some(MergeInfo {
                id: captures.get(1)?.as_str().to_string(),
                branch: commit.subject.split('\'').nth(1).map(|s| s.to_string()),
            });
        }

        None
    }
}
