use regex::Regex;
use serde::Serialize;

/// Hosting service a remote points at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HostKind {
    GitHub,
    GitLab,
    Bitbucket,
}

/// Link templates for a hosted repository.
///
/// Templates use `{from}`/`{to}` (compare), `{hash}` (commit) and `{id}`
/// (issue, merge request) placeholders. A remote without a recognizable URL
/// has no templates, and every link lookup returns `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RemoteInfo {
    pub base_url: Option<String>,
    pub compare_template: Option<String>,
    pub commit_template: Option<String>,
    pub issue_template: Option<String>,
    pub merge_template: Option<String>,
}

impl RemoteInfo {
    /// Remote with no link templates
    pub fn none() -> Self {
        RemoteInfo::default()
    }

    /// Templates for a repository at `base_url` on the given host
    pub fn for_host(kind: HostKind, base_url: &str) -> Self {
        let base = base_url.trim_end_matches('/');
        let (compare, commit, issue, merge) = match kind {
            HostKind::GitHub => (
                "/compare/{from}...{to}",
                "/commit/{hash}",
                "/issues/{id}",
                "/pull/{id}",
            ),
            HostKind::GitLab => (
                "/-/compare/{from}...{to}",
                "/-/commit/{hash}",
                "/-/issues/{id}",
                "/-/merge_requests/{id}",
            ),
            HostKind::Bitbucket => (
                "/branches/compare/{to}%0D{from}",
                "/commits/{hash}",
                "/issues/{id}",
                "/pull-requests/{id}",
            ),
        };

        RemoteInfo {
            base_url: Some(base.to_string()),
            compare_template: Some(format!("{}{}", base, compare)),
            commit_template: Some(format!("{}{}", base, commit)),
            issue_template: Some(format!("{}{}", base, issue)),
            merge_template: Some(format!("{}{}", base, merge)),
        }
    }

    /// Derive link templates from a git remote URL.
    ///
    /// Accepts `https://host/owner/repo(.git)`, `git@host:owner/repo(.git)` and
    /// `ssh://git@host/owner/repo(.git)`. Unknown hosts get GitHub-style paths.
    pub fn from_url(url: &str) -> Option<Self> {
        let re = Regex::new(
            r"^(?:(?:https?|ssh|git)://)?(?:[^@/]+@)?([^/:]+)(?::\d+)?[/:](.+?)(?:\.git)?/?$",
        )
        .ok()?;
        let captures = re.captures(url.trim())?;
        let host = captures.get(1)?.as_str();
        let path = captures.get(2)?.as_str().trim_start_matches('/');

        let kind = if host.contains("gitlab") {
            HostKind::GitLab
        } else if host.contains("bitbucket") {
            HostKind::Bitbucket
        } else {
            HostKind::GitHub
        };

        Some(RemoteInfo::for_host(kind, &format!("https://{}/{}", host, path)))
    }

    pub fn compare_url(&self, from: &str, to: &str) -> Option<String> {
        self.compare_template
            .as_ref()
            .map(|t| t.replace("{from}", from).replace("{to}", to))
    }

    pub fn commit_url(&self, hash: &str) -> Option<String> {
        self.commit_template
            .as_ref()
            .map(|t| t.replace("{hash}", hash))
    }

    pub fn issue_url(&self, id: &str) -> Option<String> {
        self.issue_template.as_ref().map(|t| t.replace("{id}", id))
    }

    pub fn merge_url(&self, id: &str) -> Option<String> {
        self.merge_template.as_ref().map(|t| t.replace("{id}", id))
    }
}
