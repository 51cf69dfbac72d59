use std::collections::HashMap;

use crate::domain::{Commit, RemoteInfo};
use crate::error::{ChangelogError, Result};
use crate::git::CommitSource;
use crate::options::ResolvedOptions;

/// Mock commit source for testing without a repository
#[derive(Debug, Clone, Default)]
pub struct MockRepository {
    remote: RemoteInfo,
    commits: Vec<Commit>,
    branches: HashMap<String, Vec<Commit>>,
}

impl MockRepository {
    /// Create a source returning `commits` from HEAD
    pub fn new(commits: Vec<Commit>) -> Self {
        MockRepository {
            commits,
            ..Self::default()
        }
    }

    /// Set the remote metadata returned for any remote name
    pub fn with_remote(mut self, remote: RemoteInfo) -> Self {
        self.remote = remote;
        self
    }

    /// Add a named branch with its own history
    pub fn with_branch(mut self, name: impl Into<String>, commits: Vec<Commit>) -> Self {
        self.branches.insert(name.into(), commits);
        self
    }
}

impl CommitSource for MockRepository {
    fn fetch_remote(&self, _remote: &str) -> Result<RemoteInfo> {
        Ok(self.remote.clone())
    }

    fn fetch_commits(&self, _options: &ResolvedOptions, branch: Option<&str>) -> Result<Vec<Commit>> {
        match branch {
            None => Ok(self.commits.clone()),
            Some(name) => self
                .branches
                .get(name)
                .cloned()
                .ok_or_else(|| ChangelogError::remote(format!("Branch not found: {}", name))),
        }
    }
}
