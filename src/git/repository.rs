use std::collections::HashMap;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use chrono::DateTime;
use git2::{BranchType, ErrorCode, Oid, Repository as Git2Repo};
use regex::Regex;

use crate::domain::{Commit, RemoteInfo};
use crate::error::{ChangelogError, Result};
use crate::git::CommitSource;
use crate::options::ResolvedOptions;
use crate::version;

/// Release tag found on a commit
#[derive(Debug, Clone)]
struct TagRef {
    name: String,
    message: Option<String>,
}

/// Commit source backed by a git2 repository
pub struct Git2Repository {
    // git2::Repository is Send but not Sync
    repo: Mutex<Git2Repo>,
}

impl Git2Repository {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;

        Ok(Git2Repository::from_git2(repo))
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        Git2Repository {
            repo: Mutex::new(repo),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Git2Repo> {
        self.repo.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Maps commit ids to the release tag pointing at them.
///
/// Handles both lightweight and annotated tags. When several release tags
/// point at one commit, the alphabetically last one wins.
fn tag_index(repo: &Git2Repo, pattern: Option<&Regex>) -> Result<HashMap<Oid, TagRef>> {
    let mut tags = HashMap::new();

    let names = repo.tag_names(None)?;
    let mut names: Vec<&str> = names.iter().flatten().collect();
    names.sort_unstable();

    for name in names {
        if !version::is_release_tag(name, pattern) {
            tracing::debug!(tag = name, "ignoring tag that is not a release tag");
            continue;
        }

        let reference = match repo.find_reference(&format!("refs/tags/{}", name)) {
            Ok(reference) => reference,
            Err(_) => continue,
        };
        let commit = match reference.peel_to_commit() {
            Ok(commit) => commit,
            Err(_) => continue,
        };
        let message = reference
            .peel_to_tag()
            .ok()
            .and_then(|tag| tag.message().map(|m| m.trim().to_string()))
            .filter(|m| !m.is_empty());

        tags.insert(
            commit.id(),
            TagRef {
                name: name.to_string(),
                message,
            },
        );
    }

    Ok(tags)
}

/// Head of a local branch, falling back to the remote-tracking branch
fn branch_head_oid(repo: &Git2Repo, branch_name: &str, remote: &str) -> Result<Oid> {
    let branch = repo
        .find_branch(branch_name, BranchType::Local)
        .or_else(|_| repo.find_branch(&format!("{}/{}", remote, branch_name), BranchType::Remote))
        .map_err(|e| {
            ChangelogError::remote(format!("Cannot find branch '{}': {}", branch_name, e))
        })?;

    let commit = branch.into_reference().peel_to_commit()?;
    Ok(commit.id())
}

fn to_commit(commit: &git2::Commit<'_>, tag: Option<&TagRef>) -> Commit {
    let date = DateTime::from_timestamp(commit.time().seconds(), 0).unwrap_or_default();
    // Messages in legacy encodings keep their ASCII parts
    let message = String::from_utf8_lossy(commit.message_bytes());
    let author = String::from_utf8_lossy(commit.author().name_bytes()).into_owned();

    let mut result = Commit::from_message(commit.id().to_string(), &message, date).with_author(author);
    if let Some(tag) = tag {
        result.tag = Some(tag.name.clone());
        result.tag_message = tag.message.clone();
    }
    result
}

impl CommitSource for Git2Repository {
    fn fetch_remote(&self, remote: &str) -> Result<RemoteInfo> {
        let repo = self.lock();

        let url = match repo.find_remote(remote) {
            Ok(found) => found.url().map(str::to_string),
            Err(e) if e.code() == ErrorCode::NotFound => None,
            Err(e) => return Err(e.into()),
        };

        match url.as_deref().and_then(RemoteInfo::from_url) {
            Some(info) => Ok(info),
            None => {
                tracing::warn!(remote, "no usable remote URL, changelog will have no links");
                Ok(RemoteInfo::none())
            }
        }
    }

    fn fetch_commits(&self, options: &ResolvedOptions, branch: Option<&str>) -> Result<Vec<Commit>> {
        let repo = self.lock();
        let tags = tag_index(&repo, options.tag_pattern.as_ref())?;

        let mut revwalk = repo.revwalk()?;
        revwalk.set_sorting(git2::Sort::TOPOLOGICAL | git2::Sort::TIME)?;
        match branch {
            Some(name) => revwalk.push(branch_head_oid(&repo, name, &options.remote)?)?,
            None => revwalk.push_head()?,
        }

        let mut commits = Vec::new();
        for oid in revwalk {
            let oid = oid?;
            let commit = repo.find_commit(oid)?;
            commits.push(to_commit(&commit, tags.get(&oid)));
        }

        tracing::debug!(
            commits = commits.len(),
            tags = tags.len(),
            branch = branch.unwrap_or("HEAD"),
            "read commit history"
        );
        Ok(commits)
    }
}
