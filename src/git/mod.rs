//! Commit history sources
//!
//! The engine consumes commits that are already in memory. This module
//! defines where they come from: the [CommitSource] trait, implemented by
//! [repository::Git2Repository] for real repositories and by
//! [mock::MockRepository] for tests.
//!
//! Most code should depend on the trait rather than a concrete source.
//!
//! ```rust
//! # use git_changelog::git::CommitSource;
//! # use git_changelog::options::ResolvedOptions;
//! # fn example<S: CommitSource>(source: &S) -> git_changelog::Result<()> {
//! let options = ResolvedOptions::default();
//! let remote = source.fetch_remote(&options.remote)?;
//! let commits = source.fetch_commits(&options, None)?;
//! # Ok(())
//! # }
//! ```

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use crate::domain::{Commit, RemoteInfo};
use crate::error::Result;
use crate::options::ResolvedOptions;

/// Source of commit history and remote metadata
///
/// ## Ordering
///
/// `fetch_commits` returns commits newest first, in history order. Only the
/// commit a release tag points at carries `tag`; which tags count as release
/// tags is decided by the source using `options.tag_pattern`.
///
/// ## Implementations
///
/// - [Git2Repository](repository::Git2Repository): Real repository using the `git2` crate
/// - [MockRepository](mock::MockRepository): Fixed commits for tests
pub trait CommitSource: Send + Sync {
    /// Link templates for the named remote.
    ///
    /// A missing remote or an unrecognized URL yields [RemoteInfo::none]
    /// rather than an error.
    fn fetch_remote(&self, remote: &str) -> Result<RemoteInfo>;

    /// Commits reachable from `branch`, or from HEAD when `None`.
    ///
    /// # Returns
    /// * `Ok(Vec<Commit>)` - Raw, unannotated commits, newest first
    /// * `Err` - If the branch does not exist or the history cannot be read
    fn fetch_commits(&self, options: &ResolvedOptions, branch: Option<&str>) -> Result<Vec<Commit>>;
}
