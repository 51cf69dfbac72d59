//! Domain types - plain data shared by the engine, fetchers and renderers

pub mod commit;
pub mod release;
pub mod remote;

pub use commit::{Commit, MergeInfo};
pub use release::{ReleaseEntry, Timeline, HEAD_REVISION, UNRELEASED_TITLE};
pub use remote::{HostKind, RemoteInfo};
