pub mod cli;
pub mod config;
pub mod domain;
pub mod engine;
pub mod error;
pub mod files;
pub mod git;
pub mod options;
pub mod package;
pub mod render;
pub mod ui;
pub mod version;

pub use engine::build_timeline;
pub use error::{ChangelogError, Result};
pub use options::resolve_options;
