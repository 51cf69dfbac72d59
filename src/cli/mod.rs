//! Command line workflow

pub mod orchestration;

pub use orchestration::{run_changelog_workflow, run_with_args, Collaborators, WorkflowResult};
