//! Main workflow orchestration logic
//!
//! Runs one changelog generation from an argv to rendered (and possibly
//! written) text. Repository and file access go through the
//! [Collaborators] so the whole workflow can run against in-memory fakes.

use std::ffi::OsString;
use std::path::PathBuf;

use crate::config;
use crate::domain::Timeline;
use crate::engine;
use crate::error::Result;
use crate::files::FileStore;
use crate::git::CommitSource;
use crate::options::{CliArgs, ResolvedOptions};
use crate::package;
use crate::render::Template;
use crate::version;

/// External systems the workflow reads from and writes to
#[derive(Clone, Copy)]
pub struct Collaborators<'a> {
    pub source: &'a dyn CommitSource,
    pub files: &'a dyn FileStore,
}

/// Result of a successful run
#[derive(Debug)]
pub struct WorkflowResult {
    pub options: ResolvedOptions,
    pub timeline: Timeline,
    /// Rendered changelog text
    pub changelog: String,
    /// Output path, `None` with `--stdout`
    pub written_to: Option<PathBuf>,
}

/// Main changelog workflow
///
/// 1. Parse flags and load the config file
/// 2. Check the template and package file before touching history
/// 3. Fetch remote metadata and commits, merging included branches
/// 4. Build the timeline and render it
/// 5. Write the output file unless `--stdout` was given
///
/// # Arguments
/// * `argv` - Command line, program name first
/// * `collab` - Commit source and file store
///
/// # Returns
/// * `Ok(WorkflowResult)` - Rendered changelog and the timeline behind it
/// * `Err` - Any option, template, package, version or repository error
pub fn run_changelog_workflow<I, T>(argv: I, collab: &Collaborators<'_>) -> Result<WorkflowResult>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let args = CliArgs::parse_argv(argv)?;
    run_with_args(args, collab)
}

/// Run the workflow for flags that were already parsed
pub fn run_with_args(args: CliArgs, collab: &Collaborators<'_>) -> Result<WorkflowResult> {
    let file_config = config::load_config(collab.files, args.config.as_deref())?;
    let mut options = ResolvedOptions::resolve(args, file_config.as_ref())?;

    let template = Template::named(&options.template)?;

    let package_version = match &options.package {
        Some(path) => Some(package::read_package_version(collab.files, path)?),
        None => None,
    };

    let remote = collab.source.fetch_remote(&options.remote)?;
    let mut commits = collab.source.fetch_commits(&options, None)?;

    for branch in &options.include_branch {
        let included = collab.source.fetch_commits(&options, Some(branch.as_str()))?;
        tracing::debug!(branch = %branch, commits = included.len(), "including branch");
        commits = engine::merge_branch_commits(commits, included);
    }

    if options.latest_version.is_none() {
        if let Some(pkg) = package_version {
            let latest = version::with_tag_prefix(&pkg, &commits);
            tracing::debug!(version = %latest, "latest version taken from package file");
            options.latest_version = Some(latest);
        }
    }

    let timeline = engine::build_timeline(commits, &options, &remote)?;
    let changelog = template.render(&timeline, &options, &remote)?;

    let written_to = if options.stdout {
        None
    } else {
        collab.files.write(&options.output, &changelog)?;
        tracing::info!(path = %options.output.display(), bytes = changelog.len(), "wrote changelog");
        Some(options.output.clone())
    };

    Ok(WorkflowResult {
        options,
        timeline,
        changelog,
        written_to,
    })
}
