use anyhow::Result;
use tracing_subscriber::EnvFilter;

use git_changelog::cli::{run_with_args, Collaborators};
use git_changelog::files::DiskFiles;
use git_changelog::git::Git2Repository;
use git_changelog::options::CliArgs;
use git_changelog::{ui, ChangelogError};

fn init_logging(verbose: bool) {
    let default_level = if verbose { "git_changelog=debug" } else { "git_changelog=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn fail(error: &ChangelogError) -> ! {
    ui::display_error(&error.to_string());
    std::process::exit(1);
}

fn main() -> Result<()> {
    let args = match CliArgs::parse_argv(std::env::args_os()) {
        Ok(args) => args,
        Err(ChangelogError::Usage(e)) => e.exit(),
        Err(e) => fail(&e),
    };
    init_logging(args.verbose);

    let source = match Git2Repository::open(".") {
        Ok(repo) => repo,
        Err(e) => {
            ui::display_error(&format!("Git repository error: {}", e));
            std::process::exit(1);
        }
    };
    let files = DiskFiles;
    let collab = Collaborators {
        source: &source,
        files: &files,
    };

    ui::display_status("Reading commit history...");
    let result = match run_with_args(args, &collab) {
        Ok(result) => result,
        Err(e) => fail(&e),
    };

    match &result.written_to {
        None => print!("{}", result.changelog),
        Some(path) => {
            let commits: usize = result.timeline.releases.iter().map(|r| r.commits.len()).sum();
            ui::display_success(&format!(
                "{} written to {}",
                ui::release_summary_line(result.timeline.len(), commits),
                path.display()
            ));
        }
    }

    Ok(())
}
