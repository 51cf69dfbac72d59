//! Option resolution
//!
//! Command line flags are parsed with clap into [CliArgs], merged with an
//! optional [FileConfig] and the built-in defaults into a [ResolvedOptions].
//! Precedence is CLI flag > config file key > default. Everything is parsed
//! and validated here, once; downstream code only sees typed values.

use std::ffi::OsString;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use clap::error::ErrorKind;
use clap::Parser;
use regex::Regex;
use serde::Serialize;

use crate::config::{CommitLimitValue, FileConfig, PackageValue};
use crate::error::{ChangelogError, Result};
use crate::version;

pub const DEFAULT_OUTPUT: &str = "CHANGELOG.md";
pub const DEFAULT_TEMPLATE: &str = "compact";
pub const DEFAULT_REMOTE: &str = "origin";
pub const DEFAULT_PACKAGE_FILE: &str = "Cargo.toml";
pub const DEFAULT_BREAKING_PATTERN: &str = "BREAKING CHANGE";

/// How many commits of history to consider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum CommitLimit {
    #[default]
    Unlimited,
    Limit(usize),
}

impl CommitLimit {
    /// Keep at most the first `n` items
    pub fn apply<T>(&self, mut items: Vec<T>) -> Vec<T> {
        if let CommitLimit::Limit(n) = *self {
            items.truncate(n);
        }
        items
    }

    fn from_config(value: &CommitLimitValue) -> Result<Self> {
        match value {
            CommitLimitValue::Number(n) => usize::try_from(*n)
                .map(CommitLimit::Limit)
                .map_err(|_| ChangelogError::option(format!("commit-limit must not be negative: {}", n))),
            CommitLimitValue::Flag(false) => Ok(CommitLimit::Unlimited),
            CommitLimitValue::Flag(true) => Err(ChangelogError::option(
                "commit-limit accepts a number or false, not true",
            )),
            CommitLimitValue::Text(s) => s.parse(),
        }
    }
}

impl FromStr for CommitLimit {
    type Err = ChangelogError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s == "false" {
            return Ok(CommitLimit::Unlimited);
        }
        s.parse::<usize>().map(CommitLimit::Limit).map_err(|_| {
            ChangelogError::option(format!(
                "commit-limit must be a number or 'false', got '{}'",
                s
            ))
        })
    }
}

impl fmt::Display for CommitLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommitLimit::Unlimited => write!(f, "false"),
            CommitLimit::Limit(n) => write!(f, "{}", n),
        }
    }
}

fn parse_commit_limit(s: &str) -> std::result::Result<CommitLimit, String> {
    s.parse::<CommitLimit>().map_err(|e| e.to_string())
}

/// Command line flags, before merging with the config file
#[derive(Parser, Debug, Clone, Default, PartialEq)]
#[command(
    name = "git-changelog",
    version,
    about = "Generate a changelog from git tags and commit history"
)]
pub struct CliArgs {
    #[arg(short, long, help = "Output file [default: CHANGELOG.md]")]
    pub output: Option<PathBuf>,

    #[arg(short, long, help = "Custom configuration file path")]
    pub config: Option<PathBuf>,

    #[arg(short, long, help = "Built-in template: compact, keepachangelog or json")]
    pub template: Option<String>,

    #[arg(short, long, help = "Git remote used to build links [default: origin]")]
    pub remote: Option<String>,

    #[arg(
        short = 'l',
        long,
        value_parser = parse_commit_limit,
        help = "Number of commits to consider, or false for no limit"
    )]
    pub commit_limit: Option<CommitLimit>,

    #[arg(
        short,
        long,
        num_args = 0..=1,
        default_missing_value = DEFAULT_PACKAGE_FILE,
        help = "Use the version from a package file as the latest version [default: Cargo.toml]"
    )]
    pub package: Option<PathBuf>,

    #[arg(long, help = "Version label for commits that are not tagged yet")]
    pub latest_version: Option<String>,

    #[arg(short, long, help = "Include commits after the latest tag as Unreleased")]
    pub unreleased: bool,

    #[arg(long, help = "Print the changelog instead of writing a file")]
    pub stdout: bool,

    #[arg(long, help = "Show tag or tagged commit body as release summary")]
    pub release_summary: bool,

    #[arg(short, long, help = "Issue URL template, {id} is replaced by the issue number")]
    pub issue_url: Option<String>,

    #[arg(long, help = "Regex marking commits as breaking changes")]
    pub breaking_pattern: Option<String>,

    #[arg(long, help = "Also include commits from this branch (repeatable)")]
    pub include_branch: Vec<String>,

    #[arg(long, help = "Regex selecting release tags [default: semantic versions]")]
    pub tag_pattern: Option<String>,

    #[arg(short, long, help = "Verbose logging")]
    pub verbose: bool,
}

impl CliArgs {
    /// Parse an argv, program name first.
    ///
    /// Unrecognized flags and malformed values are rejected with
    /// [ChangelogError::OptionParse]; help and version requests come back as
    /// [ChangelogError::Usage].
    pub fn parse_argv<I, T>(argv: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        CliArgs::try_parse_from(argv).map_err(|e| match e.kind() {
            ErrorKind::DisplayHelp
            | ErrorKind::DisplayVersion
            | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => ChangelogError::Usage(e),
            _ => ChangelogError::option(e.to_string().trim().to_string()),
        })
    }
}

/// Options after merging CLI, config file and defaults
#[derive(Debug, Clone)]
pub struct ResolvedOptions {
    pub output: PathBuf,
    pub template: String,
    pub remote: String,
    pub commit_limit: CommitLimit,
    pub package: Option<PathBuf>,
    pub latest_version: Option<String>,
    pub unreleased: bool,
    pub stdout: bool,
    pub release_summary: bool,
    pub issue_url: Option<String>,
    pub breaking_pattern: Regex,
    pub include_branch: Vec<String>,
    pub tag_pattern: Option<Regex>,
    pub verbose: bool,
}

impl Default for ResolvedOptions {
    fn default() -> Self {
        ResolvedOptions {
            output: PathBuf::from(DEFAULT_OUTPUT),
            template: DEFAULT_TEMPLATE.to_string(),
            remote: DEFAULT_REMOTE.to_string(),
            commit_limit: CommitLimit::default(),
            package: None,
            latest_version: None,
            unreleased: false,
            stdout: false,
            release_summary: false,
            issue_url: None,
            breaking_pattern: Regex::new(DEFAULT_BREAKING_PATTERN)
                .expect("default breaking pattern is a valid regex"),
            include_branch: Vec::new(),
            tag_pattern: None,
            verbose: false,
        }
    }
}

fn compile_pattern(option: &str, pattern: &str) -> Result<Regex> {
    Regex::new(pattern)
        .map_err(|e| ChangelogError::option(format!("{} is not a valid regex: {}", option, e)))
}

impl ResolvedOptions {
    /// Merge parsed flags with an optional config file.
    ///
    /// Boolean flags can only be switched on from the command line; when a
    /// flag is absent the config file value (or false) applies.
    pub fn resolve(args: CliArgs, file: Option<&FileConfig>) -> Result<Self> {
        let file = file.cloned().unwrap_or_default();
        let defaults = ResolvedOptions::default();

        let commit_limit = match (args.commit_limit, &file.commit_limit) {
            (Some(limit), _) => limit,
            (None, Some(value)) => CommitLimit::from_config(value)?,
            (None, None) => defaults.commit_limit,
        };

        let package = args.package.or(match file.package {
            Some(PackageValue::Flag(true)) => Some(PathBuf::from(DEFAULT_PACKAGE_FILE)),
            Some(PackageValue::Flag(false)) | None => None,
            Some(PackageValue::Path(path)) => Some(path),
        });

        let latest_version = args.latest_version.or(file.latest_version);
        if let Some(version) = &latest_version {
            version::validate_version(version)?;
        }

        let breaking_pattern = match args.breaking_pattern.or(file.breaking_pattern) {
            Some(pattern) => compile_pattern("breaking-pattern", &pattern)?,
            None => defaults.breaking_pattern,
        };

        let tag_pattern = args
            .tag_pattern
            .or(file.tag_pattern)
            .map(|p| compile_pattern("tag-pattern", &p))
            .transpose()?;

        let include_branch = if args.include_branch.is_empty() {
            file.include_branch.unwrap_or_default()
        } else {
            args.include_branch
        };

        Ok(ResolvedOptions {
            output: args
                .output
                .or(file.output.map(PathBuf::from))
                .unwrap_or(defaults.output),
            template: args.template.or(file.template).unwrap_or(defaults.template),
            remote: args.remote.or(file.remote).unwrap_or(defaults.remote),
            commit_limit,
            package,
            latest_version,
            unreleased: args.unreleased || file.unreleased.unwrap_or(false),
            stdout: args.stdout || file.stdout.unwrap_or(false),
            release_summary: args.release_summary || file.release_summary.unwrap_or(false),
            issue_url: args.issue_url.or(file.issue_url),
            breaking_pattern,
            include_branch,
            tag_pattern,
            verbose: args.verbose,
        })
    }
}

/// Parse `argv` and merge it with an already loaded config file
pub fn resolve_options<I, T>(argv: I, config: Option<&FileConfig>) -> Result<ResolvedOptions>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let args = CliArgs::parse_argv(argv)?;
    ResolvedOptions::resolve(args, config)
}
