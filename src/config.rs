use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ChangelogError, Result};
use crate::files::FileStore;

/// Config file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = ".changelog.toml";

/// Commit limit as written in a config file: `10`, `false`, or a string
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum CommitLimitValue {
    Number(i64),
    Flag(bool),
    Text(String),
}

/// Package option as written in a config file: `true` or a path
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum PackageValue {
    Flag(bool),
    Path(PathBuf),
}

/// Options read from a config file.
///
/// Every key is optional and mirrors the long command line flag. Unknown keys
/// are ignored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct FileConfig {
    pub output: Option<String>,
    pub template: Option<String>,
    pub remote: Option<String>,
    pub commit_limit: Option<CommitLimitValue>,
    pub package: Option<PackageValue>,
    pub latest_version: Option<String>,
    pub unreleased: Option<bool>,
    pub stdout: Option<bool>,
    pub release_summary: Option<bool>,
    pub issue_url: Option<String>,
    pub breaking_pattern: Option<String>,
    pub include_branch: Option<Vec<String>>,
    pub tag_pattern: Option<String>,
}

impl FileConfig {
    /// Parse config file contents
    pub fn from_toml(contents: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|e| ChangelogError::config(e.to_string()))
    }
}

/// Candidate config file paths, highest priority first.
///
/// 1. Custom path provided as parameter
/// 2. `.changelog.toml` in current directory
/// 3. `git-changelog/config.toml` in the user config directory
fn candidate_paths(config_path: Option<&Path>) -> Vec<PathBuf> {
    if let Some(path) = config_path {
        return vec![path.to_path_buf()];
    }

    let mut paths = vec![PathBuf::from(DEFAULT_CONFIG_FILE)];
    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("git-changelog").join("config.toml"));
    }
    paths
}

/// Loads the config file, if any.
///
/// # Arguments
/// * `files` - File access
/// * `config_path` - Explicit path from `--config`; it must exist
///
/// # Returns
/// * `Ok(Some(FileConfig))` - First config file found
/// * `Ok(None)` - No config file in any default location
/// * `Err` - If the explicit file is missing, or a file cannot be read or parsed
pub fn load_config(files: &dyn FileStore, config_path: Option<&Path>) -> Result<Option<FileConfig>> {
    if let Some(path) = config_path {
        if !files.exists(path) {
            return Err(ChangelogError::config(format!(
                "Config file not found: {}",
                path.display()
            )));
        }
    }

    for path in candidate_paths(config_path) {
        if files.exists(&path) {
            tracing::debug!(path = %path.display(), "loading config file");
            let contents = files.read_to_string(&path)?;
            let config = FileConfig::from_toml(&contents).map_err(|e| {
                ChangelogError::config(format!("{}: {}", path.display(), e))
            })?;
            return Ok(Some(config));
        }
    }

    Ok(None)
}
