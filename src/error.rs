use std::path::PathBuf;

use thiserror::Error;

/// Unified error type for changelog generation
#[derive(Error, Debug)]
pub enum ChangelogError {
    #[error("Invalid option: {0}")]
    OptionParse(String),

    #[error("Invalid version: '{0}' is not a valid semantic version")]
    InvalidVersion(String),

    #[error("Package file not found: {}", .0.display())]
    PackageNotFound(PathBuf),

    #[error("Template not found: {0}")]
    TemplateNotFound(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Package metadata error: {0}")]
    Package(String),

    #[error("Remote operation failed: {0}")]
    Remote(String),

    /// Help or version output requested on the command line
    #[error("{0}")]
    Usage(clap::Error),

    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Render error: {0}")]
    Render(#[from] std::fmt::Error),
}

/// Convenience type alias for Results in git-changelog
pub type Result<T> = std::result::Result<T, ChangelogError>;

impl ChangelogError {
    /// Create an option parsing error with context
    pub fn option(msg: impl Into<String>) -> Self {
        ChangelogError::OptionParse(msg.into())
    }

    /// Create an invalid version error for the offending input
    pub fn invalid_version(version: impl Into<String>) -> Self {
        ChangelogError::InvalidVersion(version.into())
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        ChangelogError::Config(msg.into())
    }

    /// Create a package metadata error with context
    pub fn package(msg: impl Into<String>) -> Self {
        ChangelogError::Package(msg.into())
    }

    /// Create a remote error with context
    pub fn remote(msg: impl Into<String>) -> Self {
        ChangelogError::Remote(msg.into())
    }
}
