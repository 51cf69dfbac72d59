//! File access abstraction
//!
//! The engine never touches the file system. Config discovery, package
//! metadata and writing the changelog go through [FileStore] so tests can
//! substitute [MemoryFiles] for [DiskFiles].

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::error::{ChangelogError, Result};

/// File operations needed around the engine
pub trait FileStore: Send + Sync {
    fn exists(&self, path: &Path) -> bool;

    fn read_to_string(&self, path: &Path) -> Result<String>;

    fn write(&self, path: &Path, contents: &str) -> Result<()>;
}

/// Real file system access
#[derive(Debug, Default, Clone, Copy)]
pub struct DiskFiles;

impl FileStore for DiskFiles {
    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        Ok(fs::read_to_string(path)?)
    }

    fn write(&self, path: &Path, contents: &str) -> Result<()> {
        fs::write(path, contents)?;
        Ok(())
    }
}

/// In-memory file store for tests
#[derive(Debug, Default)]
pub struct MemoryFiles {
    files: Mutex<HashMap<PathBuf, String>>,
}

impl MemoryFiles {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a file
    pub fn with_file(self, path: impl Into<PathBuf>, contents: impl Into<String>) -> Self {
        self.lock().insert(path.into(), contents.into());
        self
    }

    /// Current contents of a file, if present
    pub fn contents(&self, path: impl AsRef<Path>) -> Option<String> {
        self.lock().get(path.as_ref()).cloned()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<PathBuf, String>> {
        // A poisoned map is still usable for test bookkeeping
        self.files.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl FileStore for MemoryFiles {
    fn exists(&self, path: &Path) -> bool {
        self.lock().contains_key(path)
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        self.lock().get(path).cloned().ok_or_else(|| {
            ChangelogError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("{} not found", path.display()),
            ))
        })
    }

    fn write(&self, path: &Path, contents: &str) -> Result<()> {
        self.lock().insert(path.to_path_buf(), contents.to_string());
        Ok(())
    }
}
