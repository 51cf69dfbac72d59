//! Package metadata lookup
//!
//! `--package` takes the latest version from a project manifest when no
//! explicit version is given. `.json` files are read as `package.json`
//! (top-level `version`); anything else as a Cargo manifest
//! (`package.version`, then `workspace.package.version`).

use std::path::Path;

use serde::Deserialize;

use crate::error::{ChangelogError, Result};
use crate::files::FileStore;

#[derive(Debug, Deserialize)]
struct JsonManifest {
    version: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct CargoPackage {
    version: Option<toml::Value>,
}

#[derive(Debug, Default, Deserialize)]
struct CargoWorkspace {
    #[serde(default)]
    package: CargoPackage,
}

#[derive(Debug, Deserialize)]
struct CargoManifest {
    #[serde(default)]
    package: CargoPackage,
    #[serde(default)]
    workspace: CargoWorkspace,
}

/// Read the version declared in a package file.
///
/// # Returns
/// * `Ok(String)` - The declared version, unprefixed as written
/// * `Err(ChangelogError::PackageNotFound)` - If the file does not exist
/// * `Err(ChangelogError::Package)` - If the file has no usable version
pub fn read_package_version(files: &dyn FileStore, path: &Path) -> Result<String> {
    if !files.exists(path) {
        return Err(ChangelogError::PackageNotFound(path.to_path_buf()));
    }

    let contents = files.read_to_string(path)?;
    let is_json = path.extension().is_some_and(|ext| ext == "json");

    let version = if is_json {
        let manifest: JsonManifest = serde_json::from_str(&contents)
            .map_err(|e| ChangelogError::package(format!("{}: {}", path.display(), e)))?;
        manifest.version
    } else {
        let manifest: CargoManifest = toml::from_str(&contents)
            .map_err(|e| ChangelogError::package(format!("{}: {}", path.display(), e)))?;
        // `version.workspace = true` is a table, not a string
        let own = manifest
            .package
            .version
            .and_then(|v| v.as_str().map(str::to_string));
        own.or_else(|| {
            manifest
                .workspace
                .package
                .version
                .and_then(|v| v.as_str().map(str::to_string))
        })
    };

    version.ok_or_else(|| {
        ChangelogError::package(format!("{} does not declare a version", path.display()))
    })
}
