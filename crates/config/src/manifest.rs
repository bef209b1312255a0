//! Package and root-project manifests
//!
//! Both manifests are JSON documents with an `extra` object. A package lists
//! the hook directories it ships under `extra.available-git-hooks`:
//!
//! ```json
//! {
//!   "name": "acme/lint-hooks",
//!   "extra": { "available-git-hooks": { "lint": "scripts/lint" } }
//! }
//! ```
//!
//! The root project lists the hooks it wants from each package under
//! `extra.required-git-hooks`:
//!
//! ```json
//! {
//!   "extra": { "required-git-hooks": { "acme/lint-hooks": ["lint"] } }
//! }
//! ```
//!
//! Everything is validated here, so the engine only ever sees typed values.

use crate::Result;
use hookmux_core::{AbsPath, Error, RelPath};
use indexmap::{IndexMap, IndexSet};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// `extra` field listing the hook directories a package ships
pub const AVAILABLE_HOOKS_FIELD: &str = "available-git-hooks";

/// `extra` field listing the hooks a root project requires
pub const REQUIRED_HOOKS_FIELD: &str = "required-git-hooks";

#[derive(Debug, Deserialize)]
struct RawManifest {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    extra: RawExtra,
}

#[derive(Debug, Default, Deserialize)]
struct RawExtra {
    #[serde(default, rename = "available-git-hooks")]
    available_hooks: Option<IndexMap<String, String>>,
    #[serde(default, rename = "required-git-hooks")]
    required_hooks: Option<IndexMap<String, Vec<String>>>,
}

fn read_manifest(path: &Path) -> Result<RawManifest> {
    let content = fs::read_to_string(path).map_err(|e| Error::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    serde_json::from_str(&content).map_err(|e| Error::InvalidManifest {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

fn invalid(path: &Path, message: impl Into<String>) -> Error {
    Error::InvalidManifest {
        path: path.to_path_buf(),
        message: message.into(),
    }
}

/// An installed package as seen by the aggregation engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageDescriptor {
    /// Package name, unique per install
    pub name: String,
    /// Absolute directory the package is installed in
    pub install_path: AbsPath,
    /// Hook name → directory (relative to `install_path`) holding its scripts
    pub available_hooks: IndexMap<String, RelPath>,
}

impl PackageDescriptor {
    /// Create a descriptor from already validated parts
    pub fn new(
        name: impl Into<String>,
        install_path: AbsPath,
        available_hooks: IndexMap<String, RelPath>,
    ) -> Self {
        Self {
            name: name.into(),
            install_path,
            available_hooks,
        }
    }

    /// Read the manifest `manifest_name` from `package_dir`
    ///
    /// The install path is the canonicalized `package_dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or manifest cannot be read, the
    /// manifest is not valid JSON, the name is missing, or a declared hook
    /// directory is absolute
    pub fn from_dir(package_dir: &Path, manifest_name: &str) -> Result<Self> {
        let install_path = fs::canonicalize(package_dir).map_err(|e| Error::DirectoryRead {
            path: package_dir.to_path_buf(),
            source: e,
        })?;
        let manifest_path = install_path.join(manifest_name);
        let raw = read_manifest(&manifest_path)?;

        let name = raw
            .name
            .filter(|n| !n.trim().is_empty())
            .ok_or_else(|| invalid(&manifest_path, "missing package \"name\""))?;

        let mut available_hooks = IndexMap::new();
        for (group, dir) in raw.extra.available_hooks.unwrap_or_default() {
            if group.is_empty() {
                return Err(invalid(
                    &manifest_path,
                    format!("{AVAILABLE_HOOKS_FIELD} contains an empty hook name"),
                ));
            }
            let rel = RelPath::new(PathBuf::from(&dir)).map_err(|_| {
                invalid(
                    &manifest_path,
                    format!(
                        "{AVAILABLE_HOOKS_FIELD}.{group} must be relative to the package, got '{dir}'"
                    ),
                )
            })?;
            available_hooks.insert(group, rel);
        }

        Ok(Self {
            name,
            install_path: AbsPath::new(install_path)?,
            available_hooks,
        })
    }

    /// Whether the package declares any hook directory at all
    pub fn has_available_hooks(&self) -> bool {
        !self.available_hooks.is_empty()
    }

    /// Absolute directory of every declared hook group
    pub fn hook_directories(&self) -> IndexMap<String, AbsPath> {
        self.available_hooks
            .iter()
            .map(|(group, rel)| (group.clone(), self.install_path.join(rel)))
            .collect()
    }
}

/// Hooks the root project wants activated, per package
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequiredHooks {
    by_package: IndexMap<String, IndexSet<String>>,
}

impl RequiredHooks {
    /// Read `extra.required-git-hooks` from the root manifest
    ///
    /// A missing manifest, or one without the field, requires nothing.
    ///
    /// # Errors
    ///
    /// Returns an error if the manifest exists but is not valid JSON, the
    /// field has the wrong shape, or a hook name is empty
    pub fn from_root(project_root: &Path, manifest_name: &str) -> Result<Self> {
        let manifest_path = project_root.join(manifest_name);
        if !manifest_path.exists() {
            tracing::debug!(
                "No root manifest at {}, no hooks are required",
                manifest_path.display()
            );
            return Ok(Self::default());
        }

        let raw = read_manifest(&manifest_path)?;
        let mut required = Self::default();
        for (package, hooks) in raw.extra.required_hooks.unwrap_or_default() {
            if hooks.iter().any(String::is_empty) {
                return Err(invalid(
                    &manifest_path,
                    format!("{REQUIRED_HOOKS_FIELD}.{package} contains an empty hook name"),
                ));
            }
            required.insert(package, hooks);
        }
        Ok(required)
    }

    /// Require `hooks` from `package`, merging with earlier requirements
    pub fn insert<I, S>(&mut self, package: impl Into<String>, hooks: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.by_package
            .entry(package.into())
            .or_default()
            .extend(hooks.into_iter().map(Into::into));
    }

    /// The hook names required from `package`, if the project lists it
    pub fn for_package(&self, package: &str) -> Option<&IndexSet<String>> {
        self.by_package.get(package)
    }

    /// Whether no package is listed
    pub fn is_empty(&self) -> bool {
        self.by_package.is_empty()
    }
}
