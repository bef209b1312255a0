//! The git hooks directory of a project

use crate::system::System;
use hookmux_core::{AbsPath, HookType, Result};

/// `<project>/.git/hooks`, known to exist
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HooksDir {
    path: AbsPath,
}

impl HooksDir {
    /// Ensure `<project_root>/.git/hooks` exists
    ///
    /// Returns `Ok(None)` when the project root has no `.git` directory:
    /// outside a git working copy there is nothing to aggregate into.
    ///
    /// # Errors
    ///
    /// Returns an error if the hooks directory has to be created and cannot be
    pub fn ensure<S: System>(system: &S, project_root: &AbsPath) -> Result<Option<Self>> {
        let git_dir = project_root.join_name(".git");
        if !system.is_dir(&git_dir) {
            tracing::debug!("{} is not a git working copy", project_root);
            return Ok(None);
        }

        let path = git_dir.join_name("hooks");
        if !system.is_dir(&path) {
            tracing::debug!("Creating {}", path);
            system.create_dir_all(&path)?;
        }
        Ok(Some(Self { path }))
    }

    /// Open an existing hooks directory without creating anything
    ///
    /// Used by the dispatcher runtime, which is handed the directory it lives in.
    pub fn open<S: System>(system: &S, path: AbsPath) -> Option<Self> {
        system.is_dir(&path).then_some(Self { path })
    }

    /// Absolute path of the directory
    pub fn path(&self) -> &AbsPath {
        &self.path
    }

    /// Path of the dispatcher file for `hook_type`
    pub fn hook_path(&self, hook_type: HookType) -> AbsPath {
        self.path.join_name(hook_type.as_str())
    }

    /// Path of a file directly inside the directory
    pub fn file(&self, name: &str) -> AbsPath {
        self.path.join_name(name)
    }
}
