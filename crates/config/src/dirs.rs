//! Project directory resolution
//!
//! hookmux always works relative to a project root: the directory holding
//! the root manifest and the `.git` directory whose `hooks` subdirectory
//! receives the dispatchers.

use crate::Result;
use hookmux_core::Error;
use std::path::{Path, PathBuf};

/// Find git working tree root starting from the given path
///
/// Searches upward from the given path to find a .git directory or file.
/// Returns the working tree root path if found, None otherwise.
#[must_use]
pub fn find_working_tree(start_path: &Path) -> Option<PathBuf> {
    use git2::Repository;

    let repo = Repository::discover(start_path).ok()?;
    repo.workdir().map(Path::to_path_buf)
}

/// Determine the project root
///
/// An explicit path wins. Otherwise the git working tree containing the
/// current directory is used, falling back to the current directory itself
/// so that commands outside a working copy can still run (and skip).
///
/// # Errors
///
/// Returns an error if the current directory cannot be determined or the
/// chosen root cannot be canonicalized
pub fn resolve_project_root(explicit: Option<&Path>) -> Result<PathBuf> {
    let root = match explicit {
        Some(path) => path.to_path_buf(),
        None => {
            let cwd = std::env::current_dir()?;
            find_working_tree(&cwd).unwrap_or(cwd)
        }
    };

    std::fs::canonicalize(&root).map_err(|e| Error::DirectoryRead {
        path: root,
        source: e,
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::panic)]
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_find_working_tree_from_subdirectory() {
        let temp = TempDir::new().unwrap();
        git2::Repository::init(temp.path()).unwrap();
        let nested = temp.path().join("src/deep");
        std::fs::create_dir_all(&nested).unwrap();

        let found = find_working_tree(&nested).unwrap();
        assert_eq!(
            std::fs::canonicalize(found).unwrap(),
            std::fs::canonicalize(temp.path()).unwrap()
        );
    }

    #[test]
    fn test_resolve_explicit_root() {
        let temp = TempDir::new().unwrap();
        let root = resolve_project_root(Some(temp.path())).unwrap();
        assert_eq!(root, std::fs::canonicalize(temp.path()).unwrap());
    }

    #[test]
    fn test_resolve_missing_explicit_root() {
        let temp = TempDir::new().unwrap();
        let err = resolve_project_root(Some(&temp.path().join("missing"))).unwrap_err();
        assert!(matches!(err, Error::DirectoryRead { .. }));
    }
}
