//! Type-safe path types and hook path resolution
//!
//! This module provides two distinct path types using the newtype pattern:
//!
//! - [`AbsPath`]: Absolute filesystem paths
//! - [`RelPath`]: Relative paths (no leading slash)
//!
//! It also provides [`relative_path`], which computes the shortest lexical
//! path from the git hooks directory to a package's hook directory. The
//! result is what gets stored in the hook collection, so it must not depend
//! on where the project happens to live on disk.
//!
//! # Examples
//!
//! ```
//! use hookmux_core::path::{AbsPath, relative_path};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let hooks_dir = AbsPath::new("/work/project/.git/hooks".into())?;
//! let scripts = AbsPath::new("/work/project/vendor/acme/hooks/scripts".into())?;
//!
//! assert_eq!(relative_path(&hooks_dir, &scripts), "../../vendor/acme/hooks/scripts");
//! # Ok(())
//! # }
//! ```

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Component, Path, PathBuf};

/// An absolute path on the filesystem
///
/// This type guarantees that the path is absolute (starts with `/` on Unix
/// or a drive letter on Windows).
/// Use this for file operations and as base directories.
///
/// # Examples
///
/// ```
/// use hookmux_core::path::AbsPath;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let abs = AbsPath::new("/work/project".into())?;
/// assert_eq!(abs.as_path(), std::path::Path::new("/work/project"));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AbsPath(PathBuf);

impl AbsPath {
    /// Create a new `AbsPath` from a `PathBuf`
    ///
    /// # Errors
    ///
    /// Returns an error if the path is not absolute.
    ///
    /// # Examples
    ///
    /// ```
    /// use hookmux_core::path::AbsPath;
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let abs = AbsPath::new("/work/project".into())?;
    /// assert!(abs.as_path().is_absolute());
    ///
    /// let err = AbsPath::new("relative/path".into());
    /// assert!(err.is_err());
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(path: PathBuf) -> Result<Self> {
        if path.is_absolute() {
            Ok(AbsPath(path))
        } else {
            Err(Error::PathNotAbsolute { path })
        }
    }

    /// Create a new `AbsPath` from a reference to a `Path`
    ///
    /// This will clone the path internally.
    ///
    /// # Errors
    ///
    /// Returns an error if the path is not absolute.
    pub fn from_path(path: &Path) -> Result<Self> {
        Self::new(path.to_path_buf())
    }

    /// Get the underlying `Path`
    pub fn as_path(&self) -> &Path {
        &self.0
    }

    /// Convert to a `PathBuf`
    pub fn into_path_buf(self) -> PathBuf {
        self.0
    }

    /// Join with a relative path to create a new absolute path
    pub fn join(&self, rel: &RelPath) -> Self {
        AbsPath(self.0.join(rel.as_path()))
    }

    /// Join a single file or directory name
    ///
    /// Used for the fixed names inside the hooks directory (dispatchers, the
    /// collection document), which are never absolute.
    pub fn join_name(&self, name: &str) -> Self {
        AbsPath(self.0.join(name))
    }

    /// Get the parent directory
    ///
    /// Returns `None` if this is the root directory.
    pub fn parent(&self) -> Option<Self> {
        self.0.parent().map(|p| AbsPath(p.to_path_buf()))
    }

    /// Strip a base directory prefix to get a relative path
    ///
    /// # Errors
    ///
    /// Returns an error if `self` is not under `base`.
    pub fn strip_prefix(&self, base: &AbsPath) -> Result<RelPath> {
        self.0
            .strip_prefix(&base.0)
            .map(|p| RelPath(p.to_path_buf()))
            .map_err(|_| Error::InvalidPathPrefix {
                path: std::sync::Arc::new(self.as_path().to_path_buf()),
                base: std::sync::Arc::new(base.as_path().to_path_buf()),
            })
    }

    /// Get the file name
    pub fn file_name(&self) -> Option<&str> {
        self.0.file_name().and_then(|s| s.to_str())
    }

    /// Lexically normalize the path
    ///
    /// Drops `.` components and folds `..` into the preceding component
    /// without touching the filesystem. `..` never climbs above the root.
    ///
    /// # Examples
    ///
    /// ```
    /// use hookmux_core::path::AbsPath;
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let path = AbsPath::new("/work/project/vendor/../.git/./hooks".into())?;
    /// assert_eq!(path.normalize().as_path().to_str(), Some("/work/project/.git/hooks"));
    /// # Ok(())
    /// # }
    /// ```
    #[must_use]
    pub fn normalize(&self) -> Self {
        let mut normalized = PathBuf::new();
        for component in self.0.components() {
            match component {
                Component::Prefix(_) | Component::RootDir | Component::Normal(_) => {
                    normalized.push(component.as_os_str());
                }
                Component::CurDir => {}
                Component::ParentDir => {
                    // pop() refuses to remove the root
                    normalized.pop();
                }
            }
        }
        AbsPath(normalized)
    }
}

/// A relative path (no leading slash)
///
/// This type guarantees that the path is relative (does not start with `/`).
/// Use this for paths relative to a base directory, such as the hook
/// directories a package declares relative to its install path.
///
/// # Examples
///
/// ```
/// use hookmux_core::path::RelPath;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let rel = RelPath::new("scripts/git".into())?;
/// assert_eq!(rel.as_path().to_str().unwrap(), "scripts/git");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RelPath(PathBuf);

impl RelPath {
    /// Create a new `RelPath` from a `PathBuf`
    ///
    /// # Errors
    ///
    /// Returns an error if the path is absolute.
    pub fn new(path: PathBuf) -> Result<Self> {
        if path.is_relative() {
            Ok(RelPath(path))
        } else {
            Err(Error::PathNotRelative { path })
        }
    }

    /// Get the underlying `Path`
    pub fn as_path(&self) -> &Path {
        &self.0
    }

    /// Convert to a `PathBuf`
    pub fn into_path_buf(self) -> PathBuf {
        self.0
    }

    /// Join with another relative path
    pub fn join(&self, other: &RelPath) -> Self {
        RelPath(self.0.join(&other.0))
    }

    /// Get the file name
    pub fn file_name(&self) -> Option<&str> {
        self.0.file_name().and_then(|s| s.to_str())
    }
}

/// Compute the shortest lexical relative path from `from` to `to`
///
/// Both paths are normalized first and need not exist. `to` may be an
/// ancestor, a descendant, a sibling subtree of `from`, or `from` itself
/// (which yields `"."`). Components are always joined with `/`, so the
/// result is stable across platforms.
///
/// On Windows, paths on different drives have no relative form; the
/// normalized `to` is returned unchanged.
///
/// # Examples
///
/// ```
/// use hookmux_core::path::{AbsPath, relative_path};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let hooks = AbsPath::new("/p/.git/hooks".into())?;
///
/// assert_eq!(relative_path(&hooks, &AbsPath::new("/p/.git/hooks".into())?), ".");
/// assert_eq!(relative_path(&hooks, &AbsPath::new("/p/.git/hooks/local".into())?), "local");
/// assert_eq!(relative_path(&hooks, &AbsPath::new("/p".into())?), "../..");
/// # Ok(())
/// # }
/// ```
#[must_use]
pub fn relative_path(from: &AbsPath, to: &AbsPath) -> String {
    let from = from.normalize();
    let to = to.normalize();

    let from_parts: Vec<Component<'_>> = from.as_path().components().collect();
    let to_parts: Vec<Component<'_>> = to.as_path().components().collect();

    if let (Some(Component::Prefix(a)), Some(Component::Prefix(b))) =
        (from_parts.first(), to_parts.first())
        && a != b
    {
        return to.as_path().to_string_lossy().into_owned();
    }

    let common = from_parts
        .iter()
        .zip(&to_parts)
        .take_while(|(a, b)| a == b)
        .count();

    let ups = std::iter::repeat_n("..".to_string(), from_parts.len() - common);
    let downs = to_parts[common..]
        .iter()
        .map(|c| c.as_os_str().to_string_lossy().into_owned());
    let parts: Vec<String> = ups.chain(downs).collect();

    if parts.is_empty() {
        ".".to_string()
    } else {
        parts.join("/")
    }
}

// Implement Display for all path types
impl std::fmt::Display for AbsPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

impl std::fmt::Display for RelPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.display())
    }
}
