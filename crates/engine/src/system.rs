//! System abstraction for filesystem operations
//!
//! This module provides a trait-based abstraction over the handful of
//! filesystem operations the engine performs, enabling dry-run mode.

use hookmux_core::path::AbsPath;
use hookmux_core::{Error, Result};
use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

/// Abstraction over filesystem operations
///
/// This trait allows us to implement different backends:
/// - `RealSystem`: Actual filesystem operations
/// - `DryRunSystem`: Records mutations without executing them
pub trait System {
    /// Read a file's contents
    fn read_file(&self, path: &AbsPath) -> Result<Vec<u8>>;

    /// Write a file's contents with optional permissions
    fn write_file(&self, path: &AbsPath, content: &[u8], mode: Option<u32>) -> Result<()>;

    /// Create a directory and all missing parents
    fn create_dir_all(&self, path: &AbsPath) -> Result<()>;

    /// Remove a file
    fn remove_file(&self, path: &AbsPath) -> Result<()>;

    /// Check if a path exists
    fn exists(&self, path: &AbsPath) -> bool;

    /// Check if a path is a directory
    fn is_dir(&self, path: &AbsPath) -> bool;
}

/// Real filesystem implementation
///
/// This implementation performs actual filesystem operations.
#[derive(Debug, Clone, Copy, Default)]
pub struct RealSystem;

impl System for RealSystem {
    fn read_file(&self, path: &AbsPath) -> Result<Vec<u8>> {
        fs::read(path.as_path()).map_err(|e| Error::FileRead {
            path: path.as_path().to_path_buf(),
            source: e,
        })
    }

    fn write_file(&self, path: &AbsPath, content: &[u8], mode: Option<u32>) -> Result<()> {
        fs::write(path.as_path(), content).map_err(|e| Error::FileWrite {
            path: path.as_path().to_path_buf(),
            source: e,
        })?;

        // Set permissions if specified
        #[cfg(unix)]
        if let Some(mode) = mode {
            use std::os::unix::fs::PermissionsExt;
            let permissions = fs::Permissions::from_mode(mode);
            fs::set_permissions(path.as_path(), permissions).map_err(|e| Error::FileWrite {
                path: path.as_path().to_path_buf(),
                source: e,
            })?;
        }

        #[cfg(not(unix))]
        let _ = mode;

        Ok(())
    }

    fn create_dir_all(&self, path: &AbsPath) -> Result<()> {
        fs::create_dir_all(path.as_path()).map_err(|e| Error::DirectoryCreate {
            path: path.as_path().to_path_buf(),
            source: e,
        })
    }

    fn remove_file(&self, path: &AbsPath) -> Result<()> {
        fs::remove_file(path.as_path()).map_err(|e| Error::FileRemove {
            path: path.as_path().to_path_buf(),
            source: e,
        })
    }

    fn exists(&self, path: &AbsPath) -> bool {
        path.as_path().exists()
    }

    fn is_dir(&self, path: &AbsPath) -> bool {
        path.as_path().is_dir()
    }
}

/// An operation that would be performed on the filesystem
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// Write a file
    WriteFile {
        path: AbsPath,
        size: usize,
        mode: Option<u32>,
    },
    /// Create a directory
    CreateDir { path: AbsPath },
    /// Remove a file
    Remove { path: AbsPath },
}

/// Dry-run system that records mutations without executing them
///
/// Reads go to the real filesystem, except for paths this system has
/// already "written" or "removed", which are served from an overlay. A
/// sequence of transitions therefore sees its own pending changes.
#[derive(Debug, Default)]
pub struct DryRunSystem {
    operations: RefCell<Vec<Operation>>,
    // None marks a removed file
    overlay: RefCell<HashMap<PathBuf, Option<Vec<u8>>>>,
}

impl DryRunSystem {
    /// Create a new dry-run system
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the list of operations that would be performed
    pub fn operations(&self) -> Vec<Operation> {
        self.operations.borrow().clone()
    }

    fn record(&self, op: Operation) {
        self.operations.borrow_mut().push(op);
    }

    fn overlaid(&self, path: &AbsPath) -> Option<Option<Vec<u8>>> {
        self.overlay.borrow().get(path.as_path()).cloned()
    }
}

impl System for DryRunSystem {
    fn read_file(&self, path: &AbsPath) -> Result<Vec<u8>> {
        match self.overlaid(path) {
            Some(Some(content)) => Ok(content),
            Some(None) => Err(Error::FileRead {
                path: path.as_path().to_path_buf(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "removed in dry-run"),
            }),
            None => RealSystem.read_file(path),
        }
    }

    fn write_file(&self, path: &AbsPath, content: &[u8], mode: Option<u32>) -> Result<()> {
        self.record(Operation::WriteFile {
            path: path.clone(),
            size: content.len(),
            mode,
        });
        self.overlay
            .borrow_mut()
            .insert(path.as_path().to_path_buf(), Some(content.to_vec()));
        Ok(())
    }

    fn create_dir_all(&self, path: &AbsPath) -> Result<()> {
        if !RealSystem.is_dir(path) {
            self.record(Operation::CreateDir { path: path.clone() });
        }
        Ok(())
    }

    fn remove_file(&self, path: &AbsPath) -> Result<()> {
        self.record(Operation::Remove { path: path.clone() });
        self.overlay
            .borrow_mut()
            .insert(path.as_path().to_path_buf(), None);
        Ok(())
    }

    fn exists(&self, path: &AbsPath) -> bool {
        match self.overlaid(path) {
            Some(entry) => entry.is_some(),
            None => RealSystem.exists(path),
        }
    }

    fn is_dir(&self, path: &AbsPath) -> bool {
        let created = self
            .operations
            .borrow()
            .iter()
            .any(|op| matches!(op, Operation::CreateDir { path: p } if p == path));
        created || RealSystem.is_dir(path)
    }
}
