//! Base error types for hookmux
//!
//! This module provides the error type shared by every hookmux crate. Each
//! variant carries the offending package, hook or path so the CLI can report
//! failures without extra context.

use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

/// Base error type for shared functionality
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Path is not absolute
    #[error("Path must be absolute: {}", path.display())]
    PathNotAbsolute { path: PathBuf },

    /// Path is not relative
    #[error("Path must be relative: {}", path.display())]
    PathNotRelative { path: PathBuf },

    /// Invalid path prefix
    #[error("Path {} is not under base directory {}", path.display(), base.display())]
    InvalidPathPrefix {
        path: Arc<PathBuf>,
        base: Arc<PathBuf>,
    },

    /// Error reading a file
    #[error("Failed to read file {}: {source}", path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error writing a file
    #[error("Failed to write file {}: {source}", path.display())]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error removing a file
    #[error("Failed to remove file {}: {source}", path.display())]
    FileRemove {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error creating a directory
    #[error("Failed to create directory {}: {source}", path.display())]
    DirectoryCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error reading a directory
    #[error("Failed to read directory {}: {source}", path.display())]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A package declares a hooks directory that does not exist
    #[error(
        "The package \"{package}\" declares the git hooks group \"{group}\" in {}, which does not exist",
        path.display()
    )]
    HookDirectoryNotFound {
        package: String,
        group: String,
        path: PathBuf,
    },

    /// The root project requires a hook the package does not provide
    #[error("The package \"{package}\" does not provide the required git hook \"{hook}\"")]
    MissingHook { package: String, hook: String },

    /// The persisted hook collection exists but cannot be parsed
    #[error("Hook collection {} is corrupt: {source}", path.display())]
    CorruptState {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The hook collection could not be serialized
    #[error("Failed to serialize hook collection: {0}")]
    Serialize(#[source] serde_json::Error),

    /// A package or root manifest is malformed
    #[error("Invalid manifest {}: {message}", path.display())]
    InvalidManifest { path: PathBuf, message: String },

    /// Invalid configuration
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// A name outside the git hook whitelist was used as a hook type
    #[error("Unknown git hook type: {0}")]
    UnknownHookType(String),

    /// Generic error message
    #[error("{0}")]
    Message(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::panic)]
    use super::*;

    #[test]
    fn test_missing_hook_names_package_and_hook() {
        let err = Error::MissingHook {
            package: "acme/lint-hooks".to_string(),
            hook: "lint".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "The package \"acme/lint-hooks\" does not provide the required git hook \"lint\""
        );
    }

    #[test]
    fn test_hook_directory_not_found_mentions_path() {
        let err = Error::HookDirectoryNotFound {
            package: "pkgA".to_string(),
            group: "lint".to_string(),
            path: PathBuf::from("/project/vendor/pkgA/scripts"),
        };
        let msg = err.to_string();
        assert!(msg.contains("pkgA"));
        assert!(msg.contains("\"lint\""));
        assert!(msg.contains("/project/vendor/pkgA/scripts"));
    }

    #[test]
    fn test_corrupt_state_keeps_source() {
        use std::error::Error as _;

        let parse_err = serde_json::from_str::<serde_json::Value>("{ nope").unwrap_err();
        let err = Error::CorruptState {
            path: PathBuf::from(".git/hooks/hookmux-hooks.json"),
            source: parse_err,
        };
        assert!(err.source().is_some());
        assert!(err.to_string().starts_with("Hook collection .git/hooks/hookmux-hooks.json"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: Error = io.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
