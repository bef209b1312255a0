//! Error types for CLI commands

use hookmux_core::HookType;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during command execution
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum CommandError {
    /// A package argument is neither a package directory nor a vendored package
    #[error("Package not found: {name} (looked for {})", path.display())]
    PackageNotFound {
        /// The package argument as given
        name: String,
        /// Where the manifest was expected
        path: PathBuf,
    },

    /// A hook script could not be started
    #[error("Failed to execute git {hook_type} hook '{}'", path.display())]
    HookSpawn {
        /// Hook type being dispatched
        hook_type: HookType,
        /// Script that failed to start
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A hook script exited with a non-zero status
    #[error("git {hook_type} hook failed with exit code {code}")]
    HookFailed {
        /// Hook type being dispatched
        hook_type: HookType,
        /// Exit code to hand back to git
        code: i32,
    },

    /// Error from the hookmux libraries
    #[error(transparent)]
    Core(#[from] hookmux_core::Error),

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Generic error
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for command operations
pub type Result<T> = std::result::Result<T, CommandError>;

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::panic)]
    use super::*;
    use std::io;

    #[test]
    fn test_package_not_found_message() {
        let error = CommandError::PackageNotFound {
            name: "acme/hooks".to_string(),
            path: PathBuf::from("/p/vendor/acme/hooks/hookmux.json"),
        };

        let error_msg = error.to_string();
        assert!(error_msg.contains("acme/hooks"));
        assert!(error_msg.contains("/p/vendor/acme/hooks/hookmux.json"));
    }

    #[test]
    fn test_hook_failed_message() {
        let error = CommandError::HookFailed {
            hook_type: HookType::PreCommit,
            code: 3,
        };
        assert_eq!(error.to_string(), "git pre-commit hook failed with exit code 3");
    }

    #[test]
    fn test_core_error_is_transparent() {
        let error: CommandError = hookmux_core::Error::MissingHook {
            package: "pkgA".to_string(),
            hook: "lint".to_string(),
        }
        .into();
        assert_eq!(
            error.to_string(),
            "The package \"pkgA\" does not provide the required git hook \"lint\""
        );
    }

    #[test]
    fn test_hook_failed_survives_anyhow() {
        let error: anyhow::Error = CommandError::HookFailed {
            hook_type: HookType::PrePush,
            code: 2,
        }
        .into();
        assert!(matches!(
            error.downcast_ref::<CommandError>(),
            Some(CommandError::HookFailed { code: 2, .. })
        ));
    }

    #[test]
    fn test_io_error() {
        let error: CommandError = io::Error::new(io::ErrorKind::NotFound, "gone").into();
        assert!(error.to_string().contains("IO error"));
    }
}
