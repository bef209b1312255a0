//! Configuration management for hookmux
//!
//! This crate handles:
//! - Loading `.hookmux.toml` project configuration
//! - Parsing package and root-project manifests into typed declarations
//! - Locating the project root (git working tree)
//! - Logging initialization

pub mod config;
pub mod dirs;
pub mod logging;
pub mod manifest;

// Re-export error types from core
pub use hookmux_core::{Error, Result};

// Re-export main types
pub use config::{Config, GeneralConfig};
pub use dirs::{find_working_tree, resolve_project_root};
pub use manifest::{PackageDescriptor, RequiredHooks};
