//! Core types and utilities for hookmux
//!
//! This is the foundation crate (Layer 0) that all other hookmux crates depend on.
//! It provides:
//! - Path types (`AbsPath`, `RelPath`) and the hooks-dir relative path resolver
//! - The git hook type whitelist (`HookType`)
//! - Base error types
//!
//! This crate has no dependencies on other hookmux crates.

pub mod error;
pub mod hook_type;
pub mod path;

pub use error::{Error, Result};
pub use hook_type::{HookType, is_valid_hook_type};
pub use path::{AbsPath, RelPath, relative_path};
