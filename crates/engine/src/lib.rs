//! # hookmux engine
//!
//! Hook aggregation for the hookmux git hook manager.
//!
//! Packages contribute hook scripts; the root project chooses which of them
//! to activate. This crate merges those contributions into one collection
//! per git hook type and keeps a dispatcher file per hook type in the
//! project's `.git/hooks` directory:
//!
//! - **Discovery**: finding hook scripts inside a package
//! - **Collection**: the persisted hook type → package → hook mapping
//! - **Dispatchers**: materializing and removing the per-type hook files
//! - **Aggregator**: install, uninstall and update transitions
//! - **System Abstraction**: filesystem operations, with a dry-run backend

pub mod aggregator;
pub mod collection;
pub mod discovery;
pub mod dispatcher;
pub mod hooks_dir;
pub mod system;

// Re-export path types from core
pub use hookmux_core::path::{AbsPath, RelPath};

// Re-export error types from core
pub use hookmux_core::{Error, Result};

// Re-export commonly used types
pub use aggregator::{Aggregator, Inconsistency, SkipReason, Transition, TransitionReport};
pub use collection::{CollectionStore, HookCollection, RegisteredHook};
pub use hooks_dir::HooksDir;
pub use system::{DryRunSystem, RealSystem, System};
