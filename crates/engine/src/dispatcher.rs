//! Dispatcher files
//!
//! Every hook type present in the collection gets one executable file in
//! the hooks directory. All of them are byte-identical copies of a fixed
//! template that resolves its hook type from its own file name and hands
//! over to `hookmux dispatch`.

use crate::hooks_dir::HooksDir;
use crate::system::System;
use hookmux_core::{HookType, Result};

/// The dispatcher script written for every active hook type
pub const DISPATCHER_TEMPLATE: &str = include_str!("../res/dispatcher.sh");

/// Permissions of a dispatcher file
pub const DISPATCHER_MODE: u32 = 0o755;

/// Write the dispatcher for `hook_type`, replacing whatever file is there
///
/// # Errors
///
/// Returns an error if the old file cannot be removed or the new one written
pub fn materialize<S: System>(system: &S, hooks_dir: &HooksDir, hook_type: HookType) -> Result<()> {
    let path = hooks_dir.hook_path(hook_type);
    if system.exists(&path) {
        if !is_generated(system, hooks_dir, hook_type) {
            tracing::warn!("Replacing existing git hook {} with the hookmux dispatcher", path);
        }
        system.remove_file(&path)?;
    }

    tracing::debug!("Writing dispatcher {}", path);
    system.write_file(&path, DISPATCHER_TEMPLATE.as_bytes(), Some(DISPATCHER_MODE))
}

/// Remove the dispatcher for `hook_type` if present
///
/// Returns whether a file was removed.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be removed
pub fn remove<S: System>(system: &S, hooks_dir: &HooksDir, hook_type: HookType) -> Result<bool> {
    let path = hooks_dir.hook_path(hook_type);
    if !system.exists(&path) {
        return Ok(false);
    }

    tracing::debug!("Removing dispatcher {}", path);
    system.remove_file(&path)?;
    Ok(true)
}

/// Whether the file for `hook_type` is an unmodified dispatcher
pub fn is_generated<S: System>(system: &S, hooks_dir: &HooksDir, hook_type: HookType) -> bool {
    system
        .read_file(&hooks_dir.hook_path(hook_type))
        .is_ok_and(|content| content == DISPATCHER_TEMPLATE.as_bytes())
}
