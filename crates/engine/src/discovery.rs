//! Hook discovery
//!
//! Walks the directories a package declares and picks out every file named
//! after a recognized git hook type.

use hookmux_config::PackageDescriptor;
use hookmux_core::{AbsPath, Error, HookType, Result};
use indexmap::{IndexMap, IndexSet};
use std::path::Path;
use walkdir::WalkDir;

/// A hook script found inside a package
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DiscoveredHook {
    /// Hook type, taken from the file name
    pub hook_type: HookType,
    /// Absolute path of the script
    pub path: AbsPath,
}

impl DiscoveredHook {
    /// Directory containing the script
    pub fn directory(&self) -> Option<AbsPath> {
        self.path.parent()
    }
}

/// Group name → hooks found under that group's directory
pub type Discovered = IndexMap<String, Vec<DiscoveredHook>>;

/// Discover the hooks of every group `package` declares
///
/// Every declared group gets a key, even when its directory holds no hook.
///
/// # Errors
///
/// Returns `HookDirectoryNotFound` if a declared directory does not exist,
/// or `DirectoryRead` if walking it fails
pub fn discover(package: &PackageDescriptor) -> Result<Discovered> {
    let mut discovered = Discovered::new();
    for (group, dir) in package.hook_directories() {
        if !dir.as_path().is_dir() {
            return Err(Error::HookDirectoryNotFound {
                package: package.name.clone(),
                group,
                path: dir.into_path_buf(),
            });
        }

        let hooks = discover_dir(&dir)?;
        tracing::debug!(
            "Found {} hook(s) in group '{}' of {}",
            hooks.len(),
            group,
            package.name
        );
        discovered.insert(group, hooks);
    }
    Ok(discovered)
}

/// Recursively collect hook scripts below `dir`
///
/// Directory symlinks are followed. Files whose name is not a recognized
/// hook type are skipped. A script reachable through several paths is
/// returned once.
///
/// # Errors
///
/// Returns `DirectoryRead` if an entry cannot be read or a symlink loop is found
pub fn discover_dir(dir: &AbsPath) -> Result<Vec<DiscoveredHook>> {
    let mut found = IndexSet::new();

    for entry in WalkDir::new(dir.as_path())
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|e| Error::DirectoryRead {
            path: e.path().unwrap_or(dir.as_path()).to_path_buf(),
            source: e.into(),
        })?;

        if !entry.file_type().is_file() {
            continue;
        }
        let Some(hook_type) = entry.file_name().to_str().and_then(HookType::from_file_name)
        else {
            continue;
        };

        let path = resolve(entry.path())?;
        found.insert(DiscoveredHook { hook_type, path });
    }

    Ok(found.into_iter().collect())
}

// Canonicalize the containing directory but keep the entry's own name, so a
// symlinked script still maps to the hook type it was discovered as.
fn resolve(path: &Path) -> Result<AbsPath> {
    let parent = path.parent().unwrap_or(path);
    let canonical = std::fs::canonicalize(parent).map_err(|e| Error::DirectoryRead {
        path: parent.to_path_buf(),
        source: e,
    })?;
    match path.file_name() {
        Some(name) => AbsPath::new(canonical.join(name)),
        None => AbsPath::new(canonical),
    }
}
