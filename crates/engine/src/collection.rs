//! Persistent hook collection
//!
//! The collection maps hook type → package name → hook name → path of the
//! script, relative to the git hooks directory. It is stored as one JSON
//! document inside the hooks directory and deleted once it becomes empty.
//!
//! ```json
//! {
//!   "pre-commit": {
//!     "acme/lint-hooks": { "lint": "../../vendor/acme/lint-hooks/scripts/pre-commit" }
//!   }
//! }
//! ```
//!
//! Insertion order is preserved everywhere. It is the order in which the
//! dispatcher runtime executes scripts.

use crate::hooks_dir::HooksDir;
use crate::system::System;
use hookmux_core::{AbsPath, Error, HookType, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Hook name → relative script path
pub type HookPathMap = IndexMap<String, String>;

/// Package name → its hooks for one hook type
pub type PackageHookMap = IndexMap<String, HookPathMap>;

/// The in-memory hook collection
///
/// A hook type is present only while at least one package contributes to it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HookCollection {
    by_type: IndexMap<HookType, PackageHookMap>,
}

/// A script registered in the collection, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegisteredHook<'a> {
    /// Contributing package
    pub package: &'a str,
    /// Hook name inside the package
    pub hook_name: &'a str,
    /// Script path relative to the hooks directory
    pub path: &'a str,
}

impl HookCollection {
    /// Create an empty collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether no hook type is present
    pub fn is_empty(&self) -> bool {
        self.by_type.is_empty()
    }

    /// Whether any package contributes a script to `hook_type`
    pub fn contains(&self, hook_type: HookType) -> bool {
        self.by_type
            .get(&hook_type)
            .is_some_and(|packages| packages.values().any(|hooks| !hooks.is_empty()))
    }

    /// Hook types present, in insertion order
    pub fn hook_types(&self) -> impl Iterator<Item = HookType> + '_ {
        self.by_type.keys().copied()
    }

    /// The packages contributing to `hook_type`
    pub fn packages(&self, hook_type: HookType) -> Option<&PackageHookMap> {
        self.by_type.get(&hook_type)
    }

    /// Flatten every script registered for `hook_type`
    pub fn scripts(&self, hook_type: HookType) -> Vec<RegisteredHook<'_>> {
        self.by_type
            .get(&hook_type)
            .into_iter()
            .flat_map(|packages| {
                packages.iter().flat_map(|(package, hooks)| {
                    hooks.iter().map(move |(hook_name, path)| RegisteredHook {
                        package,
                        hook_name,
                        path,
                    })
                })
            })
            .collect()
    }

    /// Hook types `package` currently contributes to
    pub fn types_of(&self, package: &str) -> Vec<HookType> {
        self.by_type
            .iter()
            .filter(|(_, packages)| packages.contains_key(package))
            .map(|(hook_type, _)| *hook_type)
            .collect()
    }

    /// Replace everything `package` contributes with `entries`
    ///
    /// A hook type the package already contributed to keeps its position,
    /// so re-installing an unchanged package leaves the collection as it was.
    /// Returns the hook types that became empty and were pruned.
    pub fn replace_package(
        &mut self,
        package: &str,
        entries: IndexMap<HookType, HookPathMap>,
    ) -> Vec<HookType> {
        let stale: Vec<HookType> = self
            .types_of(package)
            .into_iter()
            .filter(|hook_type| !entries.contains_key(hook_type))
            .collect();
        let pruned = self.remove_package_from(package, &stale);

        for (hook_type, hooks) in entries {
            self.by_type
                .entry(hook_type)
                .or_default()
                .insert(package.to_string(), hooks);
        }
        pruned
    }

    /// Drop `package` from every hook type
    ///
    /// Returns the hook types that became empty and were pruned.
    pub fn remove_package(&mut self, package: &str) -> Vec<HookType> {
        let types = self.types_of(package);
        self.remove_package_from(package, &types)
    }

    /// Drop packages without hooks and hook types without packages
    ///
    /// Documents edited by hand can hold such entries. Returns the hook
    /// types that were pruned.
    pub fn prune_empty(&mut self) -> Vec<HookType> {
        let mut pruned = Vec::new();
        self.by_type.retain(|hook_type, packages| {
            packages.retain(|_, hooks| !hooks.is_empty());
            if packages.is_empty() {
                pruned.push(*hook_type);
            }
            !packages.is_empty()
        });
        pruned
    }

    fn remove_package_from(&mut self, package: &str, types: &[HookType]) -> Vec<HookType> {
        let mut pruned = Vec::new();
        for hook_type in types {
            if let Some(packages) = self.by_type.get_mut(hook_type) {
                packages.shift_remove(package);
                if packages.is_empty() {
                    self.by_type.shift_remove(hook_type);
                    pruned.push(*hook_type);
                }
            }
        }
        pruned
    }
}

/// Loads and saves the collection document
#[derive(Debug, Clone)]
pub struct CollectionStore {
    path: AbsPath,
}

impl CollectionStore {
    /// Store for the document `file_name` inside `hooks_dir`
    pub fn new(hooks_dir: &HooksDir, file_name: &str) -> Self {
        Self {
            path: hooks_dir.file(file_name),
        }
    }

    /// Path of the collection document
    pub fn path(&self) -> &AbsPath {
        &self.path
    }

    /// Load the collection
    ///
    /// A missing document is an empty collection.
    ///
    /// # Errors
    ///
    /// Returns `CorruptState` if the document does not parse as a collection,
    /// or an I/O error if it cannot be read
    pub fn load<S: System>(&self, system: &S) -> Result<HookCollection> {
        if !system.exists(&self.path) {
            return Ok(HookCollection::new());
        }

        let content = system.read_file(&self.path)?;
        serde_json::from_slice(&content).map_err(|e| Error::CorruptState {
            path: self.path.as_path().to_path_buf(),
            source: e,
        })
    }

    /// Save the collection, deleting the document when it is empty
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write or removal fails
    pub fn save<S: System>(&self, system: &S, collection: &HookCollection) -> Result<()> {
        if collection.is_empty() {
            if system.exists(&self.path) {
                tracing::debug!("Collection is empty, removing {}", self.path);
                system.remove_file(&self.path)?;
            }
            return Ok(());
        }

        let mut json = serde_json::to_string_pretty(collection).map_err(Error::Serialize)?;
        json.push('\n');
        system.write_file(&self.path, json.as_bytes(), None)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::panic)]
    use super::*;
    use crate::system::RealSystem;
    use std::fs;
    use tempfile::TempDir;

    fn hooks(pairs: &[(&str, &str)]) -> HookPathMap {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    fn entries(items: Vec<(HookType, HookPathMap)>) -> IndexMap<HookType, HookPathMap> {
        items.into_iter().collect()
    }

    fn store(temp: &TempDir) -> CollectionStore {
        fs::create_dir_all(temp.path().join(".git/hooks")).unwrap();
        let root = AbsPath::from_path(temp.path()).unwrap();
        let hooks_dir = HooksDir::ensure(&RealSystem, &root).unwrap().unwrap();
        CollectionStore::new(&hooks_dir, "hookmux-hooks.json")
    }

    #[test]
    fn test_replace_package_prunes_stale_types() {
        let mut collection = HookCollection::new();
        collection.replace_package(
            "a",
            entries(vec![
                (HookType::PreCommit, hooks(&[("lint", "x/pre-commit")])),
                (HookType::PrePush, hooks(&[("lint", "x/pre-push")])),
            ]),
        );

        let pruned = collection.replace_package(
            "a",
            entries(vec![(HookType::PreCommit, hooks(&[("lint", "y/pre-commit")]))]),
        );
        assert_eq!(pruned, [HookType::PrePush]);
        assert!(!collection.contains(HookType::PrePush));
        assert_eq!(collection.scripts(HookType::PreCommit)[0].path, "y/pre-commit");
    }

    #[test]
    fn test_replace_package_keeps_position() {
        let mut collection = HookCollection::new();
        for (name, path) in [("a", "a"), ("b", "b"), ("a", "a2")] {
            let pre_commit = entries(vec![(HookType::PreCommit, hooks(&[("l", path)]))]);
            collection.replace_package(name, pre_commit);
        }

        let order: Vec<&str> = collection
            .scripts(HookType::PreCommit)
            .iter()
            .map(|h| h.package)
            .collect();
        assert_eq!(order, ["a", "b"]);
    }

    #[test]
    fn test_remove_package_preserves_order() {
        let mut collection = HookCollection::new();
        for name in ["a", "b", "c"] {
            let commit_msg = entries(vec![(HookType::CommitMsg, hooks(&[("m", name)]))]);
            collection.replace_package(name, commit_msg);
        }

        assert!(collection.remove_package("b").is_empty());
        let order: Vec<&str> = collection
            .scripts(HookType::CommitMsg)
            .iter()
            .map(|h| h.path)
            .collect();
        assert_eq!(order, ["a", "c"]);

        collection.remove_package("a");
        assert_eq!(collection.remove_package("c"), [HookType::CommitMsg]);
        assert!(collection.is_empty());
    }

    #[test]
    fn test_scripts_flatten_in_order() {
        let mut collection = HookCollection::new();
        collection.replace_package(
            "a",
            entries(vec![(HookType::PreCommit, hooks(&[("lint", "1"), ("format", "2")]))]),
        );
        collection.replace_package(
            "b",
            entries(vec![(HookType::PreCommit, hooks(&[("lint", "3")]))]),
        );

        let scripts = collection.scripts(HookType::PreCommit);
        let paths: Vec<&str> = scripts.iter().map(|h| h.path).collect();
        assert_eq!(paths, ["1", "2", "3"]);
        assert_eq!(scripts[1].hook_name, "format");
        assert!(collection.scripts(HookType::PrePush).is_empty());
    }

    #[test]
    fn test_prune_empty_entries() {
        let mut collection: HookCollection = serde_json::from_str(
            r#"{
                "pre-commit": {},
                "pre-push": {"a": {}, "b": {"lint": "x/pre-push"}},
                "commit-msg": {"a": {}}
            }"#,
        )
        .unwrap();
        assert!(!collection.contains(HookType::PreCommit));
        assert!(!collection.contains(HookType::CommitMsg));
        assert!(collection.contains(HookType::PrePush));

        let pruned = collection.prune_empty();
        assert_eq!(pruned, [HookType::PreCommit, HookType::CommitMsg]);
        let types: Vec<HookType> = collection.hook_types().collect();
        assert_eq!(types, [HookType::PrePush]);
        assert_eq!(collection.packages(HookType::PrePush).unwrap().len(), 1);
        assert!(collection.prune_empty().is_empty());
    }

    #[test]
    fn test_load_missing_document() {
        let temp = TempDir::new().unwrap();
        assert!(store(&temp).load(&RealSystem).unwrap().is_empty());
    }

    #[test]
    fn test_save_writes_pretty_json() {
        let temp = TempDir::new().unwrap();
        let store = store(&temp);
        let mut collection = HookCollection::new();
        collection.replace_package(
            "pkgA",
            entries(vec![(HookType::PreCommit, hooks(&[("lint", "../x/pre-commit")]))]),
        );

        store.save(&RealSystem, &collection).unwrap();
        let content = fs::read_to_string(store.path().as_path()).unwrap();
        let expected = concat!(
            "{\n",
            "  \"pre-commit\": {\n",
            "    \"pkgA\": {\n",
            "      \"lint\": \"../x/pre-commit\"\n",
            "    }\n",
            "  }\n",
            "}\n",
        );
        assert_eq!(content, expected);
        assert_eq!(store.load(&RealSystem).unwrap(), collection);
    }

    #[test]
    fn test_save_empty_removes_document() {
        let temp = TempDir::new().unwrap();
        let store = store(&temp);
        fs::write(store.path().as_path(), "{}").unwrap();

        store.save(&RealSystem, &HookCollection::new()).unwrap();
        assert!(!store.path().as_path().exists());

        // Saving an empty collection without a document is a no-op
        store.save(&RealSystem, &HookCollection::new()).unwrap();
    }

    #[test]
    fn test_load_corrupt_document() {
        let temp = TempDir::new().unwrap();
        let store = store(&temp);

        fs::write(store.path().as_path(), "not json").unwrap();
        assert!(matches!(
            store.load(&RealSystem).unwrap_err(),
            Error::CorruptState { .. }
        ));

        fs::write(store.path().as_path(), r#"{"pre-commit": ["x"]}"#).unwrap();
        assert!(matches!(
            store.load(&RealSystem).unwrap_err(),
            Error::CorruptState { .. }
        ));
    }

    #[test]
    fn test_load_rejects_unknown_hook_type() {
        let temp = TempDir::new().unwrap();
        let store = store(&temp);
        fs::write(store.path().as_path(), r#"{"post-commit": {"a": {"l": "x"}}}"#).unwrap();

        let err = store.load(&RealSystem).unwrap_err();
        assert!(err.to_string().contains("is corrupt"));
    }
}
