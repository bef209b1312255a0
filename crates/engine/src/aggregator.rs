//! Hook aggregation
//!
//! The [`Aggregator`] merges a package's hooks into the collection when it
//! is installed, takes them out again when it is uninstalled, and keeps the
//! dispatcher files in step with the collection after every transition.
//!
//! Every transition validates first and writes last: discovery and the
//! required-hook check run before the collection is touched, so a failed
//! transition leaves the hooks directory exactly as it was.

use crate::collection::{CollectionStore, HookCollection, HookPathMap};
use crate::discovery::discover;
use crate::dispatcher;
use crate::hooks_dir::HooksDir;
use crate::system::System;
use hookmux_config::{PackageDescriptor, RequiredHooks};
use hookmux_core::{AbsPath, Error, HookType, Result, relative_path};
use indexmap::IndexMap;
use std::fmt;

/// Why a transition did nothing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The project root has no `.git` directory
    NotAGitWorkingCopy,
    /// The package declares no hook directories
    NoAvailableHooks,
    /// The root project requires no hooks from the package
    NotRequired,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Self::NotAGitWorkingCopy => "not a git working copy",
            Self::NoAvailableHooks => "package provides no git hooks",
            Self::NotRequired => "no git hooks required from package",
        };
        f.write_str(reason)
    }
}

/// What an applied transition changed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransitionReport {
    /// Hook types whose dispatcher was (re)written
    pub activated: Vec<HookType>,
    /// Hook types whose dispatcher was removed
    pub deactivated: Vec<HookType>,
    /// Whether the collection document was rewritten or deleted
    pub collection_changed: bool,
}

/// Outcome of a transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// The transition ran
    Applied(TransitionReport),
    /// The transition did not apply
    Skipped(SkipReason),
}

impl Transition {
    /// The report, if the transition ran
    pub fn report(&self) -> Option<&TransitionReport> {
        match self {
            Self::Applied(report) => Some(report),
            Self::Skipped(_) => None,
        }
    }
}

/// A mismatch between the collection and the dispatcher files
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Inconsistency {
    /// The hook type is collected but has no dispatcher
    MissingDispatcher(HookType),
    /// The hook type is collected but its file is not the dispatcher
    ModifiedDispatcher(HookType),
    /// A dispatcher exists for a hook type nobody contributes to
    OrphanedDispatcher(HookType),
}

impl fmt::Display for Inconsistency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingDispatcher(t) => write!(f, "{t}: dispatcher missing"),
            Self::ModifiedDispatcher(t) => {
                write!(f, "{t}: hook file is not the hookmux dispatcher")
            }
            Self::OrphanedDispatcher(t) => write!(f, "{t}: dispatcher without collected hooks"),
        }
    }
}

enum Plan {
    Skip(SkipReason),
    Entries(IndexMap<HookType, HookPathMap>),
}

/// Applies install, uninstall and update transitions to one project
pub struct Aggregator<'a, S: System> {
    system: &'a S,
    project_root: AbsPath,
    collection_file: String,
    required: &'a RequiredHooks,
}

impl<'a, S: System> Aggregator<'a, S> {
    /// Create an aggregator for the project at `project_root`
    ///
    /// `collection_file` is the file name of the collection document inside
    /// the hooks directory, `required` the root project's required hooks.
    pub fn new(
        system: &'a S,
        project_root: AbsPath,
        collection_file: impl Into<String>,
        required: &'a RequiredHooks,
    ) -> Self {
        Self {
            system,
            project_root,
            collection_file: collection_file.into(),
            required,
        }
    }

    /// The existing hooks directory, without creating it
    pub fn locate(&self) -> Option<HooksDir> {
        let path = self.project_root.join_name(".git").join_name("hooks");
        HooksDir::open(self.system, path)
    }

    /// The store for the collection document in `hooks_dir`
    pub fn store(&self, hooks_dir: &HooksDir) -> CollectionStore {
        CollectionStore::new(hooks_dir, &self.collection_file)
    }

    /// Load the current collection
    ///
    /// Returns `None` when the project has no hooks directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection document cannot be read or parsed
    pub fn collection(&self) -> Result<Option<HookCollection>> {
        match self.locate() {
            Some(hooks_dir) => self.store(&hooks_dir).load(self.system).map(Some),
            None => Ok(None),
        }
    }

    /// Activate the hooks the root project requires from `package`
    ///
    /// Entries from an earlier install of the same package are replaced.
    ///
    /// # Errors
    ///
    /// Returns `HookDirectoryNotFound` if a declared directory is missing,
    /// `MissingHook` if a required hook is not provided, or an I/O error.
    /// Nothing is written in either of the first two cases.
    pub fn install(&self, package: &PackageDescriptor) -> Result<Transition> {
        if !package.has_available_hooks() {
            tracing::debug!("{} declares no git hooks", package.name);
            return Ok(Transition::Skipped(SkipReason::NoAvailableHooks));
        }
        let Some(hooks_dir) = HooksDir::ensure(self.system, &self.project_root)? else {
            return Ok(Transition::Skipped(SkipReason::NotAGitWorkingCopy));
        };

        match self.plan(&hooks_dir, package)? {
            Plan::Skip(reason) => Ok(Transition::Skipped(reason)),
            Plan::Entries(entries) => {
                tracing::info!("Installing git hooks of {}", package.name);
                let insert = Some((package.name.as_str(), entries));
                let report = self.apply(&hooks_dir, None, insert)?;
                Ok(Transition::Applied(report))
            }
        }
    }

    /// Deactivate every hook contributed by the package `name`
    ///
    /// # Errors
    ///
    /// Returns an error if the collection cannot be loaded or saved, or a
    /// dispatcher cannot be removed
    pub fn uninstall(&self, name: &str) -> Result<Transition> {
        let Some(hooks_dir) = HooksDir::ensure(self.system, &self.project_root)? else {
            return Ok(Transition::Skipped(SkipReason::NotAGitWorkingCopy));
        };

        tracing::info!("Uninstalling git hooks of {}", name);
        let report = self.apply(&hooks_dir, Some(name), None)?;
        Ok(Transition::Applied(report))
    }

    /// Replace the hooks of package `old_name` with those of `package`
    ///
    /// Equivalent to uninstalling `old_name` and installing `package`, except
    /// that `package` is validated first and the collection is saved once.
    ///
    /// # Errors
    ///
    /// Same as [`Aggregator::install`]; on a validation error the old
    /// package's hooks stay active
    pub fn update(&self, old_name: &str, package: &PackageDescriptor) -> Result<Transition> {
        let Some(hooks_dir) = HooksDir::ensure(self.system, &self.project_root)? else {
            return Ok(Transition::Skipped(SkipReason::NotAGitWorkingCopy));
        };

        let plan = if package.has_available_hooks() {
            self.plan(&hooks_dir, package)?
        } else {
            Plan::Skip(SkipReason::NoAvailableHooks)
        };

        tracing::info!("Updating git hooks of {} to {}", old_name, package.name);
        let report = match plan {
            Plan::Skip(reason) => {
                tracing::debug!("{}: {}", package.name, reason);
                self.apply(&hooks_dir, Some(old_name), None)?
            }
            Plan::Entries(entries) => {
                self.apply(&hooks_dir, Some(old_name), Some((package.name.as_str(), entries)))?
            }
        };
        Ok(Transition::Applied(report))
    }

    /// Compare the collection with the dispatcher files on disk
    ///
    /// Hook files of types outside the collection that are not dispatchers
    /// belong to the user and are not reported.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection cannot be loaded
    pub fn verify(&self) -> Result<Vec<Inconsistency>> {
        let Some(hooks_dir) = self.locate() else {
            return Ok(Vec::new());
        };
        let collection = self.store(&hooks_dir).load(self.system)?;
        Ok(self.inconsistencies(&hooks_dir, &collection))
    }

    /// Rewrite missing or modified dispatchers and remove orphaned ones
    ///
    /// The collection document itself is never changed.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection cannot be loaded or a dispatcher
    /// cannot be written or removed
    pub fn sync(&self) -> Result<Transition> {
        let Some(hooks_dir) = HooksDir::ensure(self.system, &self.project_root)? else {
            return Ok(Transition::Skipped(SkipReason::NotAGitWorkingCopy));
        };
        let collection = self.store(&hooks_dir).load(self.system)?;

        let mut report = TransitionReport::default();
        for issue in self.inconsistencies(&hooks_dir, &collection) {
            match issue {
                Inconsistency::MissingDispatcher(t) | Inconsistency::ModifiedDispatcher(t) => {
                    dispatcher::materialize(self.system, &hooks_dir, t)?;
                    report.activated.push(t);
                }
                Inconsistency::OrphanedDispatcher(t) => {
                    dispatcher::remove(self.system, &hooks_dir, t)?;
                    report.deactivated.push(t);
                }
            }
        }
        Ok(Transition::Applied(report))
    }

    fn inconsistencies(
        &self,
        hooks_dir: &HooksDir,
        collection: &HookCollection,
    ) -> Vec<Inconsistency> {
        HookType::ALL
            .into_iter()
            .filter_map(|t| {
                let exists = self.system.exists(&hooks_dir.hook_path(t));
                let generated = exists && dispatcher::is_generated(self.system, hooks_dir, t);
                match (collection.contains(t), exists, generated) {
                    (true, false, _) => Some(Inconsistency::MissingDispatcher(t)),
                    (true, true, false) => Some(Inconsistency::ModifiedDispatcher(t)),
                    (false, true, true) => Some(Inconsistency::OrphanedDispatcher(t)),
                    _ => None,
                }
            })
            .collect()
    }

    // Discover and validate without touching the collection
    fn plan(&self, hooks_dir: &HooksDir, package: &PackageDescriptor) -> Result<Plan> {
        let Some(required) = self.required.for_package(&package.name) else {
            tracing::debug!("The root project requires no git hooks from {}", package.name);
            return Ok(Plan::Skip(SkipReason::NotRequired));
        };

        let discovered = discover(package)?;
        if let Some(hook) = required.iter().find(|h| !discovered.contains_key(*h)) {
            return Err(Error::MissingHook {
                package: package.name.clone(),
                hook: hook.clone(),
            });
        }

        for hook_name in discovered.keys().filter(|h| !required.contains(*h)) {
            tracing::debug!("Skipping git hook '{}' of {}, not required", hook_name, package.name);
        }

        // Entries follow the root project's order, which is the execution order
        let mut entries: IndexMap<HookType, HookPathMap> = IndexMap::new();
        for hook_name in required {
            let Some(hooks) = discovered.get(hook_name) else {
                continue;
            };

            for hook in hooks {
                let Some(dir) = hook.directory() else {
                    continue;
                };
                let path = format!("{}/{}", relative_path(hooks_dir.path(), &dir), hook.hook_type);
                let slot = entries.entry(hook.hook_type).or_default();
                if let Some(previous) = slot.insert(hook_name.clone(), path.clone()) {
                    tracing::warn!(
                        "{} provides several {} scripts for '{}', using {} instead of {}",
                        package.name,
                        hook.hook_type,
                        hook_name,
                        path,
                        previous
                    );
                }
            }
        }
        Ok(Plan::Entries(entries))
    }

    // Load, modify, save, then bring the dispatchers in line
    fn apply(
        &self,
        hooks_dir: &HooksDir,
        remove: Option<&str>,
        insert: Option<(&str, IndexMap<HookType, HookPathMap>)>,
    ) -> Result<TransitionReport> {
        let store = self.store(hooks_dir);
        let mut collection = store.load(self.system)?;
        let before = collection.clone();

        let mut pruned = collection.prune_empty();
        if let Some(old) = remove
            && insert.as_ref().is_none_or(|(new, _)| *new != old)
        {
            pruned.extend(collection.remove_package(old));
        }

        let mut activated = Vec::new();
        if let Some((name, entries)) = insert {
            activated.extend(entries.keys().copied());
            pruned.extend(collection.replace_package(name, entries));
        }

        let mut deactivated: Vec<HookType> = Vec::new();
        for t in pruned {
            if !collection.contains(t) && !deactivated.contains(&t) {
                deactivated.push(t);
            }
        }

        let collection_changed = collection != before;
        if collection_changed {
            store.save(self.system, &collection)?;
        } else {
            tracing::debug!("Hook collection unchanged");
        }

        for t in &deactivated {
            dispatcher::remove(self.system, hooks_dir, *t)?;
        }
        for t in &activated {
            dispatcher::materialize(self.system, hooks_dir, *t)?;
        }

        Ok(TransitionReport {
            activated,
            deactivated,
            collection_changed,
        })
    }
}
