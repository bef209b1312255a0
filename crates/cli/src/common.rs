//! Common utilities and types shared across CLI commands

use anyhow::{Context, Result};
use hookmux_config::{Config, PackageDescriptor, RequiredHooks};
use hookmux_core::path::AbsPath;
use hookmux_engine::system::Operation;
use hookmux_engine::{Aggregator, DryRunSystem, RealSystem, System};
use owo_colors::OwoColorize;
use std::path::Path;
use std::sync::Arc;

use crate::error::CommandError;

/// Filesystem backend selected by `--dry-run`
#[derive(Debug)]
pub enum SystemBackend {
    /// Perform every operation
    Real(RealSystem),
    /// Read from disk, record writes and removals
    DryRun(DryRunSystem),
}

impl SystemBackend {
    /// Backend for the given mode
    pub fn new(dry_run: bool) -> Self {
        if dry_run {
            Self::DryRun(DryRunSystem::new())
        } else {
            Self::Real(RealSystem)
        }
    }

    /// Operations recorded in dry-run mode
    pub fn recorded(&self) -> Option<Vec<Operation>> {
        match self {
            Self::Real(_) => None,
            Self::DryRun(system) => Some(system.operations()),
        }
    }
}

impl System for SystemBackend {
    fn read_file(&self, path: &AbsPath) -> hookmux_core::Result<Vec<u8>> {
        match self {
            Self::Real(s) => s.read_file(path),
            Self::DryRun(s) => s.read_file(path),
        }
    }

    fn write_file(
        &self,
        path: &AbsPath,
        content: &[u8],
        mode: Option<u32>,
    ) -> hookmux_core::Result<()> {
        match self {
            Self::Real(s) => s.write_file(path, content, mode),
            Self::DryRun(s) => s.write_file(path, content, mode),
        }
    }

    fn create_dir_all(&self, path: &AbsPath) -> hookmux_core::Result<()> {
        match self {
            Self::Real(s) => s.create_dir_all(path),
            Self::DryRun(s) => s.create_dir_all(path),
        }
    }

    fn remove_file(&self, path: &AbsPath) -> hookmux_core::Result<()> {
        match self {
            Self::Real(s) => s.remove_file(path),
            Self::DryRun(s) => s.remove_file(path),
        }
    }

    fn exists(&self, path: &AbsPath) -> bool {
        match self {
            Self::Real(s) => s.exists(path),
            Self::DryRun(s) => s.exists(path),
        }
    }

    fn is_dir(&self, path: &AbsPath) -> bool {
        match self {
            Self::Real(s) => s.is_dir(path),
            Self::DryRun(s) => s.is_dir(path),
        }
    }
}

/// Runtime context for CLI commands
///
/// Consolidates what every project command needs: the canonical project
/// root, its configuration, the hooks the root manifest requires and the
/// filesystem backend.
#[derive(Debug)]
pub struct RuntimeContext {
    /// Shared configuration
    pub config: Arc<Config>,
    /// Canonicalized project root
    pub project_root: AbsPath,
    /// `extra.required-git-hooks` of the root manifest
    pub required: RequiredHooks,
    /// Filesystem backend
    pub system: SystemBackend,
}

impl RuntimeContext {
    /// Create a runtime context for the project at `project_root`
    ///
    /// Loads `.hookmux.toml` and the root manifest.
    ///
    /// # Errors
    ///
    /// Returns an error if the root is not absolute, or the configuration
    /// or root manifest is invalid
    pub fn new(project_root: &Path, dry_run: bool) -> Result<Self> {
        let config = Config::load(project_root).context("Failed to load configuration")?;
        let required = RequiredHooks::from_root(project_root, &config.general.manifest)
            .context("Failed to read the root manifest")?;

        Ok(Self {
            config: Arc::new(config),
            project_root: AbsPath::from_path(project_root)?,
            required,
            system: SystemBackend::new(dry_run),
        })
    }

    /// Aggregator bound to this project
    pub fn aggregator(&self) -> Aggregator<'_, SystemBackend> {
        Aggregator::new(
            &self.system,
            self.project_root.clone(),
            self.config.general.collection_file.clone(),
            &self.required,
        )
    }

    /// Whether mutations are only recorded
    #[inline]
    pub fn is_dry_run(&self) -> bool {
        matches!(self.system, SystemBackend::DryRun(_))
    }

    /// Resolve a package argument
    ///
    /// An existing directory is used as is. Anything else is taken as a
    /// package name and looked up under the configured vendor directory.
    ///
    /// # Errors
    ///
    /// Returns `PackageNotFound` if neither location holds a manifest, or
    /// the manifest error if it does not parse
    pub fn resolve_package(&self, spec: &str) -> crate::error::Result<PackageDescriptor> {
        let manifest = &self.config.general.manifest;
        let direct = Path::new(spec);
        let dir = if direct.join(manifest).is_file() {
            direct.to_path_buf()
        } else {
            self.config.vendor_dir(self.project_root.as_path()).join(spec)
        };

        if !dir.join(manifest).is_file() {
            return Err(CommandError::PackageNotFound {
                name: spec.to_string(),
                path: dir.join(manifest),
            });
        }
        tracing::debug!("Resolved package {} to {}", spec, dir.display());
        Ok(PackageDescriptor::from_dir(&dir, manifest)?)
    }

    /// Print what a dry run would have done
    pub fn print_recorded(&self) {
        let Some(operations) = self.system.recorded() else {
            return;
        };

        if operations.is_empty() {
            println!("{}", "Dry run: nothing to change.".dimmed());
            return;
        }

        println!("\n{}", "Dry run, no changes made. Would:".yellow());
        for op in operations {
            match op {
                Operation::CreateDir { path } => println!("  create directory {path}"),
                Operation::WriteFile { path, size, mode } => match mode {
                    Some(mode) => println!("  write {path} ({size} bytes, mode {mode:o})"),
                    None => println!("  write {path} ({size} bytes)"),
                },
                Operation::Remove { path } => println!("  remove {path}"),
            }
        }
    }
}
