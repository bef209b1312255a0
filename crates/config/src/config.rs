//! Configuration management
//!
//! This module handles loading the optional `.hookmux.toml` file from the
//! project root. Every field has a default, so projects without the file
//! behave exactly like projects with an empty one.

use crate::Result;
use hookmux_core::{Error, is_valid_hook_type};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the project configuration file
pub const CONFIG_FILE_NAME: &str = ".hookmux.toml";

/// General configuration section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// File name of the manifest read from the project root and from every package
    #[serde(default = "default_manifest")]
    pub manifest: String,

    /// File name of the hook collection document inside the git hooks directory
    #[serde(default = "default_collection_file", rename = "collectionFile")]
    pub collection_file: String,

    /// Directory, relative to the project root, where packages are installed
    ///
    /// Used to resolve `hookmux install <name>` when `<name>` is not a path.
    #[serde(default = "default_vendor_dir", rename = "vendorDir")]
    pub vendor_dir: PathBuf,
}

fn default_manifest() -> String {
    "hookmux.json".to_string()
}

fn default_collection_file() -> String {
    "hookmux-hooks.json".to_string()
}

fn default_vendor_dir() -> PathBuf {
    PathBuf::from("vendor")
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            manifest: default_manifest(),
            collection_file: default_collection_file(),
            vendor_dir: default_vendor_dir(),
        }
    }
}

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// General settings
    #[serde(default)]
    pub general: GeneralConfig,
}

impl Config {
    /// Load configuration from the project root
    ///
    /// Returns the default configuration when `.hookmux.toml` does not exist.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read, TOML parsing fails or a
    /// value does not validate
    pub fn load(project_root: &Path) -> Result<Self> {
        let path = project_root.join(CONFIG_FILE_NAME);
        if !path.exists() {
            tracing::debug!(
                "No {} in {}, using defaults",
                CONFIG_FILE_NAME,
                project_root.display()
            );
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path).map_err(|e| Error::FileRead {
            path: path.clone(),
            source: e,
        })?;
        Self::from_toml_str(&content)
    }

    /// Load configuration from TOML string
    ///
    /// # Errors
    ///
    /// Returns error if TOML parsing fails or a value does not validate
    pub fn from_toml_str(toml_content: &str) -> Result<Self> {
        let config: Self = toml::from_str(toml_content).map_err(|e| Error::InvalidConfig {
            message: format!("Failed to parse {CONFIG_FILE_NAME}: {e}"),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    ///
    /// The manifest and collection names must be plain file names, and the
    /// collection document must not collide with a dispatcher file.
    ///
    /// # Errors
    ///
    /// Returns an error naming the offending field
    pub fn validate(&self) -> Result<()> {
        validate_file_name("general.manifest", &self.general.manifest)?;
        validate_file_name("general.collectionFile", &self.general.collection_file)?;

        if is_valid_hook_type(&self.general.collection_file) {
            return Err(Error::InvalidConfig {
                message: format!(
                    "general.collectionFile '{}' clashes with a git hook name",
                    self.general.collection_file
                ),
            });
        }

        if self.general.vendor_dir.is_absolute() {
            return Err(Error::InvalidConfig {
                message: format!(
                    "general.vendorDir must be relative to the project root, got {}",
                    self.general.vendor_dir.display()
                ),
            });
        }

        Ok(())
    }

    /// Directory where packages are installed
    pub fn vendor_dir(&self, project_root: &Path) -> PathBuf {
        project_root.join(&self.general.vendor_dir)
    }
}

fn validate_file_name(field: &str, value: &str) -> Result<()> {
    let is_plain = !value.is_empty()
        && value != "."
        && value != ".."
        && !value.contains('/')
        && !value.contains('\\');
    if is_plain {
        Ok(())
    } else {
        Err(Error::InvalidConfig {
            message: format!("{field} must be a plain file name, got '{value}'"),
        })
    }
}
