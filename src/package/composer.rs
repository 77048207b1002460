//! Composer metadata files.
//!
//! Reads the fields the installer needs from the root `composer.json` and
//! from the installed-packages list Composer maintains under the vendor
//! directory. Everything else in those files is ignored.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;

use crate::error::{InstallerError, Result};

/// Name Composer gives a root package without one.
pub const ROOT_PACKAGE_NAME: &str = "__root__";

/// Vendor directory used when `config.vendor-dir` is absent.
pub const DEFAULT_VENDOR_DIR: &str = "vendor";

/// `extra.zephir`: one config path or a list of them.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ZephirConfigs {
    One(String),
    Many(Vec<String>),
}

/// The `extra` section of a package.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Extra {
    #[serde(default)]
    pub zephir: Option<ZephirConfigs>,
}

/// A package as described in `composer.json` or `installed.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PackageMetadata {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub extra: Extra,
}

impl PackageMetadata {
    /// Zephir config paths declared by this package, relative to it.
    pub fn zephir_configs(&self) -> Vec<String> {
        match &self.extra.zephir {
            Some(ZephirConfigs::One(path)) => vec![path.clone()],
            Some(ZephirConfigs::Many(paths)) => paths.clone(),
            None => Vec::new(),
        }
    }
}

/// The `config` section of the root package.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ComposerConfig {
    #[serde(default, rename = "vendor-dir")]
    pub vendor_dir: Option<String>,
}

/// Root `composer.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ComposerManifest {
    #[serde(flatten)]
    pub package: PackageMetadata,
    #[serde(default)]
    pub config: ComposerConfig,
}

impl ComposerManifest {
    /// Load `composer.json` from `project_root`.
    ///
    /// # Errors
    ///
    /// Returns `ComposerNotFound` if the file doesn't exist.
    /// Returns `ComposerParse` if the JSON is invalid.
    pub fn load(project_root: &Path) -> Result<Self> {
        let path = project_root.join("composer.json");
        let content = fs::read_to_string(&path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                InstallerError::ComposerNotFound {
                    path: project_root.to_path_buf(),
                }
            } else {
                InstallerError::Io(e)
            }
        })?;

        Self::parse(&content, &path)
    }

    /// Parse `composer.json` content. `source_path` is used for errors.
    pub fn parse(content: &str, source_path: &Path) -> Result<Self> {
        serde_json::from_str(content).map_err(|e| InstallerError::ComposerParse {
            path: source_path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Root package name, or Composer's placeholder when unnamed.
    pub fn name(&self) -> &str {
        if self.package.name.is_empty() {
            ROOT_PACKAGE_NAME
        } else {
            &self.package.name
        }
    }

    /// Vendor directory of the project, resolved against `project_root`.
    pub fn vendor_dir(&self, project_root: &Path) -> PathBuf {
        project_root.join(
            self.config
                .vendor_dir
                .as_deref()
                .unwrap_or(DEFAULT_VENDOR_DIR),
        )
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum InstalledFile {
    Legacy(Vec<PackageMetadata>),
    Current { packages: Vec<PackageMetadata> },
}

/// Packages installed into a vendor directory.
pub struct InstalledPackages;

impl InstalledPackages {
    /// Path of the installed-packages list under `vendor_dir`.
    pub fn path(vendor_dir: &Path) -> PathBuf {
        vendor_dir.join("composer").join("installed.json")
    }

    /// Load installed packages from `vendor_dir`.
    ///
    /// Accepts both the `{"packages": [...]}` layout and the older bare
    /// array. A missing file means nothing is installed.
    pub fn load(vendor_dir: &Path) -> Result<Vec<PackageMetadata>> {
        let path = Self::path(vendor_dir);
        if !path.exists() {
            tracing::debug!("{} not found, no installed packages", path.display());
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        let installed: InstalledFile =
            serde_json::from_str(&content).map_err(|e| InstallerError::ComposerParse {
                path: path.clone(),
                message: e.to_string(),
            })?;

        Ok(match installed {
            InstalledFile::Legacy(packages) => packages,
            InstalledFile::Current { packages } => packages,
        })
    }
}
