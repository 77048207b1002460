//! Zephir extension discovery across the dependency graph.

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::ui::{Reporter, Tone};

use super::composer::{ComposerManifest, InstalledPackages};

/// One Zephir build configuration to compile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionConfig {
    /// Package declaring the configuration.
    pub package: String,
    /// Absolute or project-relative path of the config file.
    pub config_path: PathBuf,
}

impl ExtensionConfig {
    /// Directory the compiler runs in.
    pub fn source_dir(&self) -> &Path {
        match self.config_path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        }
    }
}

/// Collect Zephir configs declared by the root package and by every
/// installed package, in that order.
///
/// Each config is reported as `  - Zephir <package> (<path>)`.
pub fn discover(
    manifest: &ComposerManifest,
    project_root: &Path,
    vendor_dir: &Path,
    ui: &mut dyn Reporter,
) -> Result<Vec<ExtensionConfig>> {
    let mut configs = Vec::new();

    let root_name = manifest.name().to_string();
    for config in manifest.package.zephir_configs() {
        report(ui, &root_name, &format!("~/{}", config));
        configs.push(ExtensionConfig {
            package: root_name.clone(),
            config_path: project_root.join(&config),
        });
    }

    for package in InstalledPackages::load(vendor_dir)? {
        for config in package.zephir_configs() {
            report(ui, &package.name, &format!("~/vendor/{}/{}", package.name, config));
            configs.push(ExtensionConfig {
                package: package.name.clone(),
                config_path: vendor_dir.join(&package.name).join(&config),
            });
        }
    }

    tracing::debug!("discovered {} zephir config(s)", configs.len());
    Ok(configs)
}

fn report(ui: &mut dyn Reporter, package: &str, display_path: &str) {
    let line = format!(
        "  - Zephir {} ({})",
        ui.styled(Tone::Info, package),
        ui.styled(Tone::Comment, display_path)
    );
    ui.write(&line, true);
}
