//! Composer package metadata and Zephir config discovery.

pub mod composer;
pub mod discovery;

pub use composer::{ComposerManifest, InstalledPackages, PackageMetadata, ZephirConfigs};
pub use discovery::{discover, ExtensionConfig};
