//! Extension compilation, staging, and loader manifest.

pub mod compiler;
pub mod manifest;
pub mod stage;

pub use compiler::{compile, find_extension, modules_dir};
pub use manifest::{render_manifest, write_manifest, EXTENSIONS_INI};
pub use stage::ExtensionDir;
