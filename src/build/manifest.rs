//! Loader manifest for staged extensions.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::error::Result;
use crate::ui::{Reporter, Tone};

use super::stage::remove_previous;

/// File name of the generated manifest.
pub const EXTENSIONS_INI: &str = "zephir_extensions.ini";

/// Manifest body: one `extension=./<name>` line per extension.
pub fn render_manifest(names: &[String]) -> String {
    names
        .iter()
        .map(|name| format!("extension=./{}", name))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Replace `<ext_dir>/zephir_extensions.ini` with entries for `names`.
pub fn write_manifest(ext_dir: &Path, names: &[String], ui: &mut dyn Reporter) -> Result<PathBuf> {
    let path = ext_dir.join(EXTENSIONS_INI);

    remove_previous(&path, EXTENSIONS_INI)?;
    fs::write(&path, render_manifest(names))
        .with_context(|| format!("Failed to write {}", path.display()))?;

    let line = ui.styled(
        Tone::Info,
        &format!(
            "Creating ({})",
            ui.styled(Tone::Comment, &path.display().to_string())
        ),
    );
    ui.write(&line, true);
    tracing::debug!("wrote {} with {} extension(s)", path.display(), names.len());

    Ok(path)
}
