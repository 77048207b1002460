//! Staging of compiled extensions into `<vendor>/ext`.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::{InstallerError, Result};
use crate::ui::{Reporter, Tone};

/// The directory extensions are staged into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionDir {
    path: PathBuf,
}

impl ExtensionDir {
    /// Create `<vendor_dir>/ext` if needed.
    pub fn prepare(vendor_dir: &Path) -> Result<Self> {
        let path = vendor_dir.join("ext");
        fs::create_dir_all(&path).map_err(|e| {
            tracing::debug!("create_dir_all {} failed: {}", path.display(), e);
            InstallerError::NotAllowed {
                path: path.clone(),
                message: format!("Can not create {} directory.", path.display()),
            }
        })?;
        Ok(Self { path })
    }

    /// Location of the directory.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Copy `artifact` into the directory, replacing an earlier copy.
    ///
    /// Returns the file name the extension was staged under.
    pub fn stage(&self, artifact: &Path, ui: &mut dyn Reporter) -> Result<String> {
        let name = artifact
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| InstallerError::ExtensionNotFound {
                dir: artifact.to_path_buf(),
            })?;
        let dest = self.path.join(&name);

        let line = ui.styled(
            Tone::Info,
            &format!(
                "Copying extension {} into {}",
                ui.styled(Tone::Comment, &name),
                ui.styled(Tone::Comment, &dest.display().to_string())
            ),
        );
        ui.write(&line, true);

        remove_previous(&dest, &name)?;
        fs::copy(artifact, &dest).map_err(|e| {
            tracing::debug!("copy {} failed: {}", artifact.display(), e);
            InstallerError::NotAllowed {
                path: dest.clone(),
                message: format!("Could not create a new version of {}", name),
            }
        })?;

        Ok(name)
    }
}

/// Remove `path` if it exists.
pub(crate) fn remove_previous(path: &Path, name: &str) -> Result<()> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => {
            tracing::debug!("remove {} failed: {}", path.display(), e);
            Err(InstallerError::NotAllowed {
                path: path.to_path_buf(),
                message: format!("Could not delete previous version of {}", name),
            })
        }
    }
}
