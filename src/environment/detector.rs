//! Per-platform toolchain detectors.

use std::path::PathBuf;
use std::rc::Rc;

use crate::error::{InstallerError, Result};
use crate::shell::privilege_prefix;

use super::host::HostEnv;
use super::remediation::{install_with_package_manager, zephir_guidance};
use super::requirement::Requirement;

/// Binaries a Linux host needs, in report order.
///
/// `gcc` drives the linker itself, so no separate `link` binary is probed;
/// coreutils `link` only creates hard links and says nothing about the
/// toolchain.
pub const LINUX_BINARIES: [&str; 6] = ["gcc", "make", "sed", "re2c", "phpize", "zephir"];

/// Binaries a Windows host needs, as `(reported name, file name)`.
pub const WINDOWS_BINARIES: [(&str, &str); 12] = [
    ("cl", "cl.exe"),
    ("buildconf", "buildconf.bat"),
    ("configure", "configure.bat"),
    ("link", "link.exe"),
    ("nmake", "nmake.exe"),
    ("lib", "lib.exe"),
    ("bison", "bison.exe"),
    ("sed", "sed.exe"),
    ("re2c", "re2c.exe"),
    ("zip", "zip.exe"),
    ("phpize", "phpize.bat"),
    ("zephir", "zephir.bat"),
];

/// Platform-specific detector of the extension build toolchain.
///
/// Each variant carries the environment snapshot its search paths are
/// derived from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlatformDetector {
    Linux { env: HostEnv },
    Windows { env: HostEnv },
    Darwin { env: HostEnv },
}

impl PlatformDetector {
    /// Human-readable platform label.
    pub fn name(&self) -> &'static str {
        match self {
            PlatformDetector::Linux { .. } => "Linux",
            PlatformDetector::Windows { .. } => "Windows",
            PlatformDetector::Darwin { .. } => "Mac OS",
        }
    }

    /// Directories searched for binaries, in order.
    ///
    /// Empty entries are dropped.
    pub fn search_paths(&self) -> Vec<PathBuf> {
        match self {
            PlatformDetector::Linux { env } | PlatformDetector::Darwin { env } => {
                split_paths(env.get("PATH"), ':').collect()
            }
            PlatformDetector::Windows { env } => split_paths(env.get("PATH"), ';')
                .chain(single_path(env.get("PHP_SDK")))
                .chain(single_path(env.get("PHP_DEVPACK")))
                .collect(),
        }
    }

    /// Check whether `binary` is a regular file directly inside a search path.
    pub fn has_binary(&self, binary: &str) -> bool {
        binary_in(&self.search_paths(), binary)
    }

    /// Requirements this platform needs, in report order.
    ///
    /// Detection runs when a requirement is evaluated, not here.
    pub fn requirements(&self) -> Result<Vec<Requirement>> {
        match self {
            PlatformDetector::Linux { .. } => Ok(self.linux_requirements()),
            PlatformDetector::Windows { .. } => Ok(self.windows_requirements()),
            PlatformDetector::Darwin { .. } => Err(InstallerError::NotImplemented {
                platform: self.name().to_string(),
            }),
        }
    }

    fn linux_requirements(&self) -> Vec<Requirement> {
        let paths: Rc<[PathBuf]> = self.search_paths().into();

        LINUX_BINARIES
            .iter()
            .map(|&binary| {
                let requirement = binary_requirement(binary, binary, &paths);
                match binary {
                    "re2c" | "phpize" => requirement.on_error(install_with_package_manager(
                        binary,
                        Rc::clone(&paths),
                        privilege_prefix(),
                    )),
                    "zephir" => requirement.on_error(zephir_guidance()),
                    _ => requirement,
                }
            })
            .collect()
    }

    fn windows_requirements(&self) -> Vec<Requirement> {
        let paths: Rc<[PathBuf]> = self.search_paths().into();

        WINDOWS_BINARIES
            .iter()
            .map(|&(name, file)| {
                let requirement = binary_requirement(name, file, &paths);
                if name == "zephir" {
                    requirement.on_error(zephir_guidance())
                } else {
                    requirement
                }
            })
            .collect()
    }
}

fn binary_requirement(name: &str, file: &str, paths: &Rc<[PathBuf]>) -> Requirement {
    let paths = Rc::clone(paths);
    let file = file.to_string();
    Requirement::new(name, move || binary_in(&paths, &file))
}

/// Check whether `binary` is a regular file directly inside one of `paths`.
pub fn binary_in(paths: &[PathBuf], binary: &str) -> bool {
    if binary.is_empty() {
        return false;
    }
    paths.iter().any(|dir| dir.join(binary).is_file())
}

fn single_path(value: Option<&str>) -> Option<PathBuf> {
    value
        .filter(|entry| !entry.trim().is_empty())
        .map(PathBuf::from)
}

fn split_paths(value: Option<&str>, separator: char) -> impl Iterator<Item = PathBuf> + '_ {
    value
        .unwrap_or_default()
        .split(separator)
        .filter(|entry| !entry.trim().is_empty())
        .map(PathBuf::from)
}
