//! zephir-installer - Build-time installer for Zephir PHP extensions.
//!
//! Composer calls the `zephir-installer` binary from its `post-install-cmd`
//! and `post-update-cmd` scripts. It finds the Zephir build configurations
//! declared by the root package and its dependencies, verifies the host
//! toolchain, compiles each extension, and stages the results together with
//! a `zephir_extensions.ini` loader manifest in `<vendor>/ext`.
//!
//! # Modules
//!
//! - [`build`] - Compiler driver, artifact staging, and loader manifest
//! - [`cli`] - Command-line interface and argument parsing
//! - [`environment`] - Toolchain detection and remediation
//! - [`error`] - Error types and result aliases
//! - [`package`] - Composer metadata and extension discovery
//! - [`shell`] - Shell command execution
//! - [`ui`] - Terminal output and prompts
//!
//! # Example
//!
//! ```
//! use zephir_installer::environment::{DetectorFactory, HostEnv};
//!
//! let detector = DetectorFactory::create("Linux", HostEnv::from_pairs([("PATH", "/usr/bin")])).unwrap();
//! assert_eq!(detector.name(), "Linux");
//! assert_eq!(detector.search_paths(), [std::path::PathBuf::from("/usr/bin")]);
//! ```

pub mod build;
pub mod cli;
pub mod environment;
pub mod error;
pub mod package;
pub mod shell;
pub mod ui;

pub use error::{InstallerError, Result};
