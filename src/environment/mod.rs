//! Build toolchain detection.
//!
//! A [`PlatformDetector`] lists the binaries its platform needs as
//! [`Requirement`]s. [`EnvironmentCheck`] evaluates them once per process,
//! offering remediation for missing tools, and gates compilation on the
//! result.
//!
//! # Example
//!
//! ```
//! use zephir_installer::environment::{EnvironmentCheck, Requirement};
//! use zephir_installer::shell::MockRunner;
//! use zephir_installer::ui::MockUI;
//!
//! let mut check = EnvironmentCheck::new(|| {
//!     Ok(("Linux".to_string(), vec![Requirement::new("gcc", || true)]))
//! });
//!
//! let mut ui = MockUI::new();
//! assert!(check.check_once(&mut ui, &MockRunner::new()).unwrap());
//! assert!(ui.has_line("  - gcc: OK"));
//! ```

pub mod check;
pub mod detector;
pub mod factory;
pub mod host;
pub mod remediation;
pub mod requirement;

pub use check::{EnvironmentCheck, EnvironmentReport, RequirementSource};
pub use detector::{binary_in, PlatformDetector, LINUX_BINARIES, WINDOWS_BINARIES};
pub use factory::{host_os_identifier, DetectorFactory};
pub use host::HostEnv;
pub use remediation::{find_package_manager, package_for, PACKAGE_MANAGERS};
pub use requirement::{Requirement, RequirementResult};
