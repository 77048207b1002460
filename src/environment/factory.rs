//! Host operating system classification.

use crate::error::{InstallerError, Result};

use super::detector::PlatformDetector;
use super::host::HostEnv;

/// Selects the detector for a host operating system identifier.
pub struct DetectorFactory;

impl DetectorFactory {
    /// Classify `os` and build its detector over `env`.
    ///
    /// Identifiers are matched without regard to case: Windows by prefix
    /// (`win*`, `cygwin*`), then the Linux family exactly (`linux`, `unix`,
    /// `freebsd`), then Darwin exactly (`darwin`, `mac`). Anything else is
    /// an [`InstallerError::EnvironmentDetection`].
    ///
    /// # Example
    ///
    /// ```
    /// use zephir_installer::environment::{DetectorFactory, HostEnv};
    ///
    /// let detector = DetectorFactory::create("WINNT", HostEnv::default()).unwrap();
    /// assert_eq!(detector.name(), "Windows");
    ///
    /// assert!(DetectorFactory::create("plan9", HostEnv::default()).is_err());
    /// ```
    pub fn create(os: &str, env: HostEnv) -> Result<PlatformDetector> {
        let lower = os.to_lowercase();

        if lower.starts_with("win") || lower.starts_with("cygwin") {
            return Ok(PlatformDetector::Windows { env });
        }
        if matches!(lower.as_str(), "linux" | "unix" | "freebsd") {
            return Ok(PlatformDetector::Linux { env });
        }
        if matches!(lower.as_str(), "darwin" | "mac") {
            return Ok(PlatformDetector::Darwin { env });
        }

        Err(InstallerError::EnvironmentDetection { os: os.to_string() })
    }
}

/// Operating system identifier of the running host.
///
/// Uses the kernel names the classification rules expect (`Linux`,
/// `WINNT`, `Darwin`, `FreeBSD`); other targets pass through verbatim.
pub fn host_os_identifier() -> String {
    match std::env::consts::OS {
        "linux" => "Linux",
        "windows" => "WINNT",
        "macos" => "Darwin",
        "freebsd" => "FreeBSD",
        other => other,
    }
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn platform(os: &str) -> &'static str {
        DetectorFactory::create(os, HostEnv::default())
            .unwrap()
            .name()
    }

    #[test]
    fn windows_matches_by_prefix() {
        for os in ["WINNT", "Windows", "win32", "CYGWIN_NT-10.0", "cygwin"] {
            assert_eq!(platform(os), "Windows", "{os}");
        }
    }

    #[test]
    fn linux_family_matches_exactly() {
        for os in ["Linux", "linux", "UNIX", "FreeBSD"] {
            assert_eq!(platform(os), "Linux", "{os}");
        }
    }

    #[test]
    fn darwin_matches_exactly() {
        for os in ["Darwin", "darwin", "MAC"] {
            assert_eq!(platform(os), "Mac OS", "{os}");
        }
    }

    #[test]
    fn near_misses_are_rejected() {
        for os in ["linux-gnu", "macos", "OpenBSD", "SunOS", ""] {
            assert!(DetectorFactory::create(os, HostEnv::default()).is_err(), "{os}");
        }
    }

    #[test]
    fn unknown_os_names_identifier() {
        let err = DetectorFactory::create("plan9", HostEnv::default()).unwrap_err();
        assert!(matches!(err, InstallerError::EnvironmentDetection { ref os } if os == "plan9"));
        assert_eq!(
            err.to_string(),
            "Can not detect environment. Invalid operating system plan9"
        );
    }

    #[test]
    fn environment_travels_with_detector() {
        let env = HostEnv::from_pairs([("PATH", "/opt/bin")]);
        let detector = DetectorFactory::create("Linux", env.clone()).unwrap();
        assert_eq!(detector, PlatformDetector::Linux { env });
    }

    #[test]
    fn host_identifier_is_classifiable_on_supported_hosts() {
        let os = host_os_identifier();
        if cfg!(any(target_os = "linux", target_os = "windows", target_os = "macos")) {
            assert!(DetectorFactory::create(&os, HostEnv::default()).is_ok());
        }
    }
}
