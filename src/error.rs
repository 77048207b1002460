//! Error types for installer operations.
//!
//! This module defines [`InstallerError`], the primary error type used
//! throughout the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - A requirement that is not met is *data*, not an error: it shows up as a
//!   failed [`RequirementResult`](crate::environment::RequirementResult)
//! - Use `InstallerError` for conditions that abort the pipeline
//! - Use `anyhow::Error` (via `InstallerError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for installer operations.
#[derive(Debug, Error)]
pub enum InstallerError {
    /// The host operating system matches no known platform.
    #[error("Can not detect environment. Invalid operating system {os}")]
    EnvironmentDetection { os: String },

    /// The platform is recognized but has no working detector.
    #[error("{platform} environment detection is not implemented yet")]
    NotImplemented { platform: String },

    /// A process could not be started at all.
    #[error("Failed to start '{command}': {message}")]
    CommandSpawn { command: String, message: String },

    /// `composer.json` was not found in the project root.
    #[error("composer.json not found in {}", path.display())]
    ComposerNotFound { path: PathBuf },

    /// A composer metadata file could not be parsed.
    #[error("Failed to parse {}: {message}", path.display())]
    ComposerParse { path: PathBuf, message: String },

    /// The environment check failed, so a package can not be compiled.
    #[error("Can not compile {package} sources. Broken environment configuration.")]
    BrokenEnvironment { package: String },

    /// The extension compiler exited with a non-zero code.
    #[error("'{command}' failed for {package} with exit code {code}")]
    CompilationFailed {
        package: String,
        command: String,
        code: i32,
    },

    /// No compiled artifact was found after compilation.
    #[error("Could not find extension in {}", dir.display())]
    ExtensionNotFound { dir: PathBuf },

    /// A file in the extension directory could not be created or replaced.
    #[error("{message}")]
    NotAllowed { path: PathBuf, message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl InstallerError {
    /// Process exit code for this error.
    ///
    /// A failed compiler run exits with the compiler's own code.
    pub fn exit_code(&self) -> i32 {
        match self {
            InstallerError::CompilationFailed { code, .. } if *code != 0 => *code,
            _ => 1,
        }
    }
}

/// Result type alias for installer operations.
pub type Result<T> = std::result::Result<T, InstallerError>;
