//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Zephir extension installer for Composer projects.
#[derive(Debug, Parser)]
#[command(name = "zephir-installer")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to project root (overrides current directory)
    #[arg(short, long, global = true)]
    pub project: Option<PathBuf>,

    /// Vendor directory (overrides composer.json config.vendor-dir)
    #[arg(long, global = true, env = "COMPOSER_VENDOR_DIR")]
    pub vendor_dir: Option<PathBuf>,

    /// Operating system identifier (overrides host detection)
    #[arg(long, global = true, env = "ZEPHIR_INSTALLER_OS", value_name = "OS")]
    pub os: Option<String>,

    /// Show verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Hide stderr of external commands
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Use prompt defaults instead of asking
    #[arg(long, global = true)]
    pub non_interactive: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Commands {
    /// Compile and stage Zephir extensions (default if no command specified)
    Install,

    /// Check the build toolchain only
    Check,
}
