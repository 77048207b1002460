//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandContext`] for the inputs every command shares
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::path::{Path, PathBuf};

use crate::cli::args::{Cli, Commands};
use crate::environment::{host_os_identifier, HostEnv};
use crate::error::Result;
use crate::shell::{CommandRunner, ProcessRunner};
use crate::ui::Reporter;

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait to provide its execution logic.
pub trait Command {
    /// Execute the command.
    ///
    /// # Arguments
    ///
    /// * `ui` - Reporter for status output and prompts
    /// * `runner` - Executes external commands
    ///
    /// # Returns
    ///
    /// A [`CommandResult`] indicating success/failure and exit code.
    fn execute(&self, ui: &mut dyn Reporter, runner: &dyn CommandRunner) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Inputs shared by all commands.
#[derive(Debug, Clone)]
pub struct CommandContext {
    /// Project root holding `composer.json`.
    pub project_root: PathBuf,
    /// Vendor directory override; relative paths are resolved against the
    /// project root.
    pub vendor_dir: Option<PathBuf>,
    /// Operating system identifier used to pick the detector.
    pub os: String,
    /// Environment the detector searches.
    pub env: HostEnv,
}

impl CommandContext {
    /// Context for the running host.
    pub fn for_host(project_root: PathBuf) -> Self {
        Self {
            project_root,
            vendor_dir: None,
            os: host_os_identifier(),
            env: HostEnv::from_process(),
        }
    }

    /// Resolve the vendor directory override, if any.
    pub fn vendor_dir_override(&self) -> Option<PathBuf> {
        self.vendor_dir
            .as_ref()
            .map(|dir| self.project_root.join(dir))
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    context: CommandContext,
}

impl CommandDispatcher {
    /// Create a new dispatcher for the given context.
    pub fn new(context: CommandContext) -> Self {
        Self { context }
    }

    /// Create a dispatcher for the running host, applying CLI overrides.
    pub fn from_cli(cli: &Cli, project_root: PathBuf) -> Self {
        let mut context = CommandContext::for_host(project_root);
        context.vendor_dir = cli.vendor_dir.clone();
        if let Some(os) = &cli.os {
            context.os = os.clone();
        }
        Self::new(context)
    }

    /// Get the project root path.
    pub fn project_root(&self) -> &Path {
        &self.context.project_root
    }

    /// Get the shared command context.
    pub fn context(&self) -> &CommandContext {
        &self.context
    }

    /// Dispatch and execute a command with the process runner.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn Reporter) -> Result<CommandResult> {
        self.dispatch_with(cli.command.as_ref(), ui, &ProcessRunner::new())
    }

    /// Dispatch and execute a command with an explicit runner.
    ///
    /// No subcommand means `install`.
    pub fn dispatch_with(
        &self,
        command: Option<&Commands>,
        ui: &mut dyn Reporter,
        runner: &dyn CommandRunner,
    ) -> Result<CommandResult> {
        match command {
            Some(Commands::Check) => {
                let cmd = super::check::CheckCommand::new(self.context.clone());
                cmd.execute(ui, runner)
            }
            Some(Commands::Install) | None => {
                let cmd = super::install::InstallCommand::new(self.context.clone());
                cmd.execute(ui, runner)
            }
        }
    }
}
