//! Install command implementation.
//!
//! The `zephir-installer install` command is what Composer's
//! `post-install-cmd` and `post-update-cmd` scripts call. It compiles every
//! discovered Zephir extension and stages it under `<vendor>/ext`.

use crate::build::{compile, write_manifest, ExtensionDir, EXTENSIONS_INI};
use crate::environment::EnvironmentCheck;
use crate::error::{InstallerError, Result};
use crate::package::{discover, ComposerManifest};
use crate::shell::CommandRunner;
use crate::ui::Reporter;

use super::dispatcher::{Command, CommandContext, CommandResult};

/// The install command implementation.
pub struct InstallCommand {
    context: CommandContext,
}

impl InstallCommand {
    /// Create a new install command.
    pub fn new(context: CommandContext) -> Self {
        Self { context }
    }
}

impl Command for InstallCommand {
    fn execute(&self, ui: &mut dyn Reporter, runner: &dyn CommandRunner) -> Result<CommandResult> {
        let project_root = &self.context.project_root;
        let manifest = ComposerManifest::load(project_root)?;
        let vendor_dir = self
            .context
            .vendor_dir_override()
            .unwrap_or_else(|| manifest.vendor_dir(project_root));
        tracing::debug!("vendor directory: {}", vendor_dir.display());

        let ext_dir = ExtensionDir::prepare(&vendor_dir)?;
        let configs = discover(&manifest, project_root, &vendor_dir, ui)?;

        let mut check = EnvironmentCheck::for_host(&self.context.os, self.context.env.clone());
        let mut staged = Vec::with_capacity(configs.len());

        for config in &configs {
            if !check.check_once(ui, runner)? {
                return Err(InstallerError::BrokenEnvironment {
                    package: config.package.clone(),
                });
            }

            let artifact = compile(config, runner, ui)?;
            staged.push(ext_dir.stage(&artifact, ui)?);
        }

        write_manifest(ext_dir.path(), &staged, ui)?;
        ui.write(
            &format!(
                "Do not forget include {} and restart server.",
                EXTENSIONS_INI
            ),
            true,
        );

        Ok(CommandResult::success())
    }
}
