//! Check command implementation.
//!
//! The `zephir-installer check` command runs the toolchain check without
//! compiling anything.

use crate::environment::EnvironmentCheck;
use crate::error::Result;
use crate::shell::CommandRunner;
use crate::ui::{Reporter, Tone};

use super::dispatcher::{Command, CommandContext, CommandResult};

/// The check command implementation.
pub struct CheckCommand {
    context: CommandContext,
}

impl CheckCommand {
    /// Create a new check command.
    pub fn new(context: CommandContext) -> Self {
        Self { context }
    }
}

impl Command for CheckCommand {
    fn execute(&self, ui: &mut dyn Reporter, runner: &dyn CommandRunner) -> Result<CommandResult> {
        let mut check = EnvironmentCheck::for_host(&self.context.os, self.context.env.clone());

        if check.check_once(ui, runner)? {
            return Ok(CommandResult::success());
        }

        let missing: Vec<&str> = check
            .report()
            .map(|report| report.failures().map(|r| r.name.as_str()).collect())
            .unwrap_or_default();
        let message = format!("Missing requirements: {}", missing.join(", "));
        let styled = ui.styled(Tone::Error, &message);
        ui.write_error(&styled);

        Ok(CommandResult::failure(1))
    }
}
