//! Scripted command runner for tests.
//!
//! `MockRunner` implements [`CommandRunner`] without spawning processes.
//! It records every invocation and answers with configured exit codes.
//!
//! # Example
//!
//! ```
//! use std::path::Path;
//! use zephir_installer::shell::{CommandRunner, MockRunner};
//! use zephir_installer::ui::MockUI;
//!
//! let runner = MockRunner::new().with_exit_code("zephir compile", 2);
//!
//! let mut ui = MockUI::new();
//! let code = runner.run("zephir compile", Path::new("/src"), false, &mut ui).unwrap();
//! assert_eq!(code, 2);
//! assert_eq!(runner.commands(), ["zephir compile"]);
//! ```

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::{InstallerError, Result};
use crate::ui::Reporter;

use super::command::{report_line, CommandRunner, OutputLine};

/// One recorded call to [`MockRunner::run`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub command_line: String,
    pub working_dir: PathBuf,
    pub quiet: bool,
}

/// Mock runner that records invocations and returns scripted results.
///
/// Commands are matched by exact command line. Unmatched commands exit
/// with the default code (0 unless changed).
#[derive(Debug, Default)]
pub struct MockRunner {
    default_code: i32,
    exit_codes: HashMap<String, i32>,
    spawn_failures: Vec<String>,
    output: HashMap<String, Vec<OutputLine>>,
    invocations: RefCell<Vec<Invocation>>,
}

impl MockRunner {
    /// Create a runner where every command succeeds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a runner where unmatched commands exit with `code`.
    pub fn with_default_code(code: i32) -> Self {
        Self {
            default_code: code,
            ..Default::default()
        }
    }

    /// Set the exit code for a command line.
    pub fn with_exit_code(mut self, command_line: &str, code: i32) -> Self {
        self.exit_codes.insert(command_line.to_string(), code);
        self
    }

    /// Make a command line fail to spawn.
    pub fn fail_spawn(mut self, command_line: &str) -> Self {
        self.spawn_failures.push(command_line.to_string());
        self
    }

    /// Script output lines emitted before a command exits.
    pub fn with_output(mut self, command_line: &str, lines: Vec<OutputLine>) -> Self {
        self.output.insert(command_line.to_string(), lines);
        self
    }

    /// All recorded invocations, in call order.
    pub fn invocations(&self) -> Vec<Invocation> {
        self.invocations.borrow().clone()
    }

    /// Command lines of all recorded invocations, in call order.
    pub fn commands(&self) -> Vec<String> {
        self.invocations
            .borrow()
            .iter()
            .map(|i| i.command_line.clone())
            .collect()
    }
}

impl CommandRunner for MockRunner {
    fn run(
        &self,
        command_line: &str,
        working_dir: &Path,
        quiet: bool,
        ui: &mut dyn Reporter,
    ) -> Result<i32> {
        self.invocations.borrow_mut().push(Invocation {
            command_line: command_line.to_string(),
            working_dir: working_dir.to_path_buf(),
            quiet,
        });

        if self.spawn_failures.iter().any(|c| c == command_line) {
            return Err(InstallerError::CommandSpawn {
                command: command_line.to_string(),
                message: "No such file or directory".to_string(),
            });
        }

        if let Some(lines) = self.output.get(command_line) {
            for line in lines {
                report_line(ui, line.clone(), quiet);
            }
        }

        Ok(self
            .exit_codes
            .get(command_line)
            .copied()
            .unwrap_or(self.default_code))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::MockUI;

    #[test]
    fn records_invocations() {
        let runner = MockRunner::new();
        let mut ui = MockUI::new();
        runner
            .run("apt-get install -y re2c", Path::new("/tmp"), true, &mut ui)
            .unwrap();
        assert_eq!(
            runner.invocations(),
            [Invocation {
                command_line: "apt-get install -y re2c".to_string(),
                working_dir: PathBuf::from("/tmp"),
                quiet: true,
            }]
        );
    }

    #[test]
    fn default_code_applies_to_unmatched_commands() {
        let runner = MockRunner::with_default_code(1).with_exit_code("make", 0);
        let mut ui = MockUI::new();
        assert_eq!(runner.run("make", Path::new("."), false, &mut ui).unwrap(), 0);
        assert_eq!(runner.run("gcc", Path::new("."), false, &mut ui).unwrap(), 1);
    }

    #[test]
    fn spawn_failure_is_an_error() {
        let runner = MockRunner::new().fail_spawn("zephir compile");
        let mut ui = MockUI::new();
        let err = runner
            .run("zephir compile", Path::new("."), false, &mut ui)
            .unwrap_err();
        assert!(matches!(err, InstallerError::CommandSpawn { .. }));
        assert_eq!(runner.commands(), ["zephir compile"]);
    }

    #[test]
    fn scripted_output_reaches_reporter() {
        let runner = MockRunner::new().with_output(
            "zephir compile",
            vec![
                OutputLine::Stdout("Compiling...".to_string()),
                OutputLine::Stderr("warning: unused variable".to_string()),
            ],
        );
        let mut ui = MockUI::new();
        runner
            .run("zephir compile", Path::new("."), false, &mut ui)
            .unwrap();
        assert!(ui.has_output("Compiling..."));
        assert!(ui.has_error("unused variable"));
    }
}
