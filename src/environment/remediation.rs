//! Corrective actions for missing build tools.
//!
//! Only two remediation strategies exist: installing a system package with
//! the first package manager found on the search paths, and printing
//! install guidance for the Zephir compiler itself.

use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::shell::CommandRunner;
use crate::ui::{confirm, Prompt, Reporter, Tone};

use super::detector::binary_in;

/// Package managers tried, in priority order.
pub const PACKAGE_MANAGERS: [&str; 4] = ["apt-get", "aptitude", "yum", "dnf"];

/// Where to send users whose Zephir compiler is missing.
pub const ZEPHIR_INSTALL_URL: &str = "https://docs.zephir-lang.com/latest/installation";

/// System package that provides `binary` under `manager`.
pub fn package_for(manager: &str, binary: &str) -> String {
    match (manager, binary) {
        ("apt-get" | "aptitude", "phpize") => "php-dev".to_string(),
        ("yum" | "dnf", "phpize") => "php-devel".to_string(),
        _ => binary.to_string(),
    }
}

/// First supported package manager present on `paths`.
pub fn find_package_manager(paths: &[PathBuf]) -> Option<&'static str> {
    PACKAGE_MANAGERS
        .iter()
        .copied()
        .find(|manager| binary_in(paths, manager))
}

/// Remediation that installs `binary` through a system package manager.
///
/// Asks for confirmation under the prompt key `install_<binary>`
/// (default yes). Exit code 0 counts as installed; a non-zero exit, a
/// process that can not start, or a declined prompt leaves the
/// requirement failed.
pub fn install_with_package_manager(
    binary: &str,
    paths: Rc<[PathBuf]>,
    privilege_prefix: &'static str,
) -> impl Fn(&mut dyn Reporter, &dyn CommandRunner) -> bool + 'static {
    let binary = binary.to_string();

    move |ui: &mut dyn Reporter, runner: &dyn CommandRunner| {
        let Some(manager) = find_package_manager(&paths) else {
            ui.write(
                &format!(
                    "    No supported package manager found ({}). Install {} manually.",
                    PACKAGE_MANAGERS.join(", "),
                    binary
                ),
                true,
            );
            return false;
        };

        let package = package_for(manager, &binary);
        let line = format!(
            "    {} can be installed from package {} using {}",
            ui.styled(Tone::Comment, &binary),
            ui.styled(Tone::Info, &package),
            manager
        );
        ui.write(&line, true);

        let prompt = Prompt::confirm(
            format!("install_{}", binary),
            format!("Install {} now?", package),
            true,
        );
        if !confirm(ui, &prompt) {
            tracing::info!("installation of {} declined", package);
            return false;
        }

        let command = format!("{}{} install -y {}", privilege_prefix, manager, package);
        let quiet = ui.output_mode().suppresses_stderr();
        match runner.run(&command, Path::new("."), quiet, ui) {
            Ok(0) => true,
            Ok(code) => {
                let message = format!("    {} exited with code {}", manager, code);
                let styled = ui.styled(Tone::Error, &message);
                ui.write_error(&styled);
                false
            }
            Err(e) => {
                tracing::warn!("{}", e);
                let styled = ui.styled(Tone::Error, &format!("    {}", e));
                ui.write_error(&styled);
                false
            }
        }
    }
}

/// Remediation that explains how to install Zephir and always fails.
pub fn zephir_guidance() -> impl Fn(&mut dyn Reporter, &dyn CommandRunner) -> bool + 'static {
    |ui: &mut dyn Reporter, _runner: &dyn CommandRunner| {
        let url = ui.styled(Tone::Info, ZEPHIR_INSTALL_URL);
        ui.write("    Zephir is not installed or not in PATH.", true);
        ui.write(&format!("    Installation instructions: {}", url), true);
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::MockRunner;
    use crate::ui::{MockUI, OutputMode};
    use std::fs;
    use tempfile::TempDir;

    fn paths_with(binaries: &[&str]) -> (TempDir, Rc<[PathBuf]>) {
        let temp = TempDir::new().unwrap();
        for binary in binaries {
            fs::write(temp.path().join(binary), "").unwrap();
        }
        let paths: Rc<[PathBuf]> = vec![temp.path().to_path_buf()].into();
        (temp, paths)
    }

    #[test]
    fn package_names_per_manager() {
        assert_eq!(package_for("apt-get", "re2c"), "re2c");
        assert_eq!(package_for("apt-get", "phpize"), "php-dev");
        assert_eq!(package_for("aptitude", "phpize"), "php-dev");
        assert_eq!(package_for("yum", "phpize"), "php-devel");
        assert_eq!(package_for("dnf", "phpize"), "php-devel");
    }

    #[test]
    fn package_manager_priority() {
        let (_temp, paths) = paths_with(&["dnf", "yum", "aptitude"]);
        assert_eq!(find_package_manager(&paths), Some("aptitude"));

        let (_temp, paths) = paths_with(&["dnf"]);
        assert_eq!(find_package_manager(&paths), Some("dnf"));

        let (_temp, paths) = paths_with(&[]);
        assert_eq!(find_package_manager(&paths), None);
    }

    #[test]
    fn installs_with_first_manager() {
        let (_temp, paths) = paths_with(&["apt-get", "yum"]);
        let remediate = install_with_package_manager("re2c", paths, "");
        let runner = MockRunner::new();
        let mut ui = MockUI::new();

        assert!(remediate(&mut ui, &runner));
        assert_eq!(runner.commands(), ["apt-get install -y re2c"]);
        assert_eq!(ui.prompts_shown(), ["install_re2c"]);
    }

    #[test]
    fn quiet_mode_is_passed_to_installer() {
        let (_temp, paths) = paths_with(&["dnf"]);
        let remediate = install_with_package_manager("re2c", paths, "");

        let runner = MockRunner::new();
        let mut ui = MockUI::with_mode(OutputMode::Quiet);
        assert!(remediate(&mut ui, &runner));
        assert!(runner.invocations()[0].quiet);

        let runner = MockRunner::new();
        let mut ui = MockUI::new();
        assert!(remediate(&mut ui, &runner));
        assert!(!runner.invocations()[0].quiet);
    }

    #[test]
    fn privilege_prefix_is_prepended() {
        let (_temp, paths) = paths_with(&["yum"]);
        let remediate = install_with_package_manager("phpize", paths, "sudo ");
        let runner = MockRunner::new();
        let mut ui = MockUI::new();

        assert!(remediate(&mut ui, &runner));
        assert_eq!(runner.commands(), ["sudo yum install -y php-devel"]);
    }

    #[test]
    fn non_zero_exit_fails() {
        let (_temp, paths) = paths_with(&["apt-get"]);
        let remediate = install_with_package_manager("re2c", paths, "");
        let runner = MockRunner::with_default_code(100);
        let mut ui = MockUI::new();

        assert!(!remediate(&mut ui, &runner));
        assert!(ui.has_error("apt-get exited with code 100"));
    }

    #[test]
    fn spawn_failure_fails_without_error() {
        let (_temp, paths) = paths_with(&["apt-get"]);
        let remediate = install_with_package_manager("re2c", paths, "");
        let runner = MockRunner::new().fail_spawn("apt-get install -y re2c");
        let mut ui = MockUI::new();

        assert!(!remediate(&mut ui, &runner));
        assert!(ui.has_error("Failed to start"));
    }

    #[test]
    fn declined_prompt_runs_nothing() {
        let (_temp, paths) = paths_with(&["apt-get"]);
        let remediate = install_with_package_manager("re2c", paths, "");
        let runner = MockRunner::new();
        let mut ui = MockUI::new();
        ui.set_prompt_response("install_re2c", "no");

        assert!(!remediate(&mut ui, &runner));
        assert!(runner.commands().is_empty());
    }

    #[test]
    fn no_package_manager_fails() {
        let (_temp, paths) = paths_with(&[]);
        let remediate = install_with_package_manager("re2c", paths, "");
        let runner = MockRunner::new();
        let mut ui = MockUI::new();

        assert!(!remediate(&mut ui, &runner));
        assert!(ui.has_output("No supported package manager found"));
        assert!(runner.commands().is_empty());
    }

    #[test]
    fn zephir_guidance_always_fails() {
        let remediate = zephir_guidance();
        let runner = MockRunner::new();
        let mut ui = MockUI::new();

        assert!(!remediate(&mut ui, &runner));
        assert!(ui.has_output(ZEPHIR_INSTALL_URL));
        assert!(runner.commands().is_empty());
    }
}
