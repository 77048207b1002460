//! Zephir compiler driver.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{InstallerError, Result};
use crate::package::ExtensionConfig;
use crate::shell::CommandRunner;
use crate::ui::{Reporter, Tone};

/// Commands run in the source directory, in order.
pub const COMPILE_COMMANDS: [&str; 2] = ["zephir fullclean", "zephir compile"];

/// File extensions of loadable PHP extensions, in lookup order.
pub const EXTENSION_SUFFIXES: [&str; 2] = ["so", "dll"];

/// Compile the extension described by `config` and return the built
/// artifact.
///
/// # Errors
///
/// Returns `CompilationFailed` when a compiler command exits non-zero and
/// `ExtensionNotFound` when no artifact was produced.
pub fn compile(
    config: &ExtensionConfig,
    runner: &dyn CommandRunner,
    ui: &mut dyn Reporter,
) -> Result<PathBuf> {
    let header = ui.styled(Tone::Info, "Compiling...");
    ui.write(&header, true);

    let source_dir = config.source_dir();
    let quiet = ui.output_mode().suppresses_stderr();
    for command in COMPILE_COMMANDS {
        let code = runner.run(command, source_dir, quiet, ui)?;
        if code != 0 {
            return Err(InstallerError::CompilationFailed {
                package: config.package.clone(),
                command: command.to_string(),
                code,
            });
        }
    }

    find_extension(&modules_dir(source_dir))
}

/// Directory the compiler leaves built modules in.
pub fn modules_dir(source_dir: &Path) -> PathBuf {
    source_dir.join("ext").join("modules")
}

/// First extension artifact directly inside `dir`.
///
/// `.so` files are preferred over `.dll` files; within a kind the
/// alphabetically first name wins.
pub fn find_extension(dir: &Path) -> Result<PathBuf> {
    let not_found = || InstallerError::ExtensionNotFound {
        dir: dir.to_path_buf(),
    };

    let mut candidates: Vec<PathBuf> = fs::read_dir(dir)
        .map_err(|_| not_found())?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file() && suffix_rank(path).is_some())
        .collect();

    candidates.sort_by(|a, b| suffix_rank(a).cmp(&suffix_rank(b)).then_with(|| a.cmp(b)));

    let artifact = candidates.into_iter().next().ok_or_else(not_found)?;
    tracing::debug!("found extension {}", artifact.display());
    Ok(artifact)
}

fn suffix_rank(path: &Path) -> Option<usize> {
    let extension = path.extension()?.to_str()?;
    EXTENSION_SUFFIXES.iter().position(|s| *s == extension)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::{MockRunner, OutputLine};
    use crate::ui::{MockUI, OutputMode};
    use tempfile::TempDir;

    fn config_in(dir: &Path) -> ExtensionConfig {
        ExtensionConfig {
            package: "acme/ext".to_string(),
            config_path: dir.join("config.json"),
        }
    }

    fn with_modules(files: &[&str]) -> TempDir {
        let temp = TempDir::new().unwrap();
        let modules = modules_dir(temp.path());
        fs::create_dir_all(&modules).unwrap();
        for file in files {
            fs::write(modules.join(file), "").unwrap();
        }
        temp
    }

    #[test]
    fn runs_fullclean_then_compile_in_source_dir() {
        let temp = with_modules(&["acme.so"]);
        let runner = MockRunner::new();
        let mut ui = MockUI::new();

        let artifact = compile(&config_in(temp.path()), &runner, &mut ui).unwrap();

        assert_eq!(artifact, modules_dir(temp.path()).join("acme.so"));
        assert_eq!(runner.commands(), COMPILE_COMMANDS);
        assert!(runner
            .invocations()
            .iter()
            .all(|i| i.working_dir == temp.path() && !i.quiet));
        assert!(ui.has_line("Compiling..."));
    }

    #[test]
    fn quiet_mode_hides_compiler_stderr() {
        let temp = with_modules(&["acme.so"]);
        let runner = MockRunner::new().with_output(
            "zephir compile",
            vec![OutputLine::Stderr("warning: noisy".to_string())],
        );
        let mut ui = MockUI::with_mode(OutputMode::Quiet);

        compile(&config_in(temp.path()), &runner, &mut ui).unwrap();

        assert!(runner.invocations().iter().all(|i| i.quiet));
        assert!(ui.errors().is_empty());
    }

    #[test]
    fn normal_mode_reports_compiler_stderr() {
        let temp = with_modules(&["acme.so"]);
        let runner = MockRunner::new().with_output(
            "zephir compile",
            vec![OutputLine::Stderr("warning: noisy".to_string())],
        );
        let mut ui = MockUI::new();

        compile(&config_in(temp.path()), &runner, &mut ui).unwrap();

        assert_eq!(ui.errors(), ["warning: noisy"]);
    }

    #[test]
    fn fullclean_failure_stops_compilation() {
        let temp = with_modules(&["acme.so"]);
        let runner = MockRunner::new().with_exit_code("zephir fullclean", 4);
        let mut ui = MockUI::new();

        let err = compile(&config_in(temp.path()), &runner, &mut ui).unwrap_err();

        assert!(matches!(
            err,
            InstallerError::CompilationFailed { code: 4, ref command, .. } if command == "zephir fullclean"
        ));
        assert_eq!(err.exit_code(), 4);
        assert_eq!(runner.commands(), ["zephir fullclean"]);
    }

    #[test]
    fn compile_failure_names_package() {
        let temp = with_modules(&[]);
        let runner = MockRunner::new().with_exit_code("zephir compile", 2);
        let mut ui = MockUI::new();

        let err = compile(&config_in(temp.path()), &runner, &mut ui).unwrap_err();
        assert!(err.to_string().contains("acme/ext"));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn spawn_failure_propagates() {
        let temp = with_modules(&[]);
        let runner = MockRunner::new().fail_spawn("zephir fullclean");
        let mut ui = MockUI::new();

        let err = compile(&config_in(temp.path()), &runner, &mut ui).unwrap_err();
        assert!(matches!(err, InstallerError::CommandSpawn { .. }));
    }

    #[test]
    fn missing_artifact_is_an_error() {
        let temp = with_modules(&["readme.txt"]);
        let runner = MockRunner::new();
        let mut ui = MockUI::new();

        let err = compile(&config_in(temp.path()), &runner, &mut ui).unwrap_err();
        assert!(matches!(err, InstallerError::ExtensionNotFound { .. }));
    }

    #[test]
    fn missing_modules_dir_is_not_found() {
        let temp = TempDir::new().unwrap();
        let err = find_extension(&modules_dir(temp.path())).unwrap_err();
        assert!(err.to_string().starts_with("Could not find extension in"));
    }

    #[test]
    fn shared_objects_win_over_dlls() {
        let temp = with_modules(&["b.dll", "z.so", "a.so"]);
        let found = find_extension(&modules_dir(temp.path())).unwrap();
        assert_eq!(found.file_name().unwrap(), "a.so");

        let temp = with_modules(&["b.dll", "a.dll"]);
        let found = find_extension(&modules_dir(temp.path())).unwrap();
        assert_eq!(found.file_name().unwrap(), "a.dll");
    }

    #[test]
    fn directories_are_not_artifacts() {
        let temp = with_modules(&[]);
        fs::create_dir(modules_dir(temp.path()).join("fake.so")).unwrap();
        assert!(find_extension(&modules_dir(temp.path())).is_err());
    }
}
