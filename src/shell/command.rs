//! Shell command execution.
//!
//! [`CommandRunner`] is the process boundary used by remediations and the
//! compiler driver. [`ProcessRunner`] spawns a real shell and streams its
//! output to a [`Reporter`] while the command runs.

use crate::error::{InstallerError, Result};
use crate::ui::{Reporter, Tone};
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use std::process::{Command, Stdio};
use std::sync::mpsc;
use std::thread;
use std::time::Instant;

/// Output line from command execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputLine {
    Stdout(String),
    Stderr(String),
}

/// Executes command lines on behalf of the installer.
pub trait CommandRunner {
    /// Run `command_line` in `working_dir`, blocking until it exits.
    ///
    /// Stdout is streamed to `ui` as rewritable progress. Stderr is
    /// reported as error output unless `quiet` is set. Returns the exit
    /// code; a process that can not be started at all is an error.
    fn run(
        &self,
        command_line: &str,
        working_dir: &Path,
        quiet: bool,
        ui: &mut dyn Reporter,
    ) -> Result<i32>;
}

/// Runs commands through the platform shell.
#[derive(Debug, Clone, Default)]
pub struct ProcessRunner;

impl ProcessRunner {
    /// Create a new process runner.
    pub fn new() -> Self {
        Self
    }
}

impl CommandRunner for ProcessRunner {
    fn run(
        &self,
        command_line: &str,
        working_dir: &Path,
        quiet: bool,
        ui: &mut dyn Reporter,
    ) -> Result<i32> {
        let start = Instant::now();
        let banner = format!("      $ {}", ui.styled(Tone::Comment, command_line));
        ui.write(&banner, true);
        // Open an empty status line for the progress output to rewrite.
        ui.write("", false);
        tracing::debug!("running '{}' in {}", command_line, working_dir.display());

        let shell = detect_shell();
        let mut cmd = Command::new(&shell);
        cmd.arg(shell_flag());
        cmd.arg(command_line);
        cmd.current_dir(working_dir);
        cmd.stdin(Stdio::inherit());
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());

        let mut child = cmd.spawn().map_err(|e| spawn_error(command_line, e))?;

        let (Some(stdout), Some(stderr)) = (child.stdout.take(), child.stderr.take()) else {
            return Err(InstallerError::CommandSpawn {
                command: command_line.to_string(),
                message: "output pipes were not captured".to_string(),
            });
        };

        let (tx, rx) = mpsc::channel();
        let tx_stdout = tx.clone();
        let tx_stderr = tx;

        let stdout_handle =
            thread::spawn(move || forward_lines(stdout, &tx_stdout, OutputLine::Stdout));
        let stderr_handle =
            thread::spawn(move || forward_lines(stderr, &tx_stderr, OutputLine::Stderr));

        for line in rx {
            report_line(ui, line, quiet);
        }

        stdout_handle.join().ok();
        stderr_handle.join().ok();

        let status = child.wait().map_err(|e| spawn_error(command_line, e))?;
        ui.overwrite("", false);

        let code = status.code().unwrap_or(-1);
        tracing::debug!(
            "'{}' exited with {} after {:?}",
            command_line,
            code,
            start.elapsed()
        );
        Ok(code)
    }
}

/// Read `source` to EOF, sending each line through `tx`.
///
/// Bytes that are not valid UTF-8 are replaced rather than ending the read,
/// so the pipe is always drained and the child never sees a closed pipe.
fn forward_lines<R: Read>(
    source: R,
    tx: &mpsc::Sender<OutputLine>,
    wrap: fn(String) -> OutputLine,
) {
    let mut reader = BufReader::new(source);
    let mut buf = Vec::new();
    let mut receiver_open = true;
    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf) {
            Ok(0) => break,
            Ok(_) => {
                if !receiver_open {
                    continue;
                }
                if buf.last() == Some(&b'\n') {
                    buf.pop();
                    if buf.last() == Some(&b'\r') {
                        buf.pop();
                    }
                }
                let line = String::from_utf8_lossy(&buf).into_owned();
                receiver_open = tx.send(wrap(line)).is_ok();
            }
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => {
                tracing::debug!("stopped reading command output: {}", e);
                break;
            }
        }
    }
}

/// Send one line of process output to the reporter.
///
/// Carriage returns split a line into progress segments; each non-empty
/// segment replaces the current status line.
pub fn report_line(ui: &mut dyn Reporter, line: OutputLine, quiet: bool) {
    match line {
        OutputLine::Stdout(text) => {
            for segment in text.split('\r').filter(|s| !s.is_empty()) {
                ui.overwrite(segment, false);
            }
        }
        OutputLine::Stderr(text) => {
            if !quiet {
                ui.write_error(&text.replace('\r', ""));
            }
        }
    }
}

fn spawn_error(command_line: &str, e: std::io::Error) -> InstallerError {
    InstallerError::CommandSpawn {
        command: command_line.to_string(),
        message: e.to_string(),
    }
}

/// Detect the shell used to interpret command lines.
fn detect_shell() -> String {
    if cfg!(target_os = "windows") {
        std::env::var("COMSPEC").unwrap_or_else(|_| "cmd.exe".to_string())
    } else {
        "/bin/sh".to_string()
    }
}

/// Get the flag to pass commands to the shell.
fn shell_flag() -> &'static str {
    if cfg!(target_os = "windows") {
        "/C"
    } else {
        "-c"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::MockUI;
    use tempfile::TempDir;

    #[test]
    fn run_returns_zero_for_success() {
        let temp = TempDir::new().unwrap();
        let mut ui = MockUI::new();
        let code = ProcessRunner::new()
            .run("echo hello", temp.path(), false, &mut ui)
            .unwrap();
        assert_eq!(code, 0);
        assert!(ui.transcript().iter().any(|t| t == "hello"));
    }

    #[test]
    fn run_returns_exit_code_for_failure() {
        let temp = TempDir::new().unwrap();
        let mut ui = MockUI::new();
        let code = ProcessRunner::new()
            .run("exit 3", temp.path(), false, &mut ui)
            .unwrap();
        assert_eq!(code, 3);
    }

    #[test]
    fn run_announces_command() {
        let temp = TempDir::new().unwrap();
        let mut ui = MockUI::new();
        ProcessRunner::new()
            .run("exit 0", temp.path(), false, &mut ui)
            .unwrap();
        assert_eq!(ui.transcript()[0], "      $ exit 0");
    }

    #[test]
    fn stdout_lines_are_streamed_in_order() {
        let temp = TempDir::new().unwrap();
        let mut ui = MockUI::new();
        ProcessRunner::new()
            .run("echo one && echo two && echo three", temp.path(), false, &mut ui)
            .unwrap();
        let streamed: Vec<&str> = ui
            .transcript()
            .iter()
            .map(String::as_str)
            .filter(|t| ["one", "two", "three"].contains(t))
            .collect();
        assert_eq!(streamed, ["one", "two", "three"]);
    }

    #[cfg(unix)]
    #[test]
    fn invalid_utf8_output_keeps_streaming() {
        let temp = TempDir::new().unwrap();
        let mut ui = MockUI::new();
        let code = ProcessRunner::new()
            .run(
                "printf 'bad\\377\\n'; sleep 0.2; echo after; echo more; exit 0",
                temp.path(),
                false,
                &mut ui,
            )
            .unwrap();
        assert_eq!(code, 0);
        let transcript = ui.transcript();
        assert!(transcript.iter().any(|t| t == "bad\u{FFFD}"));
        assert!(transcript.iter().any(|t| t == "after"));
        assert!(transcript.iter().any(|t| t == "more"));
    }

    #[cfg(unix)]
    #[test]
    fn invalid_utf8_on_stderr_is_replaced() {
        let temp = TempDir::new().unwrap();
        let mut ui = MockUI::new();
        let code = ProcessRunner::new()
            .run(
                "printf 'warn\\377\\n' >&2; sleep 0.2; echo late >&2",
                temp.path(),
                false,
                &mut ui,
            )
            .unwrap();
        assert_eq!(code, 0);
        assert_eq!(ui.errors(), ["warn\u{FFFD}", "late"]);
    }

    #[test]
    fn progress_line_is_cleared_after_exit() {
        let temp = TempDir::new().unwrap();
        let mut ui = MockUI::new();
        ProcessRunner::new()
            .run("echo progress", temp.path(), false, &mut ui)
            .unwrap();
        assert_eq!(ui.lines().last().map(String::as_str), Some(""));
    }

    #[cfg(unix)]
    #[test]
    fn stderr_is_reported_as_error() {
        let temp = TempDir::new().unwrap();
        let mut ui = MockUI::new();
        ProcessRunner::new()
            .run("echo broken >&2", temp.path(), false, &mut ui)
            .unwrap();
        assert!(ui.has_error("broken"));
    }

    #[cfg(unix)]
    #[test]
    fn quiet_suppresses_stderr_but_keeps_exit_code() {
        let temp = TempDir::new().unwrap();
        let mut ui = MockUI::new();
        let code = ProcessRunner::new()
            .run("echo broken >&2; exit 2", temp.path(), true, &mut ui)
            .unwrap();
        assert_eq!(code, 2);
        assert!(ui.errors().is_empty());
    }

    #[test]
    fn missing_working_dir_is_spawn_error() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("does-not-exist");
        let mut ui = MockUI::new();
        let err = ProcessRunner::new()
            .run("echo hi", &missing, false, &mut ui)
            .unwrap_err();
        assert!(matches!(err, InstallerError::CommandSpawn { .. }));
    }

    #[test]
    fn carriage_returns_split_progress() {
        let mut ui = MockUI::new();
        report_line(
            &mut ui,
            OutputLine::Stdout("10%\r50%\r100%".to_string()),
            false,
        );
        assert_eq!(ui.transcript(), ["10%", "50%", "100%"]);
        assert_eq!(ui.lines(), ["100%"]);
    }

    #[test]
    fn empty_stdout_lines_are_skipped() {
        let mut ui = MockUI::new();
        report_line(&mut ui, OutputLine::Stdout(String::new()), false);
        assert!(ui.transcript().is_empty());
    }
}
