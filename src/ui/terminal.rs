//! Interactive terminal UI.

use console::Term;
use std::io::Write;

use crate::error::Result;

use super::{
    prompt_user, should_use_colors, InstallerTheme, NonInteractiveUI, OutputMode, Prompt,
    Reporter, Tone,
};

/// Interactive terminal UI implementation.
///
/// Tracks whether the cursor sits on an unterminated line so `overwrite`
/// can rewrite it in place, or clear the previous line when it was closed.
/// Error lines go to stderr.
pub struct TerminalUI {
    term: Term,
    err: Term,
    theme: InstallerTheme,
    mode: OutputMode,
    line_open: bool,
    has_output: bool,
}

impl TerminalUI {
    /// Create a new terminal UI.
    pub fn new(mode: OutputMode) -> Self {
        let theme = if should_use_colors() {
            InstallerTheme::new()
        } else {
            InstallerTheme::plain()
        };

        Self {
            term: Term::stdout(),
            err: Term::stderr(),
            theme,
            mode,
            line_open: false,
            has_output: false,
        }
    }

    fn emit(&mut self, text: &str, newline: bool) {
        if newline {
            writeln!(self.term, "{}", text).ok();
        } else {
            write!(self.term, "{}", text).ok();
            self.term.flush().ok();
        }
        self.line_open = !newline;
        self.has_output = true;
    }

    fn close_line(&mut self) {
        if self.line_open {
            writeln!(self.term).ok();
            self.line_open = false;
        }
    }
}

impl Reporter for TerminalUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn write(&mut self, text: &str, newline: bool) {
        self.emit(text, newline);
    }

    fn overwrite(&mut self, text: &str, newline: bool) {
        if self.mode.shows_command_output() && self.line_open {
            // Keep the previous progress line instead of erasing it.
            self.close_line();
        } else if self.line_open {
            self.term.clear_line().ok();
        } else if self.has_output {
            self.term.clear_last_lines(1).ok();
        }
        self.emit(text, newline);
    }

    fn write_error(&mut self, text: &str) {
        self.close_line();
        writeln!(self.err, "{}", self.theme.apply(Tone::Error, text)).ok();
        // Stdout and stderr share the screen; the next status line starts fresh.
        self.has_output = false;
    }

    fn ask(&mut self, prompt: &Prompt) -> Result<String> {
        self.close_line();
        prompt_user(prompt, &self.term)
    }

    fn styled(&self, tone: Tone, text: &str) -> String {
        self.theme.apply(tone, text)
    }
}

/// Create the appropriate UI based on context.
pub fn create_ui(interactive: bool, mode: OutputMode) -> Box<dyn Reporter> {
    if interactive && Term::stdout().is_term() {
        Box::new(TerminalUI::new(mode))
    } else {
        Box::new(NonInteractiveUI::new(mode))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_ui_output_mode() {
        let ui = TerminalUI::new(OutputMode::Quiet);
        assert_eq!(ui.output_mode(), OutputMode::Quiet);
    }

    #[test]
    fn errors_go_to_stderr() {
        let mut ui = TerminalUI::new(OutputMode::Normal);
        ui.write("  - gcc: ", false);
        ui.write_error("broken");
        assert!(!ui.line_open);
        assert!(!ui.has_output);
        assert!(matches!(ui.err.target(), console::TermTarget::Stderr));
    }

    #[test]
    fn create_ui_respects_mode() {
        let ui = create_ui(false, OutputMode::Quiet);
        assert_eq!(ui.output_mode(), OutputMode::Quiet);
    }
}
