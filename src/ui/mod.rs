//! User-facing reporting.
//!
//! This module provides:
//! - [`Reporter`] trait, the sink every component writes status to
//! - [`TerminalUI`] for interactive terminal usage
//! - [`NonInteractiveUI`] for Composer runs without a TTY and for CI
//! - [`MockUI`] for tests
//!
//! # Example
//!
//! ```
//! use zephir_installer::ui::{MockUI, Reporter};
//!
//! let mut ui = MockUI::new();
//! ui.write("  - gcc: ", false);
//! ui.overwrite("  - gcc: OK", true);
//! assert_eq!(ui.lines(), ["  - gcc: OK"]);
//! ```

pub mod mock;
pub mod non_interactive;
pub mod output;
pub mod prompts;
pub mod terminal;
pub mod theme;

pub use mock::MockUI;
pub use non_interactive::NonInteractiveUI;
pub use output::OutputMode;
pub use prompts::prompt_user;
pub use terminal::{create_ui, TerminalUI};
pub use theme::{should_use_colors, InstallerTheme};

use crate::error::Result;

/// Reporting sink for status output, progress lines and prompts.
///
/// This trait allows mocking the UI in tests.
pub trait Reporter {
    /// Get the current output mode.
    fn output_mode(&self) -> OutputMode;

    /// Write text, optionally terminating the line.
    fn write(&mut self, text: &str, newline: bool);

    /// Replace the most recently written line in place.
    ///
    /// Used for progress updates so repeated status lines do not scroll.
    fn overwrite(&mut self, text: &str, newline: bool);

    /// Write an error line.
    fn write_error(&mut self, text: &str);

    /// Ask the user a question and return the answer.
    ///
    /// Implementations that can not ask return the prompt's default.
    fn ask(&mut self, prompt: &Prompt) -> Result<String>;

    /// Style `text` with a tone. Plain sinks return it unchanged.
    fn styled(&self, tone: Tone, text: &str) -> String {
        let _ = tone;
        text.to_string()
    }
}

/// Semantic text styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Info,
    Comment,
    Ok,
    Error,
}

/// A question to show to the user.
#[derive(Debug, Clone)]
pub struct Prompt {
    /// Unique key for the prompt (used for overrides and lookup).
    pub key: String,
    /// The question to display.
    pub question: String,
    /// The type of prompt.
    pub prompt_type: PromptType,
    /// Answer used when the user just presses enter or can not be asked.
    pub default: String,
}

impl Prompt {
    /// Build a yes/no confirmation prompt.
    pub fn confirm(key: impl Into<String>, question: impl Into<String>, default: bool) -> Self {
        Self {
            key: key.into(),
            question: question.into(),
            prompt_type: PromptType::Confirm,
            default: if default { "yes" } else { "no" }.to_string(),
        }
    }
}

/// The type of prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptType {
    /// Yes/no confirmation.
    Confirm,
}

/// Interpret a prompt answer as yes/no.
pub fn is_affirmative(answer: &str) -> bool {
    matches!(
        answer.trim().to_lowercase().as_str(),
        "y" | "yes" | "true" | "1"
    )
}

/// Ask a confirmation prompt, treating any prompt error as "no".
pub fn confirm(ui: &mut dyn Reporter, prompt: &Prompt) -> bool {
    match ui.ask(prompt) {
        Ok(answer) => is_affirmative(&answer),
        Err(e) => {
            tracing::warn!("prompt '{}' failed: {}", prompt.key, e);
            false
        }
    }
}
