//! Non-interactive UI for Composer runs without a TTY and for CI.

use std::collections::HashMap;

use crate::error::Result;

use super::{OutputMode, Prompt, Reporter};

/// Prefix of environment variables that pre-answer prompts.
pub const PROMPT_ENV_PREFIX: &str = "ZEPHIR_INSTALLER_PROMPT_";

/// UI implementation for non-interactive mode.
///
/// Logs can not rewrite lines, so unterminated text is held back and only
/// the final version of a line is printed. In verbose mode every replaced
/// progress line is printed as well.
pub struct NonInteractiveUI {
    mode: OutputMode,
    env_overrides: HashMap<String, String>,
    pending: String,
}

impl NonInteractiveUI {
    /// Create a new non-interactive UI.
    pub fn new(mode: OutputMode) -> Self {
        let env_overrides: HashMap<String, String> = std::env::vars()
            .filter(|(k, _)| k.starts_with(PROMPT_ENV_PREFIX))
            .collect();

        Self::with_overrides(mode, env_overrides)
    }

    /// Create with explicit overrides (for testing).
    pub fn with_overrides(mode: OutputMode, overrides: HashMap<String, String>) -> Self {
        Self {
            mode,
            env_overrides: overrides,
            pending: String::new(),
        }
    }

    fn flush_pending(&mut self) {
        if !self.pending.is_empty() {
            println!("{}", self.pending);
            self.pending.clear();
        }
    }
}

impl Reporter for NonInteractiveUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn write(&mut self, text: &str, newline: bool) {
        self.pending.push_str(text);
        if newline {
            println!("{}", self.pending);
            self.pending.clear();
        }
    }

    fn overwrite(&mut self, text: &str, newline: bool) {
        if self.mode.shows_command_output() {
            self.flush_pending();
        }
        self.pending = text.to_string();
        if newline {
            println!("{}", self.pending);
            self.pending.clear();
        }
    }

    fn write_error(&mut self, text: &str) {
        eprintln!("{}", text);
    }

    fn ask(&mut self, prompt: &Prompt) -> Result<String> {
        self.flush_pending();

        let env_key = format!("{}{}", PROMPT_ENV_PREFIX, prompt.key.to_uppercase());
        if let Some(value) = self.env_overrides.get(&env_key) {
            tracing::debug!("answering '{}' from {}", prompt.key, env_key);
            return Ok(value.clone());
        }

        tracing::debug!(
            "answering '{}' with default '{}' (non-interactive)",
            prompt.key,
            prompt.default
        );
        Ok(prompt.default.clone())
    }
}

impl Drop for NonInteractiveUI {
    fn drop(&mut self) {
        self.flush_pending();
    }
}
