//! Mock UI implementation for testing.
//!
//! `MockUI` implements the `Reporter` trait and captures all interactions
//! for later assertion. It simulates a terminal screen so tests can check
//! both the final visible lines and the full transcript of writes.
//!
//! # Example
//!
//! ```
//! use zephir_installer::ui::{MockUI, Prompt, Reporter};
//!
//! let mut ui = MockUI::new();
//! ui.set_prompt_response("install_re2c", "yes");
//!
//! ui.write("Checking Linux environment...", true);
//! ui.write("  - re2c: ", false);
//! ui.overwrite("  - re2c: Fail", true);
//! let answer = ui.ask(&Prompt::confirm("install_re2c", "Install?", false)).unwrap();
//!
//! assert_eq!(answer, "yes");
//! assert!(ui.has_line("  - re2c: Fail"));
//! ```

use std::collections::{HashMap, VecDeque};

use crate::error::Result;

use super::{OutputMode, Prompt, Reporter};

/// Mock UI implementation for testing.
///
/// Captures all UI interactions and allows pre-configured prompt responses.
/// Supports both single responses (via `set_prompt_response`) and queued
/// responses (via `queue_prompt_responses`) for keys asked multiple times.
#[derive(Debug, Default)]
pub struct MockUI {
    mode: OutputMode,
    lines: Vec<String>,
    line_open: bool,
    transcript: Vec<String>,
    errors: Vec<String>,
    prompt_responses: HashMap<String, String>,
    prompt_queues: HashMap<String, VecDeque<String>>,
    prompts_shown: Vec<String>,
}

impl MockUI {
    /// Create a new MockUI with Normal output mode.
    pub fn new() -> Self {
        Self {
            mode: OutputMode::Normal,
            ..Default::default()
        }
    }

    /// Create a new MockUI with a specific output mode.
    pub fn with_mode(mode: OutputMode) -> Self {
        Self {
            mode,
            ..Default::default()
        }
    }

    /// Set a response for a prompt key.
    pub fn set_prompt_response(&mut self, key: &str, response: &str) {
        self.prompt_responses
            .insert(key.to_string(), response.to_string());
    }

    /// Queue multiple responses for the same prompt key.
    ///
    /// Responses are returned in order. After the queue is exhausted,
    /// falls back to `set_prompt_response` or the prompt default.
    pub fn queue_prompt_responses(&mut self, key: &str, responses: Vec<&str>) {
        let queue = responses.into_iter().map(|s| s.to_string()).collect();
        self.prompt_queues.insert(key.to_string(), queue);
    }

    /// Lines currently visible on the simulated screen.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Every text passed to `write` or `overwrite`, in call order.
    pub fn transcript(&self) -> &[String] {
        &self.transcript
    }

    /// Get all captured error lines.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Get all prompts that were shown (by key).
    pub fn prompts_shown(&self) -> &[String] {
        &self.prompts_shown
    }

    /// Check if a visible line equals `line`.
    pub fn has_line(&self, line: &str) -> bool {
        self.lines.iter().any(|l| l == line)
    }

    /// Check if any visible line contains `text`.
    pub fn has_output(&self, text: &str) -> bool {
        self.lines.iter().any(|l| l.contains(text))
    }

    /// Check if any error line contains `text`.
    pub fn has_error(&self, text: &str) -> bool {
        self.errors.iter().any(|l| l.contains(text))
    }

    /// Clear all captured interactions.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.line_open = false;
        self.transcript.clear();
        self.errors.clear();
        self.prompts_shown.clear();
    }
}

impl Reporter for MockUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn write(&mut self, text: &str, newline: bool) {
        self.transcript.push(text.to_string());
        match self.lines.last_mut() {
            Some(last) if self.line_open => last.push_str(text),
            _ => self.lines.push(text.to_string()),
        }
        self.line_open = !newline;
    }

    fn overwrite(&mut self, text: &str, newline: bool) {
        self.transcript.push(text.to_string());
        match self.lines.last_mut() {
            Some(last) => *last = text.to_string(),
            None => self.lines.push(text.to_string()),
        }
        self.line_open = !newline;
    }

    fn write_error(&mut self, text: &str) {
        self.errors.push(text.to_string());
    }

    fn ask(&mut self, prompt: &Prompt) -> Result<String> {
        self.prompts_shown.push(prompt.key.clone());

        if let Some(queue) = self.prompt_queues.get_mut(&prompt.key) {
            if let Some(response) = queue.pop_front() {
                return Ok(response);
            }
        }

        if let Some(response) = self.prompt_responses.get(&prompt.key) {
            return Ok(response.clone());
        }

        Ok(prompt.default.clone())
    }
}
