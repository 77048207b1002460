//! Output mode.

/// Output verbosity mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Show all output, including every line streamed by commands.
    Verbose,
    /// Show progress and status only.
    #[default]
    Normal,
    /// Show status, but suppress stderr from external commands.
    Quiet,
}

impl OutputMode {
    /// Check if this mode keeps every streamed command line.
    pub fn shows_command_output(&self) -> bool {
        matches!(self, Self::Verbose)
    }

    /// Check if stderr of external commands should be hidden.
    pub fn suppresses_stderr(&self) -> bool {
        matches!(self, Self::Quiet)
    }
}
