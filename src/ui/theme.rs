//! Visual theme and styling.

use console::Style;

use super::Tone;

/// Installer visual theme.
///
/// The tones mirror the `<info>`, `<comment>` and `<error>` tags Composer
/// users are used to seeing in hook output.
#[derive(Debug, Clone)]
pub struct InstallerTheme {
    /// Style for informational headings (green).
    pub info: Style,
    /// Style for names, paths and commands (yellow).
    pub comment: Style,
    /// Style for passing checks (green bold).
    pub ok: Style,
    /// Style for errors and failing checks (red bold).
    pub error: Style,
}

impl Default for InstallerTheme {
    fn default() -> Self {
        Self::new()
    }
}

impl InstallerTheme {
    /// Create the default theme.
    pub fn new() -> Self {
        Self {
            info: Style::new().green(),
            comment: Style::new().yellow(),
            ok: Style::new().green().bold(),
            error: Style::new().red().bold(),
        }
    }

    /// Create a theme without colors (for non-TTY or --no-color).
    pub fn plain() -> Self {
        Self {
            info: Style::new(),
            comment: Style::new(),
            ok: Style::new(),
            error: Style::new(),
        }
    }

    /// Apply the style for `tone` to `text`.
    pub fn apply(&self, tone: Tone, text: &str) -> String {
        let style = match tone {
            Tone::Info => &self.info,
            Tone::Comment => &self.comment,
            Tone::Ok => &self.ok,
            Tone::Error => &self.error,
        };
        style.apply_to(text).to_string()
    }
}

/// Check whether colors should be used.
///
/// Respects `NO_COLOR` and falls back to console's terminal detection.
pub fn should_use_colors() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    console::colors_enabled()
}
