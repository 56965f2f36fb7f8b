// ABOUTME: Centralized CLI output utilities for consistent user-facing messages
// ABOUTME: Provides colored error, warning, hint and success lines plus the probe spinner

use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use std::io::IsTerminal;
use std::time::Duration;

use crate::constants::timeouts;

/// Writes status messages to stderr so stdout stays clean for results
pub struct CliOutput {
    use_color: bool,
}

impl CliOutput {
    /// Create new CLI output utility with TTY detection
    pub fn new() -> Self {
        Self {
            use_color: std::io::stderr().is_terminal(),
        }
    }

    /// Create CLI output utility with explicit color setting
    pub fn with_color(use_color: bool) -> Self {
        Self { use_color }
    }

    pub fn error(&self, message: &str) {
        eprintln!("{}", self.label("error:", message, Tone::Error));
    }

    pub fn warning(&self, message: &str) {
        eprintln!("{}", self.label("warning:", message, Tone::Warning));
    }

    /// Follow-up advice printed after an error
    pub fn hint(&self, message: &str) {
        eprintln!("{}", self.label("hint:", message, Tone::Hint));
    }

    pub fn success(&self, message: &str) {
        eprintln!("{}", self.label("success:", message, Tone::Success));
    }

    /// Spinner shown while mirrors are probed; hidden when stderr is not a terminal
    pub fn spinner(&self, message: impl Into<String>) -> ProgressBar {
        if !std::io::stderr().is_terminal() {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new_spinner();
        let template = if self.use_color {
            "{spinner:.green} {msg} ({elapsed})"
        } else {
            "{spinner} {msg} ({elapsed})"
        };
        if let Ok(style) = ProgressStyle::default_spinner().template(template) {
            pb.set_style(style);
        }
        pb.set_message(message.into());
        pb.enable_steady_tick(Duration::from_millis(timeouts::PROGRESS_BAR_TICK_MS));
        pb
    }

    fn label(&self, prefix: &str, message: &str, tone: Tone) -> String {
        if !self.use_color {
            return format!("{} {}", prefix, message);
        }

        let prefix = match tone {
            Tone::Error => prefix.red().bold().to_string(),
            Tone::Warning => prefix.yellow().bold().to_string(),
            Tone::Hint => prefix.blue().bold().to_string(),
            Tone::Success => prefix.green().bold().to_string(),
        };
        format!("{} {}", prefix, message)
    }
}

impl Default for CliOutput {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Copy)]
enum Tone {
    Error,
    Warning,
    Hint,
    Success,
}
