//! Output formatting and progress indicators
//!
//! Progress lines go to stdout like the rest of the run's narrative, the
//! spinner draws on stderr (and hides itself when stderr is not a
//! terminal), errors go to stderr.

use std::sync::OnceLock;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

static OUTPUT_CONFIG: OnceLock<OutputConfig> = OnceLock::new();

/// Process-wide output mode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutputConfig {
    /// Only print the final report
    pub quiet: bool,
    /// Print a single JSON document
    pub json: bool,
    /// Verbosity level from `-v` flags
    pub verbose: u8,
}

impl OutputConfig {
    pub fn new(quiet: bool, json: bool, verbose: u8) -> Self {
        Self { quiet, json, verbose }
    }

    /// Install as the process-wide configuration (first call wins)
    pub fn apply_global(self) {
        if OUTPUT_CONFIG.set(self).is_err() {
            tracing::debug!("Output configuration already set");
        }
    }

    /// The process-wide configuration, or the default if none was applied
    pub fn global() -> Self {
        OUTPUT_CONFIG.get().copied().unwrap_or_default()
    }

    /// Whether progress and narrative lines should be printed
    pub fn shows_progress(&self) -> bool {
        !self.quiet && !self.json
    }

    /// Tracing level implied by `-v` flags
    pub fn log_level(&self) -> tracing::Level {
        match self.verbose {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        }
    }
}

/// Print a narrative line unless output is quiet or JSON
pub fn progress(message: &str) {
    if OutputConfig::global().shows_progress() {
        println!("{message}");
    }
}

/// Create a spinner for operations with unknown duration
pub fn create_spinner(message: &str) -> ProgressBar {
    if !OutputConfig::global().shows_progress() {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner()
        .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
        .template("{spinner:.blue} {msg}")
    {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

/// Print an error and its cause chain to stderr
pub fn display_error(error: &anyhow::Error) {
    eprintln!("{} Error: {error}", status::ERROR);
    for cause in error.chain().skip(1) {
        eprintln!("  caused by: {cause}");
    }
}

/// Status message prefixes
pub mod status {
    /// Success prefix (green checkmark)
    pub const SUCCESS: &str = "✓";

    /// Error prefix (red X)
    pub const ERROR: &str = "✗";

    /// Warning prefix (yellow triangle)
    pub const WARNING: &str = "⚠";
}
