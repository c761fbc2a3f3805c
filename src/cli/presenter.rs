//! CLI presenter for output formatting

use std::io::{self, Write};

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};

use crate::domain::audio::AudioItem;
use crate::domain::files::StoredFile;
use crate::domain::recording::Duration;

/// Presenter for CLI output formatting
pub struct Presenter {
    spinner: Option<ProgressBar>,
}

impl Presenter {
    /// Create a new presenter
    pub fn new() -> Self {
        Self { spinner: None }
    }

    /// Start a spinner with message
    pub fn start_spinner(&mut self, message: &str) {
        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
            .template("{spinner:.cyan} {msg}")
        {
            spinner.set_style(style);
        }
        spinner.set_message(message.to_string());
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        self.spinner = Some(spinner);
    }

    /// Update spinner message
    pub fn update_spinner(&self, message: &str) {
        if let Some(ref spinner) = self.spinner {
            spinner.set_message(message.to_string());
        }
    }

    /// Mark spinner as success and finish
    pub fn spinner_success(&mut self, message: &str) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_with_message(format!("{} {}", "✓".green(), message));
        }
    }

    /// Mark spinner as failed and finish
    pub fn spinner_fail(&mut self, message: &str) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_with_message(format!("{} {}", "✗".red(), message));
        }
    }

    /// Stop spinner without status
    pub fn stop_spinner(&mut self) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }
    }

    /// Print info message to stderr
    pub fn info(&self, message: &str) {
        eprintln!("{} {}", "ℹ".cyan(), message);
    }

    /// Print success message to stderr
    pub fn success(&self, message: &str) {
        eprintln!("{} {}", "✓".green(), message);
    }

    /// Print warning message to stderr
    pub fn warn(&self, message: &str) {
        eprintln!("{} {}", "⚠".yellow(), message);
    }

    /// Print error message to stderr
    pub fn error(&self, message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Output text to stdout
    pub fn output(&self, text: &str) {
        println!("{}", text);
    }

    /// Prompt on stderr without a trailing newline
    pub fn prompt(&self, text: &str) {
        eprint!("{} ", text);
        let _ = io::stderr().flush();
    }

    /// Format a position against a total as a progress bar
    pub fn format_progress(&self, elapsed: Duration, total: Duration) -> String {
        let elapsed_ms = elapsed.as_millis();
        let total_ms = total.as_millis();
        let percent = if total_ms > 0 {
            (elapsed_ms as f64 / total_ms as f64 * 100.0).min(100.0)
        } else {
            0.0
        };

        let bar_width = 20;
        let filled = ((percent / 100.0) * bar_width as f64) as usize;
        let empty = bar_width - filled;

        format!(
            "[{}{}] {} / {}",
            "█".repeat(filled).cyan(),
            "░".repeat(empty),
            elapsed,
            total
        )
    }

    /// Update recording progress
    pub fn update_recording_progress(&self, elapsed: Duration, limit: Duration) {
        let progress = self.format_progress(elapsed, limit);
        self.update_spinner(&format!("Recording... {}", progress));
    }

    /// Update playback progress
    pub fn update_playback_progress(&self, name: &str, state: &str, elapsed: Duration, total: Duration) {
        let progress = self.format_progress(elapsed, total);
        self.update_spinner(&format!("{} [{}] {}", name, state, progress));
    }

    /// Print a key-value pair (for config list)
    pub fn key_value(&self, key: &str, value: &str) {
        println!("{}: {}", key.cyan(), value);
    }

    /// One line per clip: id, name, length, size
    pub fn audio_row(&self, item: &AudioItem) {
        println!("{}", format_audio_row(item));
    }

    /// One line per file: id, kind, name
    pub fn file_row(&self, file: &StoredFile) {
        println!("{}", format_file_row(file));
    }
}

impl Default for Presenter {
    fn default() -> Self {
        Self::new()
    }
}

fn format_audio_row(item: &AudioItem) -> String {
    format!(
        "{}  {}  {}  {}",
        item.id.dimmed(),
        item.name.bold(),
        item.length(),
        item.size
    )
}

fn format_file_row(file: &StoredFile) -> String {
    format!(
        "{}  {:<11}  {}",
        file.id.dimmed(),
        file.kind().as_str(),
        file.name.bold()
    )
}
