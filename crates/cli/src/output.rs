//! Terminal output utilities
//!
//! Status messages go to stderr so that a tool's stdout carries nothing but
//! its report. Colours are only emitted when stderr supports them.

use droidtools_core::Error;
use owo_colors::{OwoColorize, Stream};

/// Status message helpers
pub struct Status;

impl Status {
    /// Print a success message
    pub fn success(message: &str) {
        eprintln!(
            "{} {}",
            "✓".if_supports_color(Stream::Stderr, |s| s.green()),
            message
        );
    }

    /// Print an error message
    pub fn error(message: &str) {
        eprintln!(
            "{} {}",
            "✗".if_supports_color(Stream::Stderr, |s| s.red()),
            message
        );
    }

    /// Print a warning message
    pub fn warning(message: &str) {
        eprintln!(
            "{} {}",
            "⚠".if_supports_color(Stream::Stderr, |s| s.yellow()),
            message
        );
    }

    /// Print a coded error with its context and suggestion
    pub fn failure(err: &Error) {
        eprintln!(
            "{} {}",
            "Error:".if_supports_color(Stream::Stderr, |s| s.red()),
            err
        );
    }
}

/// Format a count with singular/plural
pub fn format_count(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{} {}", count, singular)
    } else {
        format!("{} {}", count, plural)
    }
}

/// Disable colours globally (for `--no-color`)
pub fn disable_colors() {
    owo_colors::set_override(false);
}
