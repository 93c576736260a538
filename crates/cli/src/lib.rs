//! CLI utilities for droidtools
//!
//! Provides shared CLI functionality:
//! - Status messages on stderr
//! - Progress spinners

#![warn(missing_docs)]

pub mod output;
pub mod progress;
