//! Core utilities for droidtools
//!
//! This crate provides shared functionality used across the tools:
//!
//! - **Error handling**: coded errors with context and recovery suggestions
//! - **Configuration**: TOML-based configuration with defaults
//! - **File scanning**: discovery of Android resource files
//! - **Process execution**: running external tools with captured output
//!
//! # Example
//!
//! ```rust,no_run
//! use droidtools_core::{config::Config, file_scanner::scan_translated_strings};
//! use std::path::Path;
//!
//! let config = Config::load(None).expect("invalid configuration");
//! let res_dir = Path::new(&config.schema.general.res_dir);
//! for path in scan_translated_strings(res_dir).expect("no res directory") {
//!     println!("{}", path.display());
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod file_scanner;
pub mod process;

pub use error::{Error, ErrorCode, Result, ResultExt};
