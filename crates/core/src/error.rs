//! Coded errors with context and recovery suggestions
//!
//! Every failure surfaced by the tools carries:
//! - An error code for programmatic handling
//! - Optional context describing what was being done
//! - An optional recovery suggestion
//! - A serializable report form for JSON output

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use thiserror::Error;

/// Error codes for programmatic error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // General errors (1xxx)
    /// Unclassified failure
    Unknown = 1000,
    /// Bug or serialization failure inside the tools
    Internal = 1001,

    // IO errors (2xxx)
    /// Generic IO failure
    IoError = 2000,
    /// File does not exist
    FileNotFound = 2001,
    /// File exists but cannot be read
    PermissionDenied = 2002,

    // Configuration errors (3xxx)
    /// Invalid configuration value
    ConfigError = 3000,
    /// Explicit config file does not exist
    ConfigNotFound = 3001,
    /// Config file is not valid TOML for the schema
    ConfigParseError = 3002,

    // Resource document errors (4xxx)
    /// Generic resource failure
    ResourceError = 4000,
    /// Document is not a well-formed resource file
    ParseError = 4001,
    /// Entry rejected under strict reading
    MalformedEntry = 4002,

    // Process errors (5xxx)
    /// External process could not be run
    ProcessError = 5000,
    /// Executable not on PATH
    CommandNotFound = 5001,
    /// Executable exited unsuccessfully
    CommandFailed = 5002,

    // Validation errors (6xxx)
    /// Validation failure
    ValidationError = 6000,
    /// Invalid user input
    InvalidInput = 6001,
}

impl ErrorCode {
    /// Get the numeric code
    pub fn code(&self) -> u32 {
        *self as u32
    }

    /// Get a human-readable category
    pub fn category(&self) -> &'static str {
        match self.code() / 1000 {
            1 => "General",
            2 => "IO",
            3 => "Configuration",
            4 => "Resource",
            5 => "Process",
            6 => "Validation",
            _ => "Unknown",
        }
    }

    /// Process exit code a CLI should use for this error
    pub fn exit_code(&self) -> i32 {
        match self.code() / 1000 {
            3 => exit_codes::CONFIG_ERROR,
            6 => exit_codes::VALIDATION_ERROR,
            _ if *self == ErrorCode::CommandNotFound => exit_codes::COMMAND_NOT_FOUND,
            _ => exit_codes::FAILURE,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{:04}", self.code())
    }
}

/// Main error type with rich context
#[derive(Error, Debug)]
pub struct Error {
    /// Error code for programmatic handling
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Additional context
    pub context: Option<String>,
    /// Recovery suggestion
    pub suggestion: Option<String>,
    /// Source error
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(ctx) = &self.context {
            write!(f, "\n  Context: {}", ctx)?;
        }
        if let Some(suggestion) = &self.suggestion {
            write!(f, "\n  Suggestion: {}", suggestion)?;
        }
        Ok(())
    }
}

impl Error {
    /// Create a new error
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            context: None,
            suggestion: None,
            source: None,
        }
    }

    /// Add context to the error
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Add a recovery suggestion
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add a source error
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Convert to a serializable report
    pub fn to_report(&self) -> ErrorReport {
        ErrorReport {
            code: self.code,
            code_str: self.code.to_string(),
            category: self.code.category().to_string(),
            message: self.message.clone(),
            context: self.context.clone(),
            suggestion: self.suggestion.clone(),
            source: self.source.as_ref().map(|e| e.to_string()),
        }
    }

    /// Exit code a CLI should terminate with
    pub fn exit_code(&self) -> i32 {
        self.code.exit_code()
    }

    // Convenience constructors

    /// Generic IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::IoError, message)
    }

    /// Missing file at `path`
    pub fn file_not_found(path: impl AsRef<Path>) -> Self {
        Self::new(
            ErrorCode::FileNotFound,
            format!("File not found: {}", path.as_ref().display()),
        )
        .with_suggestion("Check that the file exists and you have read permissions")
    }

    /// Map a failed read of `path` to a coded error
    pub fn read_failed(path: impl AsRef<Path>, err: std::io::Error) -> Self {
        let path = path.as_ref();
        match err.kind() {
            std::io::ErrorKind::NotFound => Self::file_not_found(path).with_source(err),
            std::io::ErrorKind::PermissionDenied => Self::new(
                ErrorCode::PermissionDenied,
                format!("Permission denied: {}", path.display()),
            )
            .with_source(err),
            std::io::ErrorKind::InvalidData => Self::parse(path, err.to_string()).with_source(err),
            _ => Self::io(format!("Failed to read {}: {}", path.display(), err)).with_source(err),
        }
    }

    /// Invalid configuration
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigError, message)
    }

    /// Explicitly requested config file is missing
    pub fn config_not_found(path: impl AsRef<Path>) -> Self {
        Self::new(
            ErrorCode::ConfigNotFound,
            format!("Configuration file not found: {}", path.as_ref().display()),
        )
        .with_suggestion("Create a .droidtools.toml file or use --config to specify a path")
    }

    /// Document at `path` is not a well-formed resource file
    pub fn parse(path: impl AsRef<Path>, message: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ParseError,
            format!("Failed to parse {}: {}", path.as_ref().display(), message.into()),
        )
        .with_suggestion("Make sure the file is a well-formed <resources> document")
    }

    /// Unnamed `<string>` at byte `position` under strict reading
    pub fn malformed_entry(path: impl AsRef<Path>, position: u64) -> Self {
        Self::new(
            ErrorCode::MalformedEntry,
            format!(
                "<string> element without a name attribute in {} (byte {})",
                path.as_ref().display(),
                position
            ),
        )
        .with_suggestion("Add a name attribute or drop --strict to read it as an empty key")
    }

    /// Generic process failure
    pub fn process(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ProcessError, message)
    }

    /// `cmd` is not on PATH
    pub fn command_not_found(cmd: &str) -> Self {
        Self::new(
            ErrorCode::CommandNotFound,
            format!("Command not found: {}", cmd),
        )
        .with_suggestion(format!("Install {} and ensure it's in your PATH", cmd))
    }

    /// `cmd` exited with a non-zero status; stderr becomes the context
    pub fn command_failed(cmd: &str, exit_code: i32, stderr: &str) -> Self {
        let err = Self::new(
            ErrorCode::CommandFailed,
            format!("{} exited with status {}", cmd, exit_code),
        );
        let stderr = stderr.trim();
        if stderr.is_empty() {
            err
        } else {
            err.with_context(stderr.to_string())
        }
    }

    /// Validation failure
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationError, message)
    }
}

/// Serializable error report for logging and JSON output
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorReport {
    /// Error code
    pub code: ErrorCode,
    /// Error code as `E####`
    pub code_str: String,
    /// Error category
    pub category: String,
    /// Human-readable message
    pub message: String,
    /// Additional context
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    /// Recovery suggestion
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    /// Source error message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Exit codes for CLI commands
pub mod exit_codes {
    /// Everything succeeded
    pub const SUCCESS: i32 = 0;
    /// Generic failure
    pub const FAILURE: i32 = 1;
    /// Check ran but found problems
    pub const VALIDATION_ERROR: i32 = 2;
    /// Configuration could not be loaded
    pub const CONFIG_ERROR: i32 = 3;
    /// Required executable missing
    pub const COMMAND_NOT_FOUND: i32 = 127;
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        let code = match err.kind() {
            std::io::ErrorKind::NotFound => ErrorCode::FileNotFound,
            std::io::ErrorKind::PermissionDenied => ErrorCode::PermissionDenied,
            _ => ErrorCode::IoError,
        };
        Error::new(code, err.to_string()).with_source(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::new(ErrorCode::Internal, format!("JSON serialization error: {}", err))
            .with_source(err)
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::new(ErrorCode::ConfigParseError, format!("TOML parse error: {}", err))
            .with_source(err)
    }
}

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Attach context to the error
    fn context(self, context: impl Into<String>) -> Result<T>;
    /// Attach a recovery suggestion to the error
    fn with_suggestion(self, suggestion: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }

    fn with_suggestion(self, suggestion: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_suggestion(suggestion))
    }
}
