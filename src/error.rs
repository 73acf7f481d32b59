//! Error types for chatgpt-usage.
//!
//! Errors follow the thiserror pattern. Each variant carries enough context
//! to be shown to the user directly, and maps onto a process exit code.

use std::path::PathBuf;

use chrono::NaiveDate;
use thiserror::Error;

/// Primary error type for chatgpt-usage operations.
#[derive(Error, Debug)]
pub enum UsageError {
    /// None of the candidate input paths exist.
    #[error("Conversation export not found. Looked in: {}", display_paths(.candidates))]
    MissingInputFile {
        /// Paths that were searched, in order.
        candidates: Vec<PathBuf>,
    },

    /// No message carries a usable timestamp at or after the cutoff.
    #[error("No messages found on or after {cutoff}")]
    EmptyDataset {
        /// Cutoff date that was applied.
        cutoff: NaiveDate,
    },

    /// The export document could not be decoded.
    #[error("Failed to parse {path}: {message}")]
    ParseError {
        /// File being parsed.
        path: PathBuf,
        /// Human-readable error message.
        message: String,
        /// Underlying serde_json error, if available.
        #[source]
        source: Option<serde_json::Error>,
    },

    /// I/O error.
    #[error("I/O error: {context}")]
    IoError {
        /// Context describing the operation that failed.
        context: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Serialization error.
    #[error("Serialization error: {context}")]
    SerializationError {
        /// Context describing the operation that failed.
        context: String,
        /// Underlying serde_json error.
        #[source]
        source: serde_json::Error,
    },

    /// Invalid argument.
    #[error("Invalid argument '{name}': {reason}")]
    InvalidArgument {
        /// Name of the invalid argument.
        name: String,
        /// Reason why the argument is invalid.
        reason: String,
    },

    /// Invalid configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Human-readable error message.
        message: String,
    },

    /// Neither the requested nor the fallback encoding could be loaded.
    #[error("Tokenizer unavailable for model '{model}': {message}")]
    TokenizerError {
        /// Model identifier that was requested.
        model: String,
        /// Human-readable error message.
        message: String,
    },

    /// Chart rendering failed.
    #[error("Chart rendering failed: {message}")]
    RenderError {
        /// Human-readable error message.
        message: String,
    },

    /// The rendered artifact could not be opened.
    #[error("Could not open {path}: {message}")]
    ViewerError {
        /// Artifact path.
        path: PathBuf,
        /// Human-readable error message.
        message: String,
    },
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

impl UsageError {
    /// Create a new I/O error with context.
    #[must_use]
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::IoError {
            context: context.into(),
            source,
        }
    }

    /// Create a new render error.
    #[must_use]
    pub fn render(message: impl Into<String>) -> Self {
        Self::RenderError {
            message: message.into(),
        }
    }

    /// Create a new invalid argument error.
    #[must_use]
    pub fn invalid_argument(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Get the process exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::ParseError { .. } => exit_codes::EXIT_PARSE_ERROR,
            Self::MissingInputFile { .. } => exit_codes::EXIT_FILE_NOT_FOUND,
            Self::InvalidConfig { .. } => exit_codes::EXIT_CONFIG_ERROR,
            Self::InvalidArgument { .. } => exit_codes::EXIT_USAGE_ERROR,
            Self::EmptyDataset { .. } => exit_codes::EXIT_DATA_ERROR,
            Self::IoError { .. } => exit_codes::EXIT_IO_ERROR,
            _ => exit_codes::EXIT_GENERAL_ERROR,
        }
    }
}

/// Result type alias for chatgpt-usage operations.
pub type Result<T> = std::result::Result<T, UsageError>;

impl From<std::io::Error> for UsageError {
    fn from(err: std::io::Error) -> Self {
        Self::IoError {
            context: "I/O operation failed".to_string(),
            source: err,
        }
    }
}

impl From<serde_json::Error> for UsageError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError {
            context: "JSON operation failed".to_string(),
            source: err,
        }
    }
}

/// Exit codes for CLI operations.
pub mod exit_codes {
    /// General/unspecified error.
    pub const EXIT_GENERAL_ERROR: i32 = 1;
    /// Export document could not be parsed.
    pub const EXIT_PARSE_ERROR: i32 = 2;
    /// No export document found.
    pub const EXIT_FILE_NOT_FOUND: i32 = 3;
    /// Invalid configuration.
    pub const EXIT_CONFIG_ERROR: i32 = 5;
    /// Invalid command-line usage (BSD standard).
    pub const EXIT_USAGE_ERROR: i32 = 64;
    /// Input data format error (BSD standard).
    pub const EXIT_DATA_ERROR: i32 = 65;
    /// I/O error (BSD standard).
    pub const EXIT_IO_ERROR: i32 = 74;
}
