//! Data Validator Library
//!
//! A Rust library for checking tabular survey records against a fixed set of
//! field-level rules and reporting how many rows (and which columns) failed.
//!
//! This library provides tools for:
//! - Reading delimited text files row by row, skipping blank lines
//! - Validating each row against the Age, Income and Email rules
//! - Accumulating per-column error counts into an immutable summary
//! - Reporting the summary to the console, a CSV summary file and PNG charts

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod record_source;
        pub mod reporters;
        pub mod row_validator;
        pub mod summary;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{FieldRule, RuleFailure, RuleKind, RuleOutcome, RuleSet};
pub use app::services::row_validator::{RowValidator, validate_file};
pub use app::services::summary::{SummaryAggregator, ValidationSummary};
pub use config::Config;

use std::path::{Path, PathBuf};

/// Result type alias for the data validator
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for validation runs
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Input file could not be opened or read; fatal for the run
    #[error("Error reading file '{}': {source}", path.display())]
    SourceUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Input file opened but contained no rows at all
    #[error("No data found in '{}'", path.display())]
    EmptySource { path: PathBuf },

    /// A single row could not be decoded; recovered by the pass
    #[error("Malformed row at line {line}: {message}")]
    RowMalformed { line: u64, message: String },

    /// The delimited summary file could not be written
    #[error("Error writing summary CSV '{}': {message}", path.display())]
    SummaryWriteFailed { path: PathBuf, message: String },

    /// A chart image could not be rendered or saved
    #[error("Error saving chart '{}': {message}", path.display())]
    ChartWriteFailed { path: PathBuf, message: String },

    /// A rule failure was recorded for a rule that was never registered
    #[error("Rule '{rule}' is not registered with the summary")]
    UnregisteredRule { rule: String },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Create a source-unreadable error for the given input path
    pub fn source_unreadable(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::SourceUnreadable {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Create an empty-source error
    pub fn empty_source(path: impl AsRef<Path>) -> Self {
        Self::EmptySource {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Create a malformed-row error
    pub fn row_malformed(line: u64, message: impl Into<String>) -> Self {
        Self::RowMalformed {
            line,
            message: message.into(),
        }
    }

    /// Create a summary write error
    pub fn summary_write_failed(path: impl AsRef<Path>, message: impl Into<String>) -> Self {
        Self::SummaryWriteFailed {
            path: path.as_ref().to_path_buf(),
            message: message.into(),
        }
    }

    /// Create a chart write error
    pub fn chart_write_failed(path: impl AsRef<Path>, message: impl Into<String>) -> Self {
        Self::ChartWriteFailed {
            path: path.as_ref().to_path_buf(),
            message: message.into(),
        }
    }

    /// Create an unregistered rule error
    pub fn unregistered_rule(rule: impl Into<String>) -> Self {
        Self::UnregisteredRule { rule: rule.into() }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Whether this error ends the run (as opposed to a per-row or per-output failure)
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::SourceUnreadable { .. }
                | Self::EmptySource { .. }
                | Self::Configuration { .. }
                | Self::Io { .. }
                | Self::UnregisteredRule { .. }
        )
    }
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}
