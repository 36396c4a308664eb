//! Error types for record loading and validation.

use std::path::PathBuf;

use thiserror::Error;

/// Data loading errors.
#[derive(Error, Debug)]
pub enum DataError {
    /// IO error (file reading)
    #[error("IO error reading {path}: {source}")]
    Io {
        /// File that could not be read
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// A record failed validation
    #[error("invalid record #{index}: {field} {reason}")]
    InvalidRecord {
        /// Zero-based position of the record in the input array
        index: usize,
        /// Offending field
        field: &'static str,
        /// Human-readable reason
        reason: String,
    },
}

impl DataError {
    /// Create an invalid record error.
    pub fn invalid_record(index: usize, field: &'static str, reason: impl Into<String>) -> Self {
        DataError::InvalidRecord {
            index,
            field,
            reason: reason.into(),
        }
    }

    /// Create a user-friendly message for this error.
    pub fn friendly_message(&self) -> String {
        match self {
            DataError::Io { path, source } => {
                let msg = source.to_string().to_lowercase();
                if msg.contains("permission") {
                    format!("Permission denied reading {}.", path.display())
                } else if msg.contains("not found") || msg.contains("no such file") {
                    format!("Data file {} not found.", path.display())
                } else {
                    format!("Could not read {}: {}", path.display(), source)
                }
            }
            DataError::Json(e) => format!(
                "Data file is not a JSON array of records (line {}, column {}).",
                e.line(),
                e.column()
            ),
            DataError::InvalidRecord { index, field, reason } => {
                format!("Record #{} has an invalid {}: {}.", index, field, reason)
            }
        }
    }
}

/// Result type for data operations.
pub type Result<T> = std::result::Result<T, DataError>;
