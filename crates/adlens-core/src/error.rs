//! Error types for adlens operations.
//!
//! [`AdlensError`] covers configuration, I/O and terminal failures. Errors
//! carry enough context to print an actionable message; nothing is retried
//! automatically.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using [`AdlensError`].
pub type Result<T> = std::result::Result<T, AdlensError>;

/// Error type shared by the adlens crates.
#[derive(Debug, Error)]
pub enum AdlensError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Configuration file not found
    #[error("Configuration not found at {path}")]
    ConfigNotFound {
        path: PathBuf,
        #[source]
        source: Option<std::io::Error>,
    },

    /// Configuration file is invalid YAML
    #[error("Invalid configuration at {path}: {message}")]
    ConfigInvalid { path: PathBuf, message: String },

    /// Configuration validation failed
    #[error("Configuration validation failed: {message}")]
    ConfigValidation { message: String },

    // =========================================================================
    // I/O Errors
    // =========================================================================
    /// Generic I/O error with context
    #[error("I/O error {operation}: {path}")]
    Io {
        operation: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Directory creation failed
    #[error("Failed to create directory: {path}")]
    DirectoryCreation {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // =========================================================================
    // TUI Errors
    // =========================================================================
    /// Terminal initialization failed
    #[error("Terminal initialization failed: {message}")]
    TerminalInit { message: String },

    /// Terminal restore failed
    #[error("Failed to restore terminal: {message}")]
    TerminalRestore { message: String },

    // =========================================================================
    // Internal Errors
    // =========================================================================
    /// Internal error (bug in adlens)
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl AdlensError {
    /// Create a ConfigNotFound error with source
    pub fn config_not_found_with_source(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ConfigNotFound {
            path: path.into(),
            source: Some(source),
        }
    }

    /// Create a ConfigValidation error
    pub fn config_validation(message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            message: message.into(),
        }
    }

    /// Create an I/O error
    pub fn io(operation: impl Into<String>, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            operation: operation.into(),
            path: path.into(),
            source,
        }
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Returns actionable guidance for the user
    pub fn guidance(&self) -> Option<&'static str> {
        match self {
            Self::ConfigNotFound { .. } => {
                Some("Check the --config path, or omit it to use ~/.adlens/config.yaml")
            }
            Self::ConfigInvalid { .. } => Some("Check YAML syntax in the configuration file"),
            Self::ConfigValidation { .. } => {
                Some("Fix the reported value in the configuration file")
            }
            Self::TerminalInit { .. } => Some("Try running in a different terminal, or use --print"),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_not_found_error() {
        let source = std::io::Error::from(std::io::ErrorKind::NotFound);
        let err = AdlensError::config_not_found_with_source("/home/user/.adlens/config.yaml", source);
        assert!(err.to_string().contains("Configuration not found"));
        assert!(std::error::Error::source(&err).is_some());
        assert!(err.guidance().is_some());
    }

    #[test]
    fn test_io_error_names_operation_and_path() {
        let source = std::io::Error::from(std::io::ErrorKind::PermissionDenied);
        let err = AdlensError::io("reading configuration", "/etc/adlens.yaml", source);
        assert_eq!(err.to_string(), "I/O error reading configuration: /etc/adlens.yaml");
        assert!(err.guidance().is_none());
    }

    #[test]
    fn test_error_guidance() {
        let err = AdlensError::TerminalInit {
            message: "not a tty".into(),
        };
        assert_eq!(
            err.guidance(),
            Some("Try running in a different terminal, or use --print")
        );
        assert!(AdlensError::internal("bug").guidance().is_none());
    }
}
