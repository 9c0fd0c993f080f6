//! Error types for configuration loading and option resolution

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for configuration operations
#[derive(Debug, Error)]
pub enum FmtrcError {
    /// A file pattern in an override block could not be compiled
    #[error("Invalid file pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    /// An option key outside the recognized vocabulary
    #[error("Unknown option '{key}' in {location}")]
    UnknownOption { key: String, location: String },

    /// A recognized option key with a value of the wrong type or range
    #[error("Invalid value for option '{key}' in {location}: {message}")]
    InvalidOptionValue {
        key: String,
        location: String,
        message: String,
    },

    /// Configuration loading or structural errors
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    /// File system I/O errors
    #[error("IO error for path '{path}': {source}")]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Error kind enumeration for categorizing errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Pattern,
    Option,
    Config,
    Io,
}

impl FmtrcError {
    /// Get the error kind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            FmtrcError::InvalidPattern { .. } => ErrorKind::Pattern,
            FmtrcError::UnknownOption { .. } => ErrorKind::Option,
            FmtrcError::InvalidOptionValue { .. } => ErrorKind::Option,
            FmtrcError::ConfigError { .. } => ErrorKind::Config,
            FmtrcError::IoError { .. } => ErrorKind::Io,
        }
    }

    /// Create an invalid pattern error
    pub fn invalid_pattern(pattern: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidPattern {
            pattern: pattern.into(),
            message: message.into(),
        }
    }

    /// Create an unknown option error
    pub fn unknown_option(key: impl Into<String>, location: impl Into<String>) -> Self {
        Self::UnknownOption {
            key: key.into(),
            location: location.into(),
        }
    }

    /// Create an invalid option value error
    pub fn invalid_option_value(
        key: impl Into<String>,
        location: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::InvalidOptionValue {
            key: key.into(),
            location: location.into(),
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config_error(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    /// Create an IO error with path context
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::IoError {
            path: path.into(),
            source,
        }
    }
}

/// Convert from std::io::Error
impl From<std::io::Error> for FmtrcError {
    fn from(err: std::io::Error) -> Self {
        Self::IoError {
            path: PathBuf::new(),
            source: err,
        }
    }
}
