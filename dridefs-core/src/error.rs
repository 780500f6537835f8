//! Typed error handling for dridefs.
//!
//! Only fatal conditions live here. Group collisions are counted by the
//! registry and never surface as an error.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for dridefs operations.
#[derive(Error, Debug)]
pub enum DridefsError {
    /// I/O error when reading sources or writing artifacts
    #[error("I/O error at {path}: {message}")]
    Io {
        path: PathBuf,
        message: String,
        #[source]
        source: Option<std::io::Error>,
    },

    /// A line contains the marker but its argument list cannot be parsed
    #[error("Malformed marker in {path}:{line}: {message} (line: `{text}`)")]
    MalformedMarker {
        path: PathBuf,
        /// Line number (1-indexed)
        line: usize,
        /// The offending source line, trimmed
        text: String,
        message: String,
    },

    /// Configuration file errors
    #[error("Config error at {path}: {message}")]
    Config { path: PathBuf, message: String },

    /// Invalid argument provided
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },
}

impl DridefsError {
    /// Create an I/O error with path context.
    pub fn io(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            message: err.to_string(),
            source: Some(err),
        }
    }

    /// Create a malformed-marker error at a specific line.
    pub fn malformed(
        path: impl Into<PathBuf>,
        line: usize,
        text: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::MalformedMarker {
            path: path.into(),
            line,
            text: text.into(),
            message: message.into(),
        }
    }

    /// Create a config error.
    pub fn config(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Config {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create an invalid-argument error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }
}

/// Convenience type alias for dridefs results.
pub type DridefsResult<T> = Result<T, DridefsError>;

/// Extension trait for converting std::io::Error with path context.
pub trait IoResultExt<T> {
    /// Add path context to an I/O error.
    fn with_path(self, path: impl Into<PathBuf>) -> DridefsResult<T>;
}

impl<T> IoResultExt<T> for std::io::Result<T> {
    fn with_path(self, path: impl Into<PathBuf>) -> DridefsResult<T> {
        self.map_err(|e| DridefsError::io(path, e))
    }
}
