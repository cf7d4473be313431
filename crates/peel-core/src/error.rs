//! Error types for archive extraction operations.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using `ExtractionError`.
pub type Result<T> = std::result::Result<T, ExtractionError>;

/// Errors that can occur while extracting or inspecting an archive.
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// File extension does not name a supported tar variant.
    #[error("unsupported archive format: {path}")]
    UnsupportedFormat {
        /// Path of the rejected archive.
        path: PathBuf,
    },

    /// Archive is corrupted or invalid.
    #[error("invalid archive: {0}")]
    InvalidArchive(String),

    /// Stripped entry name would be written outside the target directory.
    #[error("path traversal detected: {path}")]
    PathTraversal {
        /// The stripped entry path.
        path: PathBuf,
    },

    /// A required extraction option was not provided.
    #[error("missing extraction option: {option}")]
    MissingOption {
        /// Name of the missing option.
        option: &'static str,
    },
}

impl ExtractionError {
    /// Returns `true` if the error was caused by an entry path rather than
    /// by the archive stream or the filesystem.
    ///
    /// # Examples
    ///
    /// ```
    /// use peel_core::ExtractionError;
    /// use std::path::PathBuf;
    ///
    /// let err = ExtractionError::PathTraversal {
    ///     path: PathBuf::from("../etc/passwd"),
    /// };
    /// assert!(err.is_path_error());
    ///
    /// let err = ExtractionError::InvalidArchive("truncated header".to_string());
    /// assert!(!err.is_path_error());
    /// ```
    #[must_use]
    pub const fn is_path_error(&self) -> bool {
        matches!(self, Self::PathTraversal { .. })
    }

    /// Returns the I/O error kind when this error wraps one.
    #[must_use]
    pub fn io_kind(&self) -> Option<std::io::ErrorKind> {
        match self {
            Self::Io(err) => Some(err.kind()),
            _ => None,
        }
    }
}
