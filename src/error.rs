//! Unified error types for xml-reconcile.
//!
//! Per-pair problems (a missing document, a malformed document) are *not*
//! errors — they become [`Difference`](crate::diff::Difference) records so
//! the final report always lists every requested pair. The types here cover
//! the failures that genuinely stop work: an unreachable document store, a
//! bad pair file, an unwritable report.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for xml-reconcile operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ReconcileError {
    /// Errors talking to a document source
    #[error("Document source failed: {context}")]
    Source {
        context: String,
        #[source]
        source: SourceErrorKind,
    },

    /// IO errors with context
    #[error("IO error at {path:?}: {message}")]
    Io {
        path: Option<PathBuf>,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration errors
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Specific document-source error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum SourceErrorKind {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Invalid collection name: {0:?}")]
    InvalidCollection(String),

    #[error("Deadline exceeded before {operation}")]
    DeadlineExceeded { operation: String },

    #[error("Malformed pair list at line {line}: {message}")]
    MalformedPairList { line: usize, message: String },
}

/// Convenient Result type for xml-reconcile operations
pub type Result<T> = std::result::Result<T, ReconcileError>;

impl ReconcileError {
    /// Create a source error with context
    pub fn source(context: impl Into<String>, source: SourceErrorKind) -> Self {
        Self::Source {
            context: context.into(),
            source,
        }
    }

    /// Create an IO error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        let message = format!("{source}");
        Self::Io {
            path: Some(path),
            message,
            source,
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

impl From<std::io::Error> for ReconcileError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            path: None,
            message: format!("{err}"),
            source: err,
        }
    }
}

impl From<rusqlite::Error> for ReconcileError {
    fn from(err: rusqlite::Error) -> Self {
        Self::source(
            "sqlite operation",
            SourceErrorKind::Database(err.to_string()),
        )
    }
}
