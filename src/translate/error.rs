//! Error types for the translation pipeline
//!
//! The engine itself is best-effort and never fails on malformed input;
//! the only genuine failure modes are I/O on the underlying streams and
//! loading an external rewrite-table file.

use std::fmt;
use std::io;

/// Error produced by a translation run.
#[derive(Debug)]
pub enum TranslateError {
    /// Reading the input stream or writing the output stream failed.
    Io(io::Error),
}

impl fmt::Display for TranslateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TranslateError::Io(e) => write!(f, "stream I/O failed: {}", e),
        }
    }
}

impl std::error::Error for TranslateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TranslateError::Io(e) => Some(e),
        }
    }
}

impl From<io::Error> for TranslateError {
    fn from(e: io::Error) -> Self {
        TranslateError::Io(e)
    }
}

/// Error produced while loading an external rewrite-table file.
#[derive(Debug)]
pub enum TableError {
    /// The file could not be read.
    Io(io::Error),
    /// The file was not valid JSON.
    Json(serde_json::Error),
    /// The file was not valid YAML.
    Yaml(serde_yaml::Error),
    /// The file extension did not name a supported format.
    UnknownFormat(String),
}

impl fmt::Display for TableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableError::Io(e) => write!(f, "failed to read table file: {}", e),
            TableError::Json(e) => write!(f, "invalid JSON table file: {}", e),
            TableError::Yaml(e) => write!(f, "invalid YAML table file: {}", e),
            TableError::UnknownFormat(ext) => {
                write!(f, "unknown table file format: {:?} (expected json, yaml or yml)", ext)
            }
        }
    }
}

impl std::error::Error for TableError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TableError::Io(e) => Some(e),
            TableError::Json(e) => Some(e),
            TableError::Yaml(e) => Some(e),
            TableError::UnknownFormat(_) => None,
        }
    }
}
