//! # Error Types
//!
//! Errors raised while reading, parsing, classifying, or writing content
//! documents. Every variant carries the offending path so that a failure
//! deep inside a directory walk is still attributable.

use thiserror::Error;

/// Top-level error type for document and file-type operations.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Reading or writing a file failed.
    #[error("io error at '{path}': {source}")]
    Io {
        /// Path being read or written.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid YAML.
    #[error("invalid YAML in '{path}': {reason}")]
    Yaml {
        /// Path of the document.
        path: String,
        /// Parser message.
        reason: String,
    },

    /// The file is not valid JSON.
    #[error("invalid JSON in '{path}': {reason}")]
    Json {
        /// Path of the document.
        path: String,
        /// Parser message.
        reason: String,
    },

    /// The document parsed, but its top level is not a mapping.
    #[error("top-level of '{path}' must be a mapping, found {found}")]
    NotAMapping {
        /// Path of the document.
        path: String,
        /// Kind of value found instead.
        found: &'static str,
    },

    /// The file extension is neither YAML nor JSON.
    #[error("unsupported document extension: '{0}'")]
    UnsupportedFormat(String),

    /// The content type of a file could not be determined.
    #[error("cannot determine content type of '{0}'")]
    UnknownFileType(String),

    /// Serializing a document failed.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl CoreError {
    pub(crate) fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.display().to_string(),
            source,
        }
    }
}
