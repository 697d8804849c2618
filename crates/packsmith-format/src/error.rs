//! # Formatter Errors
//!
//! Two tiers. [`RuleError`] is an expected, content-level failure that the
//! pipeline downgrades to a status code. [`FormatError`] is everything
//! else (unreadable files, malformed markup, broken schemas) and propagates
//! to the caller.

use packsmith_core::CoreError;
use packsmith_schema::SchemaError;
use thiserror::Error;

/// A normalization rule could not be applied to the document.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuleError {
    /// A field the rule depends on is absent.
    #[error("missing \"{field}\" field in file {path} - add this field manually")]
    MissingRequiredField {
        /// Field name.
        field: String,
        /// Source file.
        path: String,
    },

    /// A field has the wrong shape for the rule to work on it.
    #[error("field \"{field}\" in file {path} must be {expected}")]
    InvalidField {
        /// Field name.
        field: String,
        /// Expected shape, e.g. "a list".
        expected: &'static str,
        /// Source file.
        path: String,
    },
}

/// Unexpected failure of a format or validate run.
#[derive(Error, Debug)]
pub enum FormatError {
    /// Reading, parsing, or writing a document failed.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A schema could not be loaded or compiled.
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// Walking an input directory failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The requested input/output combination is not supported.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}
