//! # Format Status Codes
//!
//! Every formatter reports a pair of tri-state results: one for the format
//! step and one for the validation step that follows it. The numeric codes
//! are what the CLI ultimately turns into a process exit status.

use std::fmt;

use serde::{Deserialize, Serialize};

pub const SUCCESS_RETURN_CODE: i32 = 0;
pub const ERROR_RETURN_CODE: i32 = 1;
pub const SKIP_RETURN_CODE: i32 = 2;

/// Outcome of one step of the format pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatStatus {
    Success,
    Error,
    /// The step did not run (validation suppressed, or formatting failed).
    Skip,
}

impl FormatStatus {
    pub fn code(self) -> i32 {
        match self {
            Self::Success => SUCCESS_RETURN_CODE,
            Self::Error => ERROR_RETURN_CODE,
            Self::Skip => SKIP_RETURN_CODE,
        }
    }

    pub fn is_error(self) -> bool {
        self == Self::Error
    }
}

impl fmt::Display for FormatStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Skip => "skipped",
        })
    }
}

/// The `(format, validation)` pair returned by `format_file`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatOutcome {
    pub format: FormatStatus,
    pub validation: FormatStatus,
}

impl FormatOutcome {
    pub fn new(format: FormatStatus, validation: FormatStatus) -> Self {
        Self { format, validation }
    }

    /// Numeric `(format, validation)` codes.
    pub fn codes(&self) -> (i32, i32) {
        (self.format.code(), self.validation.code())
    }

    /// True when either step failed. Skips are not failures.
    pub fn is_error(&self) -> bool {
        self.format.is_error() || self.validation.is_error()
    }
}
