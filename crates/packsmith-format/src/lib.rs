//! # packsmith-format: Content Formatters
//!
//! Rewrites content files so they follow platform conventions, then
//! optionally validates the result.
//!
//! ## Pipeline
//!
//! 1. [`FormatterContext::load`] parses the source file.
//! 2. The type's rule table runs in order. The first rule is always the
//!    generic base pass (`update_yml` / `update_json`), which applies the
//!    schema normalization and id/version conventions.
//! 3. Keys are put into schema order.
//! 4. The document is written to the destination.
//! 5. Unless suppressed, the destination is validated structurally and by
//!    the type's [`ContentValidator`](packsmith_schema::ContentValidator).
//!
//! A [`RuleError`] (an expected failure such as a dashboard without a
//! `name`) stops the pipeline before anything is written and is reported as
//! [`FormatStatus::Error`](packsmith_core::FormatStatus). I/O, parse, and
//! schema-load failures propagate as [`FormatError`].
//!
//! ## Rule Tables
//!
//! Each content type is a [`FileType`](packsmith_core::FileType) plus an
//! ordered `&'static [Rule]`. Rules are plain functions over the context;
//! adding a content type means adding a table, not a subclass.

pub mod base;
pub mod context;
pub mod error;
pub mod formatter;
pub mod manager;
pub mod rules;
pub mod types;
pub mod validation;

pub use context::{FormatOptions, FormatterContext};
pub use error::{FormatError, RuleError};
pub use formatter::Formatter;
pub use manager::{format_manager, validate_manager, FileReport, ManagerOptions, ManagerReport};
pub use rules::Rule;
