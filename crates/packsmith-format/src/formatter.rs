//! # Formatter
//!
//! Drives one file through the pipeline: rule table, schema ordering,
//! save, and validation.

use packsmith_core::{Document, FileType, FormatOutcome, FormatStatus};
use packsmith_schema::ContentValidator;

use crate::context::{FormatOptions, FormatterContext};
use crate::error::{FormatError, RuleError};
use crate::rules::Rule;
use crate::types::{rules_for, validator_for};
use crate::validation::validate_document;

/// A loaded file plus the rules and validator for its type.
pub struct Formatter {
    ctx: FormatterContext,
    rules: &'static [Rule],
    validator: &'static dyn ContentValidator,
}

impl std::fmt::Debug for Formatter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Formatter")
            .field("ctx", &self.ctx)
            .field("rules", &self.rules)
            .field("validator", &self.validator.name())
            .finish()
    }
}

impl Formatter {
    /// Load `options.input` as a `file_type` document.
    ///
    /// # Errors
    ///
    /// See [`FormatterContext::load`].
    pub fn new(file_type: FileType, options: &FormatOptions) -> Result<Self, FormatError> {
        Ok(Self {
            ctx: FormatterContext::load(file_type, options)?,
            rules: rules_for(file_type),
            validator: validator_for(file_type),
        })
    }

    pub fn context(&self) -> &FormatterContext {
        &self.ctx
    }

    pub fn context_mut(&mut self) -> &mut FormatterContext {
        &mut self.ctx
    }

    pub fn rules(&self) -> &'static [Rule] {
        self.rules
    }

    /// Run the rule table in order, then put keys into schema order.
    /// Stops at the first failing rule.
    pub fn update(&mut self) -> Result<(), RuleError> {
        for rule in self.rules {
            rule.run(&mut self.ctx)?;
        }
        if let Some(schema) = self.ctx.schema.as_ref() {
            schema.reorder(self.ctx.document.data_mut());
        }
        Ok(())
    }

    /// Write the document to its destination.
    pub fn save_to_destination(&self) -> Result<(), FormatError> {
        if self.ctx.source_path != self.ctx.destination_path {
            tracing::info!(
                from = %self.ctx.source_path.display(),
                to = %self.ctx.destination_path.display(),
                "saving formatted file"
            );
        }
        self.ctx.document.save(&self.ctx.destination_path)?;
        Ok(())
    }

    /// Update and save. A rule failure is logged and reported as
    /// `Error`; nothing is written in that case.
    ///
    /// # Errors
    ///
    /// Propagates failures to write the destination.
    pub fn run_format(&mut self) -> Result<FormatStatus, FormatError> {
        tracing::info!(
            file = %self.ctx.source_path.display(),
            file_type = %self.ctx.file_type,
            "formatting"
        );
        match self.update() {
            Ok(()) => {
                self.save_to_destination()?;
                Ok(FormatStatus::Success)
            }
            Err(e) => {
                tracing::error!("failed to update file {}: {e}", self.ctx.source_path.display());
                Ok(FormatStatus::Error)
            }
        }
    }

    /// Validate the saved destination, unless validation was suppressed.
    ///
    /// # Errors
    ///
    /// Fails if the destination cannot be re-read or the schema cannot be
    /// compiled.
    pub fn initiate_file_validator(
        &self,
        validator: &dyn ContentValidator,
    ) -> Result<FormatStatus, FormatError> {
        if self.ctx.skip_validation {
            tracing::info!(file = %self.ctx.destination_path.display(), "validation skipped");
            return Ok(FormatStatus::Skip);
        }
        let saved = Document::load(&self.ctx.destination_path)?;
        validate_document(
            &saved,
            self.ctx.schema.as_ref(),
            validator,
            &self.ctx.destination_path,
        )
    }

    /// Full pipeline. Validation is skipped when formatting failed.
    pub fn format_file(&mut self) -> Result<FormatOutcome, FormatError> {
        let format = self.run_format()?;
        if format != FormatStatus::Success {
            return Ok(FormatOutcome::new(format, FormatStatus::Skip));
        }
        let validation = self.initiate_file_validator(self.validator)?;
        Ok(FormatOutcome::new(format, validation))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::path::Path;

    fn write(dir: &Path, name: &str, body: &str) -> std::path::PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn failed_rule_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let src = write(dir.path(), "dashboard-a.json", r#"{"id": "x"}"#);
        let out = dir.path().join("out.json");
        let mut formatter = Formatter::new(
            FileType::Dashboard,
            &FormatOptions::new(&src).with_output(&out),
        )
        .unwrap();
        let outcome = formatter.format_file().unwrap();
        assert_eq!(outcome.format, FormatStatus::Error);
        assert_eq!(outcome.validation, FormatStatus::Skip);
        assert!(!out.exists());
    }

    #[test]
    fn no_validate_skips_validation() {
        let dir = tempfile::tempdir().unwrap();
        let src = write(dir.path(), "dashboard-a.json", r#"{"name": "a"}"#);
        let mut formatter = Formatter::new(
            FileType::Dashboard,
            &FormatOptions::new(&src).no_validate(true),
        )
        .unwrap();
        assert_eq!(
            formatter.format_file().unwrap(),
            FormatOutcome::new(FormatStatus::Success, FormatStatus::Skip)
        );
    }

    #[test]
    fn format_without_schema_still_validates() {
        let dir = tempfile::tempdir().unwrap();
        let src = write(dir.path(), "dashboard-a.json", r#"{"name": "a", "owner": "me"}"#);
        let mut formatter =
            Formatter::new(FileType::Dashboard, &FormatOptions::new(&src)).unwrap();
        let outcome = formatter.format_file().unwrap();
        assert_eq!(outcome.format, FormatStatus::Success);
        // `owner` survives without a schema to strip it.
        assert_eq!(outcome.validation, FormatStatus::Error);
        let saved = Document::load(&src).unwrap();
        assert_eq!(saved.get("id"), Some(&json!("a")));
        assert_eq!(saved.get("version"), Some(&json!(-1)));
    }

    #[test]
    fn missing_destination_dir_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let src = write(dir.path(), "dashboard-a.json", r#"{"name": "a"}"#);
        let mut formatter = Formatter::new(
            FileType::Dashboard,
            &FormatOptions::new(&src).with_output(dir.path().join("no/such/dir/out.json")),
        )
        .unwrap();
        assert!(matches!(formatter.format_file(), Err(FormatError::Core(_))));
    }
}
