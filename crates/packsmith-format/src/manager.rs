//! # Format & Validate Managers
//!
//! Entry points used by the CLI. Accept a single file or a directory
//! (walked recursively), classify every content file, and run the
//! formatter or validator for its type. Files that are not content
//! artifacts are skipped.

use std::path::{Path, PathBuf};

use packsmith_core::{Document, FileType, FormatOutcome, FormatStatus};
use packsmith_schema::SchemaRegistry;

use crate::context::FormatOptions;
use crate::error::FormatError;
use crate::formatter::Formatter;
use crate::types::validator_for;
use crate::validation::validate_document;

/// Options shared by every file of a manager run.
#[derive(Debug, Clone, Default)]
pub struct ManagerOptions {
    /// Destination file; only valid with a single input file.
    pub output: Option<PathBuf>,
    /// Directory holding `<type>.schema.json` files.
    pub schema_dir: Option<PathBuf>,
    pub from_version: Option<String>,
    pub no_validate: bool,
}

/// Result for one processed file.
#[derive(Debug, Clone)]
pub struct FileReport {
    pub path: PathBuf,
    pub file_type: FileType,
    pub outcome: FormatOutcome,
}

/// Results of a manager run.
#[derive(Debug, Clone, Default)]
pub struct ManagerReport {
    pub files: Vec<FileReport>,
    /// Inputs that were not recognized as content.
    pub skipped: Vec<PathBuf>,
}

impl ManagerReport {
    pub fn has_errors(&self) -> bool {
        self.files.iter().any(|f| f.outcome.is_error())
    }

    /// Process exit code: 1 if any file failed, else 0.
    pub fn exit_code(&self) -> u8 {
        u8::from(self.has_errors())
    }

    pub fn error_count(&self) -> usize {
        self.files.iter().filter(|f| f.outcome.is_error()).count()
    }
}

/// Format `input` (a file or a directory tree).
///
/// # Errors
///
/// Fails on unreadable inputs, unparsable content, unloadable schemas,
/// unwritable destinations, or `output` combined with a directory input.
pub fn format_manager(input: &Path, options: &ManagerOptions) -> Result<ManagerReport, FormatError> {
    if input.is_dir() && options.output.is_some() {
        return Err(FormatError::InvalidInput(
            "an output path can only be given for a single input file".to_string(),
        ));
    }

    let mut report = ManagerReport::default();
    for (path, file_type) in classify_inputs(input, &mut report.skipped)? {
        let mut file_options = FormatOptions::new(&path).no_validate(options.no_validate);
        file_options.output = options.output.clone();
        file_options.from_version = options.from_version.clone();
        file_options.schema_path = schema_path_for(options.schema_dir.as_deref(), file_type);

        let outcome = Formatter::new(file_type, &file_options)?.format_file()?;
        report.files.push(FileReport {
            path,
            file_type,
            outcome,
        });
    }

    log_summary("format", &report);
    Ok(report)
}

/// Validate `input` (a file or a directory tree) without modifying it.
///
/// # Errors
///
/// Fails on unreadable inputs, unparsable content, or unloadable schemas.
pub fn validate_manager(input: &Path, schema_dir: Option<&Path>) -> Result<ManagerReport, FormatError> {
    let registry = schema_dir.map(SchemaRegistry::new).transpose()?;
    let mut report = ManagerReport::default();
    for (path, file_type) in classify_inputs(input, &mut report.skipped)? {
        let document = Document::load(&path)?;
        let schema = registry.as_ref().and_then(|r| r.get(file_type));
        if let (Some(registry), None) = (&registry, schema) {
            tracing::warn!(
                schema = %registry.path_for(file_type).display(),
                "no schema for {file_type}, skipping structural checks"
            );
        }
        let validation = validate_document(&document, schema, validator_for(file_type), &path)?;
        report.files.push(FileReport {
            path,
            file_type,
            outcome: FormatOutcome::new(FormatStatus::Skip, validation),
        });
    }

    log_summary("validate", &report);
    Ok(report)
}

fn schema_path_for(schema_dir: Option<&Path>, file_type: FileType) -> Option<PathBuf> {
    let path = schema_dir?.join(file_type.schema_file_name());
    if path.is_file() {
        Some(path)
    } else {
        tracing::warn!(schema = %path.display(), "no schema for {file_type}, skipping structural checks");
        None
    }
}

fn classify_inputs(
    input: &Path,
    skipped: &mut Vec<PathBuf>,
) -> Result<Vec<(PathBuf, FileType)>, FormatError> {
    let paths = if input.is_dir() {
        let mut files = Vec::new();
        collect_files(input, &mut files)?;
        files.sort();
        files
    } else {
        vec![input.to_path_buf()]
    };

    let mut classified = Vec::new();
    for path in paths {
        match FileType::find_type(&path)? {
            Some(file_type) => classified.push((path, file_type)),
            None => {
                tracing::debug!(file = %path.display(), "not a content file, skipping");
                skipped.push(path);
            }
        }
    }
    Ok(classified)
}

fn collect_files(dir: &Path, files: &mut Vec<PathBuf>) -> Result<(), FormatError> {
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            collect_files(&path, files)?;
        } else {
            files.push(path);
        }
    }
    Ok(())
}

fn log_summary(command: &str, report: &ManagerReport) {
    let errors = report.error_count();
    if errors > 0 {
        tracing::error!(command, files = report.files.len(), errors, "finished with errors");
    } else {
        tracing::info!(command, files = report.files.len(), skipped = report.skipped.len(), "finished");
    }
}
