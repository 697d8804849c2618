//! # Formatter Context
//!
//! Everything one format run needs: the parsed document, where it came
//! from, where it goes, and the run options. Rules receive
//! `&mut FormatterContext` and mutate `document` in place.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use packsmith_core::constants::PACKS_DIR;
use packsmith_core::{Document, FileType};
use packsmith_schema::Schema;
use serde_json::{Map, Value};

use crate::error::{FormatError, RuleError};

/// Prefix given to playbooks formatted outside a `Packs` tree.
pub const PLAYBOOK_PREFIX: &str = "playbook-";

/// Caller-supplied options for one file.
#[derive(Debug, Clone, Default)]
pub struct FormatOptions {
    pub input: PathBuf,
    /// Destination; defaults to `input`.
    pub output: Option<PathBuf>,
    /// Schema file for structural normalization and validation.
    pub schema_path: Option<PathBuf>,
    /// Minimum platform version to stamp on the document.
    pub from_version: Option<String>,
    /// Skip the validation phase.
    pub no_validate: bool,
}

impl FormatOptions {
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            ..Self::default()
        }
    }

    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = Some(output.into());
        self
    }

    pub fn with_schema(mut self, schema_path: impl Into<PathBuf>) -> Self {
        self.schema_path = Some(schema_path.into());
        self
    }

    pub fn with_from_version(mut self, from_version: impl Into<String>) -> Self {
        self.from_version = Some(from_version.into());
        self
    }

    pub fn no_validate(mut self, no_validate: bool) -> Self {
        self.no_validate = no_validate;
        self
    }
}

/// Mutable state shared by the rules of one format run.
#[derive(Debug)]
pub struct FormatterContext {
    pub file_type: FileType,
    pub source_path: PathBuf,
    pub destination_path: PathBuf,
    pub schema_path: Option<PathBuf>,
    pub schema: Option<Schema>,
    pub from_version: Option<String>,
    pub skip_validation: bool,
    pub document: Document,
}

impl FormatterContext {
    /// Parse the source file and resolve the destination.
    ///
    /// # Errors
    ///
    /// Fails if the source cannot be read or parsed, or the schema file
    /// cannot be loaded.
    pub fn load(file_type: FileType, options: &FormatOptions) -> Result<Self, FormatError> {
        let document = Document::load(&options.input)?;
        let schema = options
            .schema_path
            .as_deref()
            .map(Schema::load)
            .transpose()?;
        let destination_path = options
            .output
            .clone()
            .unwrap_or_else(|| default_destination(file_type, &options.input));

        Ok(Self {
            file_type,
            source_path: options.input.clone(),
            destination_path,
            schema_path: options.schema_path.clone(),
            schema,
            from_version: options.from_version.clone(),
            skip_validation: options.no_validate,
            document,
        })
    }

    pub fn data(&self) -> &Map<String, Value> {
        self.document.data()
    }

    pub fn data_mut(&mut self) -> &mut Map<String, Value> {
        self.document.data_mut()
    }

    /// Source path as shown in messages.
    pub fn display_path(&self) -> String {
        self.source_path.display().to_string()
    }

    pub fn missing_field(&self, field: &str) -> RuleError {
        RuleError::MissingRequiredField {
            field: field.to_string(),
            path: self.display_path(),
        }
    }

    pub fn invalid_field(&self, field: &str, expected: &'static str) -> RuleError {
        RuleError::InvalidField {
            field: field.to_string(),
            expected,
            path: self.display_path(),
        }
    }

    /// The mapping holding `id` and `version`: `commonfields` for
    /// integrations and scripts, the root for everything else.
    ///
    /// # Errors
    ///
    /// `MissingRequiredField` if an integration or script has no
    /// `commonfields` mapping.
    pub fn id_location_mut(&mut self) -> Result<&mut Map<String, Value>, RuleError> {
        if !uses_commonfields(self.file_type) {
            return Ok(self.document.data_mut());
        }
        match self.document.data_mut().get_mut(COMMONFIELDS) {
            Some(Value::Object(map)) => Ok(map),
            _ => Err(RuleError::MissingRequiredField {
                field: COMMONFIELDS.to_string(),
                path: self.source_path.display().to_string(),
            }),
        }
    }
}

const COMMONFIELDS: &str = "commonfields";

fn uses_commonfields(file_type: FileType) -> bool {
    matches!(file_type, FileType::Integration | FileType::Script)
}

/// Read-only counterpart of [`FormatterContext::id_location_mut`], used by
/// validators on a reloaded document.
pub fn id_location(file_type: FileType, data: &Map<String, Value>) -> Option<&Map<String, Value>> {
    if uses_commonfields(file_type) {
        data.get(COMMONFIELDS).and_then(Value::as_object)
    } else {
        Some(data)
    }
}

/// Playbooks outside a `Packs` tree get a `playbook-` file name prefix;
/// everything else is formatted in place.
pub fn default_destination(file_type: FileType, source: &Path) -> PathBuf {
    if file_type != FileType::Playbook {
        return source.to_path_buf();
    }
    let in_packs = source
        .components()
        .any(|c| c.as_os_str() == OsStr::new(PACKS_DIR));
    match source.file_name().and_then(OsStr::to_str) {
        Some(name) if !in_packs && !name.starts_with(PLAYBOOK_PREFIX) => {
            source.with_file_name(format!("{PLAYBOOK_PREFIX}{name}"))
        }
        _ => source.to_path_buf(),
    }
}
