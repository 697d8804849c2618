//! # Schema Registry
//!
//! Loads every `*.schema.json` file from a schema directory and indexes it
//! by file name, so a formatter can pick the schema for its [`FileType`].

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use packsmith_core::FileType;

use crate::error::SchemaError;
use crate::schema::Schema;

/// All schemas found in one directory.
#[derive(Debug)]
pub struct SchemaRegistry {
    schema_dir: PathBuf,
    schemas: HashMap<String, Schema>,
}

impl SchemaRegistry {
    /// Load every `*.schema.json` file in `schema_dir`.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::SchemaLoad` if the directory cannot be read or
    /// any schema file cannot be parsed.
    pub fn new(schema_dir: impl AsRef<Path>) -> Result<Self, SchemaError> {
        let schema_dir = schema_dir.as_ref().to_path_buf();
        let mut schemas = HashMap::new();

        let entries = std::fs::read_dir(&schema_dir).map_err(|e| SchemaError::SchemaLoad {
            schema_name: schema_dir.display().to_string(),
            reason: format!("cannot read schema directory: {e}"),
        })?;

        for entry in entries {
            let path = entry?.path();
            if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                if name.ends_with(".schema.json") {
                    schemas.insert(name.to_string(), Schema::load(&path)?);
                }
            }
        }

        tracing::debug!(dir = %schema_dir.display(), count = schemas.len(), "loaded schemas");
        Ok(Self {
            schema_dir,
            schemas,
        })
    }

    pub fn schema_dir(&self) -> &Path {
        &self.schema_dir
    }

    pub fn schema_count(&self) -> usize {
        self.schemas.len()
    }

    /// Names of all loaded schemas, sorted alphabetically.
    pub fn schema_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.schemas.keys().map(String::as_str).collect();
        names.sort();
        names
    }

    /// Schema for a content type, if the directory ships one.
    pub fn get(&self, file_type: FileType) -> Option<&Schema> {
        self.schemas.get(&file_type.schema_file_name())
    }

    /// Path the schema for `file_type` would live at.
    pub fn path_for(&self, file_type: FileType) -> PathBuf {
        self.schema_dir.join(file_type.schema_file_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_only_schema_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("dashboard.schema.json"), r#"{"type":"object"}"#).unwrap();
        std::fs::write(dir.path().join("notes.md"), "ignored").unwrap();
        let registry = SchemaRegistry::new(dir.path()).unwrap();
        assert_eq!(registry.schema_count(), 1);
        assert!(registry.get(FileType::Dashboard).is_some());
        assert!(registry.get(FileType::Playbook).is_none());
    }

    #[test]
    fn invalid_schema_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("script.schema.json"), "{not json").unwrap();
        assert!(matches!(
            SchemaRegistry::new(dir.path()),
            Err(SchemaError::SchemaLoad { .. })
        ));
    }

    #[test]
    fn missing_directory_fails() {
        assert!(SchemaRegistry::new("/no/such/schema/dir").is_err());
    }

    #[test]
    fn path_for_uses_type_stem() {
        let dir = tempfile::tempdir().unwrap();
        let registry = SchemaRegistry::new(dir.path()).unwrap();
        assert_eq!(
            registry.path_for(FileType::IndicatorType),
            dir.path().join("reputation.schema.json")
        );
    }
}
