//! # Post-Format Validation
//!
//! Structural validation (against the type's schema, when one is known)
//! followed by the type's semantic [`ContentValidator`]. Also hosts the
//! id/version checks most validators share.

use std::path::Path;

use packsmith_core::constants::DEFAULT_VERSION;
use packsmith_core::{Document, FileType, FormatStatus};
use packsmith_schema::{ContentValidator, Schema, SchemaError, StructureValidator};
use serde_json::{Map, Value};

use crate::context::id_location;
use crate::error::FormatError;

/// Validate a saved document.
///
/// Every problem is logged at error level. Returns `Success` when both
/// phases pass and `Error` otherwise.
///
/// # Errors
///
/// Fails only if the schema itself cannot be compiled.
pub fn validate_document(
    document: &Document,
    schema: Option<&Schema>,
    validator: &dyn ContentValidator,
    path: &Path,
) -> Result<FormatStatus, FormatError> {
    let mut valid = true;

    if let Some(schema) = schema {
        let structure = StructureValidator::new(schema)?;
        match structure.validate_document(document) {
            Ok(()) => {}
            Err(SchemaError::ValidationFailed { violations, .. }) => {
                for violation in violations.violations() {
                    tracing::error!(
                        file = %path.display(),
                        schema = %schema.name(),
                        "{}",
                        violation.to_string().trim_start()
                    );
                }
                valid = false;
            }
            Err(other) => return Err(other.into()),
        }
    }

    for problem in validator.validate(document) {
        tracing::error!(file = %path.display(), validator = validator.name(), "{problem}");
        valid = false;
    }

    if valid {
        tracing::info!(file = %path.display(), "validation passed");
        Ok(FormatStatus::Success)
    } else {
        Ok(FormatStatus::Error)
    }
}

/// `version` must be the platform default.
pub fn check_version(file_type: FileType, data: &Map<String, Value>) -> Option<String> {
    let Some(location) = id_location(file_type, data) else {
        return Some("missing commonfields section".to_string());
    };
    match location.get("version").and_then(Value::as_i64) {
        Some(DEFAULT_VERSION) => None,
        Some(other) => Some(format!(
            "version must be {DEFAULT_VERSION}, found {other}"
        )),
        None => Some(format!("version must be {DEFAULT_VERSION}, found none")),
    }
}

/// `id` must equal `name`.
pub fn check_id_matches_name(file_type: FileType, data: &Map<String, Value>) -> Option<String> {
    let name = data.get("name").and_then(Value::as_str);
    let id = id_location(file_type, data)
        .and_then(|l| l.get("id"))
        .and_then(Value::as_str);
    match (id, name) {
        (Some(id), Some(name)) if id == name => None,
        (_, None) => Some("missing name".to_string()),
        (id, Some(name)) => Some(format!(
            "id '{}' does not match name '{name}'",
            id.unwrap_or_default()
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn map(v: Value) -> Map<String, Value> {
        v.as_object().cloned().unwrap()
    }

    struct Never;

    impl ContentValidator for Never {
        fn name(&self) -> &'static str {
            "never"
        }
        fn validate(&self, _document: &Document) -> Vec<String> {
            vec!["always broken".to_string()]
        }
    }

    struct Always;

    impl ContentValidator for Always {
        fn name(&self) -> &'static str {
            "always"
        }
        fn validate(&self, _document: &Document) -> Vec<String> {
            Vec::new()
        }
    }

    #[test]
    fn version_check() {
        assert!(check_version(FileType::Layout, &map(json!({ "version": -1 }))).is_none());
        assert!(check_version(FileType::Layout, &map(json!({ "version": 2 })))
            .unwrap()
            .contains("found 2"));
        assert!(check_version(FileType::Script, &map(json!({ "version": -1 }))).is_some());
        assert!(check_version(
            FileType::Script,
            &map(json!({ "commonfields": { "version": -1 } }))
        )
        .is_none());
    }

    #[test]
    fn id_name_check() {
        let ok = map(json!({ "id": "a", "name": "a" }));
        assert!(check_id_matches_name(FileType::Dashboard, &ok).is_none());
        let bad = map(json!({ "id": "b", "name": "a" }));
        assert!(check_id_matches_name(FileType::Dashboard, &bad).is_some());
        let nameless = map(json!({ "id": "b" }));
        assert_eq!(
            check_id_matches_name(FileType::Dashboard, &nameless).unwrap(),
            "missing name"
        );
    }

    #[test]
    fn semantic_problem_means_error() {
        let doc = Document::new(Map::new(), packsmith_core::DocumentFormat::Json);
        let status = validate_document(&doc, None, &Never, Path::new("x.json")).unwrap();
        assert_eq!(status, FormatStatus::Error);
        let status = validate_document(&doc, None, &Always, Path::new("x.json")).unwrap();
        assert_eq!(status, FormatStatus::Success);
    }

    #[test]
    fn structural_problem_means_error() {
        let schema = Schema::from_value("t", json!({ "type": "object", "required": ["id"] }));
        let doc = Document::new(Map::new(), packsmith_core::DocumentFormat::Json);
        let status = validate_document(&doc, Some(&schema), &Always, Path::new("x.json")).unwrap();
        assert_eq!(status, FormatStatus::Error);
    }
}
