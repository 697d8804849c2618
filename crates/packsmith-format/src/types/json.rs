//! JSON configuration objects: classifiers, mappers, incident and
//! indicator fields, incident types, indicator types, and layouts.

use packsmith_core::{Document, FileType};
use packsmith_schema::ContentValidator;
use serde_json::Value;

use crate::base;
use crate::context::FormatterContext;
use crate::error::RuleError;
use crate::rules::Rule;
use crate::validation::check_version;

/// Classifiers and mappers.
pub const CLASSIFIER_RULES: &[Rule] = &[
    Rule {
        name: "update_json",
        apply: base::update_json,
    },
    Rule {
        name: "set_description",
        apply: base::set_description,
    },
];

/// Incident and indicator fields.
pub const FIELD_RULES: &[Rule] = &[
    Rule {
        name: "update_json",
        apply: base::update_json,
    },
    Rule {
        name: "set_default_values",
        apply: set_default_values,
    },
    Rule {
        name: "remove_copy_and_dev_suffixes",
        apply: base::remove_copy_and_dev_suffixes,
    },
];

/// Incident types, indicator types, and layouts.
pub const BASIC_RULES: &[Rule] = &[
    Rule {
        name: "update_json",
        apply: base::update_json,
    },
    Rule {
        name: "remove_copy_and_dev_suffixes",
        apply: base::remove_copy_and_dev_suffixes,
    },
];

/// Custom fields are content-owned, not system fields, and optional.
pub fn set_default_values(ctx: &mut FormatterContext) -> Result<(), RuleError> {
    let data = ctx.data_mut();
    for (key, value) in [("content", true), ("system", false), ("required", false)] {
        data.insert(key.to_string(), Value::Bool(value));
    }
    Ok(())
}

/// Version check shared by the JSON configuration types.
#[derive(Debug, Clone, Copy)]
pub struct JsonValidator(pub FileType);

impl ContentValidator for JsonValidator {
    fn name(&self) -> &'static str {
        self.0.as_str()
    }

    fn validate(&self, document: &Document) -> Vec<String> {
        check_version(self.0, document.data()).into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::FormatOptions;
    use packsmith_core::DocumentFormat;
    use serde_json::json;
    use std::path::Path;

    fn load(file_type: FileType, body: Value) -> FormatterContext {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("item.json");
        std::fs::write(&path, body.to_string()).unwrap();
        FormatterContext::load(file_type, &FormatOptions::new(&path)).unwrap()
    }

    #[test]
    fn field_defaults_forced() {
        let mut ctx = load(
            FileType::IncidentField,
            json!({ "name": "f", "content": false, "system": true }),
        );
        set_default_values(&mut ctx).unwrap();
        assert_eq!(ctx.data()["content"], true);
        assert_eq!(ctx.data()["system"], false);
        assert_eq!(ctx.data()["required"], false);
    }

    #[test]
    fn suffixes_stripped_from_id_and_name() {
        let mut ctx = load(
            FileType::IncidentType,
            json!({ "id": "Phishing_copy", "name": "Phishing_dev" }),
        );
        base::remove_copy_and_dev_suffixes(&mut ctx).unwrap();
        assert_eq!(ctx.data()["id"], "Phishing");
        assert_eq!(ctx.data()["name"], "Phishing");
    }

    #[test]
    fn validator_checks_version_only() {
        let doc = Document::parse(
            r#"{"id": "a", "name": "b", "version": -1}"#,
            DocumentFormat::Json,
            Path::new("layout-a.json"),
        )
        .unwrap();
        assert!(JsonValidator(FileType::Layout).validate(&doc).is_empty());

        let doc = Document::parse(r#"{"version": 0}"#, DocumentFormat::Json, Path::new("x.json"))
            .unwrap();
        assert_eq!(JsonValidator(FileType::Layout).validate(&doc).len(), 1);
    }
}
