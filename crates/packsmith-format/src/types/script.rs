//! Scripts (YAML manifests with an inline `script` body).

use packsmith_core::{Document, FileType};
use packsmith_schema::ContentValidator;

use crate::base;
use crate::rules::Rule;
use crate::validation::{check_id_matches_name, check_version};

pub const RULES: &[Rule] = &[
    Rule {
        name: "update_yml",
        apply: base::update_yml,
    },
    Rule {
        name: "default_tests",
        apply: base::default_tests,
    },
];

#[derive(Debug, Clone, Copy)]
pub struct ScriptValidator;

impl ContentValidator for ScriptValidator {
    fn name(&self) -> &'static str {
        "script"
    }

    fn validate(&self, document: &Document) -> Vec<String> {
        let data = document.data();
        [
            check_version(FileType::Script, data),
            check_id_matches_name(FileType::Script, data),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use packsmith_core::DocumentFormat;
    use std::path::Path;

    #[test]
    fn formatted_script_is_valid() {
        let doc = Document::parse(
            "commonfields:\n  id: s\n  version: -1\nname: s\nscript: ''\ntype: python\n",
            DocumentFormat::Yaml,
            Path::new("s.yml"),
        )
        .unwrap();
        assert!(ScriptValidator.validate(&doc).is_empty());
    }

    #[test]
    fn stale_version_reported() {
        let doc = Document::parse(
            "commonfields:\n  id: s\n  version: 4\nname: s\n",
            DocumentFormat::Yaml,
            Path::new("s.yml"),
        )
        .unwrap();
        let problems = ScriptValidator.validate(&doc);
        assert_eq!(problems.len(), 1);
        assert!(problems[0].contains("found 4"));
    }
}
