//! Dashboards (`dashboard-*.json`).

use packsmith_core::{Document, FileType};
use packsmith_schema::ContentValidator;
use serde_json::Value;

use crate::base::{self, is_truthy};
use crate::context::FormatterContext;
use crate::error::RuleError;
use crate::rules::Rule;
use crate::validation::{check_id_matches_name, check_version};

pub const RULES: &[Rule] = &[
    Rule {
        name: "update_json",
        apply: base::update_json,
    },
    Rule {
        name: "default_description",
        apply: default_description,
    },
    Rule {
        name: "update_id",
        apply: update_id,
    },
];

/// Fields the platform manages itself; they must not be committed.
pub const FORBIDDEN_FIELDS: &[&str] = &[
    "system",
    "isCommon",
    "shared",
    "owner",
    "sortValues",
    "vcShouldIgnore",
    "commitMessage",
    "shouldCommit",
];

/// Empty description when unset; unset `isPredefined` becomes `true`.
pub fn default_description(ctx: &mut FormatterContext) -> Result<(), RuleError> {
    let data = ctx.data_mut();
    if !is_truthy(data.get("description")) {
        data.insert("description".to_string(), Value::String(String::new()));
    }
    if !is_truthy(data.get("isPredefined")) {
        data.insert("isPredefined".to_string(), Value::Bool(true));
    }
    Ok(())
}

/// `id` := `name`; a dashboard without a name cannot be formatted.
pub fn update_id(ctx: &mut FormatterContext) -> Result<(), RuleError> {
    let name = match ctx.data().get("name").and_then(Value::as_str) {
        Some(name) => name.to_string(),
        None => return Err(ctx.missing_field("name")),
    };
    ctx.data_mut().insert("id".to_string(), Value::String(name));
    Ok(())
}

#[derive(Debug, Clone, Copy)]
pub struct DashboardValidator;

impl ContentValidator for DashboardValidator {
    fn name(&self) -> &'static str {
        "dashboard"
    }

    fn validate(&self, document: &Document) -> Vec<String> {
        let data = document.data();
        let mut problems: Vec<String> = [
            check_version(FileType::Dashboard, data),
            check_id_matches_name(FileType::Dashboard, data),
        ]
        .into_iter()
        .flatten()
        .collect();
        for field in FORBIDDEN_FIELDS {
            if data.contains_key(*field) {
                problems.push(format!("field '{field}' must not be present"));
            }
        }
        problems
    }
}
