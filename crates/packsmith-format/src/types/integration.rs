//! Integrations (YAML manifests with `configuration` and `script`).

use packsmith_core::{Document, FileType};
use packsmith_schema::ContentValidator;
use serde_json::{json, Map, Value};

use crate::base;
use crate::context::FormatterContext;
use crate::error::RuleError;
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
    Rule {
        name: "update_proxy_insecure_param_to_default",
        apply: update_proxy_insecure_param_to_default,
    },
    Rule {
        name: "set_reputation_commands_basic_argument_as_needed",
        apply: set_reputation_commands_basic_argument_as_needed,
    },
    Rule {
        name: "remove_deprecated_fields",
        apply: remove_deprecated_fields,
    },
];

pub const INSECURE_DISPLAY: &str = "Trust any certificate (not secure)";
pub const PROXY_DISPLAY: &str = "Use system proxy settings";

/// Parameter type code for a checkbox.
pub const BOOLEAN_PARAM_TYPE: i64 = 8;

/// Canonical display text for the connection parameters every
/// integration shares.
const CONNECTION_PARAMS: &[(&str, &str)] = &[
    ("insecure", INSECURE_DISPLAY),
    ("unsecure", INSECURE_DISPLAY),
    ("proxy", PROXY_DISPLAY),
];

/// Reputation ("bang") commands whose same-named argument is the lookup
/// value.
pub const BANG_COMMAND_NAMES: &[&str] = &["file", "email", "domain", "url", "ip", "cve", "endpoint"];

const DEPRECATED_FIELDS: &[&str] = &["sourcemoduleid"];

fn connection_display(param_name: &str) -> Option<&'static str> {
    CONNECTION_PARAMS
        .iter()
        .find(|(name, _)| *name == param_name)
        .map(|(_, display)| *display)
}

/// Give the `insecure`/`unsecure`/`proxy` parameters their standard
/// display text, checkbox type, and `required: false`.
pub fn update_proxy_insecure_param_to_default(ctx: &mut FormatterContext) -> Result<(), RuleError> {
    match ctx.data().get("configuration") {
        None | Some(Value::Array(_)) => {}
        Some(_) => return Err(ctx.invalid_field("configuration", "a list")),
    }
    let Some(params) = ctx
        .data_mut()
        .get_mut("configuration")
        .and_then(Value::as_array_mut)
    else {
        return Ok(());
    };
    for param in params.iter_mut().filter_map(Value::as_object_mut) {
        let Some(display) = param
            .get("name")
            .and_then(Value::as_str)
            .and_then(connection_display)
        else {
            continue;
        };
        param.insert("display".to_string(), json!(display));
        param.insert("type".to_string(), json!(BOOLEAN_PARAM_TYPE));
        param.insert("required".to_string(), json!(false));
    }
    Ok(())
}

/// For reputation commands, mark the argument named after the command as
/// the default, array-valued, required input.
pub fn set_reputation_commands_basic_argument_as_needed(
    ctx: &mut FormatterContext,
) -> Result<(), RuleError> {
    let Some(commands) = ctx
        .data_mut()
        .get_mut("script")
        .and_then(Value::as_object_mut)
        .and_then(|script| script.get_mut("commands"))
        .and_then(Value::as_array_mut)
    else {
        return Ok(());
    };
    for command in commands.iter_mut().filter_map(Value::as_object_mut) {
        let Some(name) = command.get("name").and_then(Value::as_str).map(str::to_string) else {
            continue;
        };
        if !BANG_COMMAND_NAMES.contains(&name.as_str()) {
            continue;
        }
        let Some(arguments) = command.get_mut("arguments").and_then(Value::as_array_mut) else {
            continue;
        };
        for argument in arguments.iter_mut().filter_map(Value::as_object_mut) {
            if argument.get("name").and_then(Value::as_str) == Some(name.as_str()) {
                argument.insert("default".to_string(), json!(true));
                argument.insert("isArray".to_string(), json!(true));
                argument.insert("required".to_string(), json!(true));
            }
        }
    }
    Ok(())
}

pub fn remove_deprecated_fields(ctx: &mut FormatterContext) -> Result<(), RuleError> {
    ctx.data_mut()
        .retain(|key, _| !DEPRECATED_FIELDS.contains(&key.as_str()));
    Ok(())
}

#[derive(Debug, Clone, Copy)]
pub struct IntegrationValidator;

impl IntegrationValidator {
    fn connection_param_problems(data: &Map<String, Value>) -> Vec<String> {
        let params = data
            .get("configuration")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default();
        let mut problems = Vec::new();
        for param in params {
            let Some(name) = param.get("name").and_then(Value::as_str) else {
                continue;
            };
            let Some(display) = connection_display(name) else {
                continue;
            };
            if param.get("display").and_then(Value::as_str) != Some(display) {
                problems.push(format!("parameter '{name}' must be displayed as '{display}'"));
            }
            if param.get("type").and_then(Value::as_i64) != Some(BOOLEAN_PARAM_TYPE) {
                problems.push(format!("parameter '{name}' must be of type {BOOLEAN_PARAM_TYPE}"));
            }
            if param.get("required") != Some(&Value::Bool(false)) {
                problems.push(format!("parameter '{name}' must not be required"));
            }
        }
        problems
    }

    fn bang_argument_problems(data: &Map<String, Value>) -> Vec<String> {
        let commands = data
            .get("script")
            .and_then(|s| s.get("commands"))
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default();
        let mut problems = Vec::new();
        for command in commands {
            let Some(name) = command.get("name").and_then(Value::as_str) else {
                continue;
            };
            if !BANG_COMMAND_NAMES.contains(&name) {
                continue;
            }
            let arguments = command
                .get("arguments")
                .and_then(Value::as_array)
                .map(Vec::as_slice)
                .unwrap_or_default();
            for argument in arguments {
                if argument.get("name").and_then(Value::as_str) != Some(name) {
                    continue;
                }
                for flag in ["default", "isArray", "required"] {
                    if argument.get(flag) != Some(&Value::Bool(true)) {
                        problems.push(format!(
                            "argument '{name}' of reputation command '{name}' must set {flag}: true"
                        ));
                    }
                }
            }
        }
        problems
    }
}

impl ContentValidator for IntegrationValidator {
    fn name(&self) -> &'static str {
        "integration"
    }

    fn validate(&self, document: &Document) -> Vec<String> {
        let data = document.data();
        let mut problems: Vec<String> = [
            check_version(FileType::Integration, data),
            check_id_matches_name(FileType::Integration, data),
        ]
        .into_iter()
        .flatten()
        .collect();
        problems.extend(Self::connection_param_problems(data));
        problems.extend(Self::bang_argument_problems(data));
        problems
    }
}
