//! Playbooks (YAML task graphs keyed by task id).

use packsmith_core::{Document, FileType};
use packsmith_schema::ContentValidator;
use serde_json::{Map, Value};

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
        name: "add_description",
        apply: add_description,
    },
    Rule {
        name: "update_playbook_task_name",
        apply: update_playbook_task_name,
    },
    Rule {
        name: "delete_sourceplaybookid",
        apply: delete_sourceplaybookid,
    },
    Rule {
        name: "default_tests",
        apply: base::default_tests,
    },
];

/// Task type for a sub-playbook invocation.
const PLAYBOOK_TASK_TYPE: &str = "playbook";

fn tasks_mut(ctx: &mut FormatterContext) -> Result<Option<&mut Map<String, Value>>, RuleError> {
    match ctx.data().get("tasks") {
        None | Some(Value::Object(_)) => {}
        Some(_) => return Err(ctx.invalid_field("tasks", "a mapping of task ids")),
    }
    Ok(ctx.data_mut().get_mut("tasks").and_then(Value::as_object_mut))
}

/// Every playbook and every task body carries a `description` key.
pub fn add_description(ctx: &mut FormatterContext) -> Result<(), RuleError> {
    if !ctx.data().contains_key("description") {
        tracing::warn!(file = %ctx.display_path(), "playbook has no description, adding an empty one");
        ctx.data_mut()
            .insert("description".to_string(), Value::String(String::new()));
    }
    let Some(tasks) = tasks_mut(ctx)? else {
        return Ok(());
    };
    for body in tasks
        .values_mut()
        .filter_map(|t| t.get_mut("task"))
        .filter_map(Value::as_object_mut)
    {
        if !body.contains_key("description") {
            body.insert("description".to_string(), Value::String(String::new()));
        }
    }
    Ok(())
}

/// Sub-playbook tasks are named after the playbook they run.
pub fn update_playbook_task_name(ctx: &mut FormatterContext) -> Result<(), RuleError> {
    let Some(tasks) = tasks_mut(ctx)? else {
        return Ok(());
    };
    for task in tasks.values_mut().filter_map(Value::as_object_mut) {
        if task.get("type").and_then(Value::as_str) != Some(PLAYBOOK_TASK_TYPE) {
            continue;
        }
        let Some(body) = task.get_mut("task").and_then(Value::as_object_mut) else {
            continue;
        };
        let target = ["playbookName", "playbookId"]
            .iter()
            .find_map(|key| body.get(*key).and_then(Value::as_str))
            .map(str::to_string);
        if let Some(target) = target {
            body.insert("name".to_string(), Value::String(target));
        }
    }
    Ok(())
}

pub fn delete_sourceplaybookid(ctx: &mut FormatterContext) -> Result<(), RuleError> {
    ctx.data_mut().retain(|key, _| key != "sourceplaybookid");
    Ok(())
}

#[derive(Debug, Clone, Copy)]
pub struct PlaybookValidator;

impl PlaybookValidator {
    fn graph_problems(data: &Map<String, Value>) -> Vec<String> {
        let mut problems = Vec::new();
        let Some(tasks) = data.get("tasks").and_then(Value::as_object) else {
            return problems;
        };
        if let Some(start) = data.get("starttaskid").and_then(Value::as_str) {
            if !tasks.contains_key(start) {
                problems.push(format!("start task '{start}' does not exist"));
            }
        }
        for (task_id, task) in tasks {
            let Some(next) = task.get("nexttasks").and_then(Value::as_object) else {
                continue;
            };
            let targets = next
                .values()
                .filter_map(Value::as_array)
                .flatten()
                .filter_map(Value::as_str);
            for target in targets {
                if !tasks.contains_key(target) {
                    problems.push(format!("task '{task_id}' points to missing task '{target}'"));
                }
            }
        }
        problems
    }
}

impl ContentValidator for PlaybookValidator {
    fn name(&self) -> &'static str {
        "playbook"
    }

    fn validate(&self, document: &Document) -> Vec<String> {
        let data = document.data();
        let mut problems: Vec<String> = [
            check_version(FileType::Playbook, data),
            check_id_matches_name(FileType::Playbook, data),
        ]
        .into_iter()
        .flatten()
        .collect();
        if data.contains_key("sourceplaybookid") {
            problems.push("field 'sourceplaybookid' must not be present".to_string());
        }
        problems.extend(Self::graph_problems(data));
        problems
    }
}
