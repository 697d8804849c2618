//! # Per-Type Extraction
//!
//! Turns one parsed content document into an [`IdSetEntry`]. YAML
//! manifests use lowercase `fromversion`/`toversion`; JSON objects use
//! `fromVersion`/`toVersion`.

use std::collections::BTreeSet;

use packsmith_core::{Document, FileType};
use serde_json::Value;

use crate::entry::IdSetEntry;

fn string_at<'a>(value: &'a Value, pointer: &str) -> Option<&'a str> {
    value.pointer(pointer).and_then(Value::as_str)
}

fn strings(values: Option<&Value>) -> Vec<String> {
    values
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// Distinct `task.<key>` values over all playbook tasks, sorted.
fn task_references(root: &Value, key: &str) -> Vec<String> {
    let Some(tasks) = root.get("tasks").and_then(Value::as_object) else {
        return Vec::new();
    };
    tasks
        .values()
        .filter_map(|task| task.get("task"))
        .filter_map(|body| body.get(key))
        .filter_map(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Build the entry for a document, or `None` when it carries no id.
pub fn extract_entry(
    file_type: FileType,
    document: &Document,
    file_path: &str,
    pack: Option<&str>,
) -> Option<IdSetEntry> {
    let root = Value::Object(document.data().clone());

    let (id_pointer, from_key, to_key) = match file_type {
        FileType::Integration | FileType::Script => ("/commonfields/id", "/fromversion", "/toversion"),
        FileType::Playbook => ("/id", "/fromversion", "/toversion"),
        _ => ("/id", "/fromVersion", "/toVersion"),
    };

    let Some(id) = string_at(&root, id_pointer) else {
        tracing::warn!(file = %file_path, "content item has no id, leaving it out of the id set");
        return None;
    };
    let name = string_at(&root, "/name").unwrap_or(id);

    let mut entry = IdSetEntry::new(id, name, file_path);
    entry.fromversion = string_at(&root, from_key).map(str::to_string);
    entry.toversion = string_at(&root, to_key).map(str::to_string);
    entry.pack = pack.map(str::to_string);

    match file_type {
        FileType::Integration => {
            entry.commands = root
                .pointer("/script/commands")
                .and_then(Value::as_array)
                .map(|commands| {
                    commands
                        .iter()
                        .filter_map(|c| c.get("name"))
                        .filter_map(Value::as_str)
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default();
        }
        FileType::Script => {
            entry.depends_on = strings(root.pointer("/dependson/must"));
        }
        FileType::Playbook => {
            entry.implementing_scripts = task_references(&root, "scriptName");
            entry.implementing_playbooks = task_references(&root, "playbookName");
        }
        FileType::Layout => {
            entry.kind = string_at(&root, "/kind").map(str::to_string);
        }
        _ => {}
    }

    Some(entry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use packsmith_core::DocumentFormat;
    use std::path::Path;

    fn yaml(body: &str) -> Document {
        Document::parse(body, DocumentFormat::Yaml, Path::new("x.yml")).unwrap()
    }

    #[test]
    fn integration_commands_and_versions() {
        let doc = yaml(
            "\
commonfields:
  id: VirusTotal
name: VirusTotal
fromversion: 5.0.0
script:
  commands:
  - name: file
  - name: vt-comments-get
",
        );
        let entry = extract_entry(FileType::Integration, &doc, "Packs/VT/vt.yml", Some("VT")).unwrap();
        assert_eq!(entry.id, "VirusTotal");
        assert_eq!(entry.fromversion.as_deref(), Some("5.0.0"));
        assert_eq!(entry.toversion, None);
        assert_eq!(entry.commands, vec!["file", "vt-comments-get"]);
        assert_eq!(entry.pack.as_deref(), Some("VT"));
    }

    #[test]
    fn script_dependencies() {
        let doc = yaml(
            "commonfields:\n  id: Rasterize\nname: Rasterize\nscript: ''\ndependson:\n  must:\n  - rasterize-image\n",
        );
        let entry = extract_entry(FileType::Script, &doc, "s.yml", None).unwrap();
        assert_eq!(entry.depends_on, vec!["rasterize-image"]);
    }

    #[test]
    fn playbook_references_are_distinct_and_sorted() {
        let doc = yaml(
            "\
id: Triage
name: Triage
tasks:
  '1':
    task:
      scriptName: Set
  '2':
    task:
      scriptName: DeleteContext
  '3':
    task:
      scriptName: Set
  '4':
    task:
      playbookName: Enrichment
",
        );
        let entry = extract_entry(FileType::Playbook, &doc, "p.yml", None).unwrap();
        assert_eq!(entry.implementing_scripts, vec!["DeleteContext", "Set"]);
        assert_eq!(entry.implementing_playbooks, vec!["Enrichment"]);
    }

    #[test]
    fn json_versions_use_camel_case_keys() {
        let doc = Document::parse(
            r#"{"id": "details", "name": "Phishing", "kind": "details", "fromVersion": "6.0.0"}"#,
            DocumentFormat::Json,
            Path::new("layout.json"),
        )
        .unwrap();
        let entry = extract_entry(FileType::Layout, &doc, "l.json", None).unwrap();
        assert_eq!(entry.fromversion.as_deref(), Some("6.0.0"));
        assert_eq!(entry.kind.as_deref(), Some("details"));
    }

    #[test]
    fn missing_id_skipped() {
        let doc = Document::parse(r#"{"name": "x"}"#, DocumentFormat::Json, Path::new("d.json")).unwrap();
        assert!(extract_entry(FileType::Dashboard, &doc, "d.json", None).is_none());
    }

    #[test]
    fn missing_name_falls_back_to_id() {
        let doc = Document::parse(r#"{"id": "x"}"#, DocumentFormat::Json, Path::new("d.json")).unwrap();
        assert_eq!(
            extract_entry(FileType::Dashboard, &doc, "d.json", None).unwrap().name,
            "x"
        );
    }
}
