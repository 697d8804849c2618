//! # Content Documents
//!
//! A [`Document`] is the in-memory form of one content file. YAML and JSON
//! sources are both loaded into the JSON data model (`serde_json::Map` with
//! insertion order preserved) so that formatters and schema passes operate
//! on one representation regardless of the on-disk markup.
//!
//! ## Serialization
//!
//! - YAML documents are written with `serde_yaml` in key insertion order.
//! - JSON documents are written with 4-space indentation and a trailing
//!   newline.
//!
//! Serializing the same document twice produces identical bytes, which is
//! what makes formatter idempotence observable on disk.

use std::path::Path;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::CoreError;

/// On-disk markup of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentFormat {
    /// `.yml` / `.yaml`
    Yaml,
    /// `.json`
    Json,
}

impl DocumentFormat {
    /// Infer the markup from a file extension.
    pub fn from_path(path: &Path) -> Result<Self, CoreError> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("yml") | Some("yaml") => Ok(Self::Yaml),
            Some("json") => Ok(Self::Json),
            _ => Err(CoreError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// An ordered mapping loaded from a content file.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    data: Map<String, Value>,
    format: DocumentFormat,
}

impl Document {
    /// Wrap an existing mapping.
    pub fn new(data: Map<String, Value>, format: DocumentFormat) -> Self {
        Self { data, format }
    }

    /// Read and parse a document, choosing the parser from the extension.
    pub fn load(path: &Path) -> Result<Self, CoreError> {
        let format = DocumentFormat::from_path(path)?;
        let content = std::fs::read_to_string(path).map_err(|e| CoreError::io(path, e))?;
        Self::parse(&content, format, path)
    }

    /// Parse document text. `origin` is only used for error messages.
    pub fn parse(content: &str, format: DocumentFormat, origin: &Path) -> Result<Self, CoreError> {
        let value = match format {
            DocumentFormat::Yaml => {
                let yaml: serde_yaml::Value =
                    serde_yaml::from_str(content).map_err(|e| CoreError::Yaml {
                        path: origin.display().to_string(),
                        reason: e.to_string(),
                    })?;
                yaml_to_json_value(&yaml).map_err(|reason| CoreError::Yaml {
                    path: origin.display().to_string(),
                    reason,
                })?
            }
            DocumentFormat::Json => {
                serde_json::from_str(content).map_err(|e| CoreError::Json {
                    path: origin.display().to_string(),
                    reason: e.to_string(),
                })?
            }
        };

        match value {
            Value::Object(data) => Ok(Self { data, format }),
            // An empty YAML file is an empty manifest.
            Value::Null => Ok(Self {
                data: Map::new(),
                format,
            }),
            other => Err(CoreError::NotAMapping {
                path: origin.display().to_string(),
                found: value_kind(&other),
            }),
        }
    }

    /// Serialize to the bytes that [`Document::save`] writes.
    pub fn to_bytes(&self) -> Result<Vec<u8>, CoreError> {
        match self.format {
            DocumentFormat::Yaml => serde_yaml::to_string(&self.data)
                .map(String::into_bytes)
                .map_err(|e| CoreError::Serialization(e.to_string())),
            DocumentFormat::Json => {
                let mut buf = Vec::new();
                let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
                let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
                self.data
                    .serialize(&mut ser)
                    .map_err(|e| CoreError::Serialization(e.to_string()))?;
                buf.push(b'\n');
                Ok(buf)
            }
        }
    }

    /// Write the document. The parent directory must already exist.
    pub fn save(&self, path: &Path) -> Result<(), CoreError> {
        let bytes = self.to_bytes()?;
        std::fs::write(path, bytes).map_err(|e| CoreError::io(path, e))
    }

    /// Markup this document was loaded from and will be written as.
    pub fn format(&self) -> DocumentFormat {
        self.format
    }

    pub fn data(&self) -> &Map<String, Value> {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut Map<String, Value> {
        &mut self.data
    }

    pub fn into_data(self) -> Map<String, Value> {
        self.data
    }

    /// Look up a top-level key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    /// Look up a top-level string value.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.data.get(key).and_then(Value::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.data.contains_key(key)
    }
}

/// Name of a JSON value kind, for diagnostics.
pub fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "mapping",
    }
}

/// Convert a `serde_yaml::Value` to a `serde_json::Value`.
///
/// Content manifests only use the JSON-compatible subset of YAML. Non-string
/// mapping keys (playbook task ids are often bare integers) are stringified.
pub fn yaml_to_json_value(yaml: &serde_yaml::Value) -> Result<Value, String> {
    match yaml {
        serde_yaml::Value::Null => Ok(Value::Null),
        serde_yaml::Value::Bool(b) => Ok(Value::Bool(*b)),
        serde_yaml::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(Value::Number(serde_json::Number::from(i)))
            } else if let Some(u) = n.as_u64() {
                Ok(Value::Number(serde_json::Number::from(u)))
            } else if let Some(f) = n.as_f64() {
                serde_json::Number::from_f64(f)
                    .map(Value::Number)
                    .ok_or_else(|| format!("cannot represent float {f} in JSON"))
            } else {
                Err(format!("unsupported YAML number: {n:?}"))
            }
        }
        serde_yaml::Value::String(s) => Ok(Value::String(s.clone())),
        serde_yaml::Value::Sequence(seq) => {
            let items: Result<Vec<Value>, String> = seq.iter().map(yaml_to_json_value).collect();
            Ok(Value::Array(items?))
        }
        serde_yaml::Value::Mapping(map) => {
            let mut json_map = Map::new();
            for (k, v) in map {
                let key = match k {
                    serde_yaml::Value::String(s) => s.clone(),
                    serde_yaml::Value::Number(n) => n.to_string(),
                    serde_yaml::Value::Bool(b) => b.to_string(),
                    other => return Err(format!("unsupported YAML map key type: {other:?}")),
                };
                json_map.insert(key, yaml_to_json_value(v)?);
            }
            Ok(Value::Object(json_map))
        }
        serde_yaml::Value::Tagged(tagged) => yaml_to_json_value(&tagged.value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn yaml(content: &str) -> Document {
        Document::parse(content, DocumentFormat::Yaml, Path::new("test.yml")).unwrap()
    }

    #[test]
    fn format_from_extension() {
        assert_eq!(
            DocumentFormat::from_path(Path::new("a/b.yml")).unwrap(),
            DocumentFormat::Yaml
        );
        assert_eq!(
            DocumentFormat::from_path(Path::new("a/b.yaml")).unwrap(),
            DocumentFormat::Yaml
        );
        assert_eq!(
            DocumentFormat::from_path(Path::new("a/b.json")).unwrap(),
            DocumentFormat::Json
        );
        assert!(DocumentFormat::from_path(Path::new("a/b.md")).is_err());
    }

    #[test]
    fn yaml_preserves_key_order() {
        let doc = yaml("zeta: 1\nalpha: 2\nmid: 3\n");
        let keys: Vec<&str> = doc.data().keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn yaml_integer_keys_become_strings() {
        let doc = yaml("tasks:\n  7:\n    id: '7'\n");
        assert!(doc.data()["tasks"].get("7").is_some());
    }

    #[test]
    fn empty_yaml_is_empty_mapping() {
        let doc = yaml("");
        assert!(doc.data().is_empty());
    }

    #[test]
    fn non_mapping_top_level_rejected() {
        let err = Document::parse("[1, 2]", DocumentFormat::Json, Path::new("x.json")).unwrap_err();
        assert!(matches!(err, CoreError::NotAMapping { found: "array", .. }));
    }

    #[test]
    fn invalid_json_reports_path() {
        let err = Document::parse("{", DocumentFormat::Json, Path::new("broken.json")).unwrap_err();
        match err {
            CoreError::Json { path, .. } => assert_eq!(path, "broken.json"),
            other => panic!("expected Json error, got {other}"),
        }
    }

    #[test]
    fn json_written_with_four_space_indent() {
        let mut data = Map::new();
        data.insert("name".to_string(), json!("x"));
        let doc = Document::new(data, DocumentFormat::Json);
        let text = String::from_utf8(doc.to_bytes().unwrap()).unwrap();
        assert_eq!(text, "{\n    \"name\": \"x\"\n}\n");
    }

    #[test]
    fn save_and_load_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("integration.yml");
        let doc = yaml("name: Sample\ncommonfields:\n  id: Sample\n  version: -1\n");
        doc.save(&path).unwrap();

        let loaded = Document::load(&path).unwrap();
        assert_eq!(loaded, doc);
        assert_eq!(loaded.data()["commonfields"]["version"], json!(-1));
    }

    #[test]
    fn save_into_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope").join("a.json");
        let doc = Document::new(Map::new(), DocumentFormat::Json);
        assert!(matches!(doc.save(&path), Err(CoreError::Io { .. })));
    }

    #[test]
    fn yaml_serialization_is_stable() {
        let doc = yaml("name: a\nlist:\n- one\n- two\nnested:\n  '1': true\n");
        let first = doc.to_bytes().unwrap();
        let reparsed = Document::parse(
            std::str::from_utf8(&first).unwrap(),
            DocumentFormat::Yaml,
            Path::new("t.yml"),
        )
        .unwrap();
        assert_eq!(reparsed.to_bytes().unwrap(), first);
    }

    proptest::proptest! {
        /// Re-serializing a parsed document reproduces the same bytes.
        #[test]
        fn reserialization_is_byte_stable(
            entries in proptest::collection::vec(("[a-z]{1,8}", "[a-zA-Z0-9 _-]{0,16}", proptest::bool::ANY), 0..8),
            yaml_format in proptest::bool::ANY,
        ) {
            let mut data = Map::new();
            for (k, v, flag) in entries {
                if flag {
                    data.insert(k, json!({ "value": v, "flag": flag }));
                } else {
                    data.insert(k, json!(v));
                }
            }
            let format = if yaml_format { DocumentFormat::Yaml } else { DocumentFormat::Json };
            let first = Document::new(data, format).to_bytes().unwrap();
            let reparsed = Document::parse(
                std::str::from_utf8(&first).unwrap(),
                format,
                Path::new("prop"),
            ).unwrap();
            proptest::prop_assert_eq!(reparsed.to_bytes().unwrap(), first);
        }
    }

    #[test]
    fn get_str_accessor() {
        let doc = yaml("name: Foo\nversion: -1\n");
        assert_eq!(doc.get_str("name"), Some("Foo"));
        assert_eq!(doc.get_str("version"), None);
        assert!(doc.contains_key("version"));
    }
}
