//! # Artifact Handles
//!
//! Each handle owns one file path. Constructors write the file
//! immediately (empty, or with the given content).

use std::path::{Path, PathBuf};

use packsmith_core::{Document, DocumentFormat};
use serde_json::{Map, Value};

use crate::error::{io, FixtureError};

fn content_map(path: &Path, content: &Value) -> Result<Map<String, Value>, FixtureError> {
    match content {
        Value::Object(map) => Ok(map.clone()),
        _ => Err(FixtureError::NotAMapping {
            path: path.to_path_buf(),
        }),
    }
}

fn merge(target: &mut Value, update: &Value) {
    if let (Value::Object(target), Value::Object(update)) = (target, update) {
        for (key, value) in update {
            target.insert(key.clone(), value.clone());
        }
    }
}

/// A plain text file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextBased {
    path: PathBuf,
}

impl TextBased {
    /// Create `dir/name` holding `content`.
    pub fn new(dir: &Path, name: &str, content: &str) -> Result<Self, FixtureError> {
        let text = Self {
            path: dir.join(name),
        };
        text.write_text(content)?;
        Ok(text)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn write_text(&self, content: &str) -> Result<(), FixtureError> {
        std::fs::write(&self.path, content).map_err(|e| io(&self.path, e))
    }

    pub fn read_text(&self) -> Result<String, FixtureError> {
        std::fs::read_to_string(&self.path).map_err(|e| io(&self.path, e))
    }
}

/// A JSON object file named `<prefix>-<name>.json`, or just `name` when
/// the prefix is empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonBased {
    path: PathBuf,
}

impl JsonBased {
    /// File name for a JSON artifact.
    pub fn file_name(name: &str, prefix: &str) -> String {
        if prefix.is_empty() {
            name.to_string()
        } else {
            format!("{prefix}-{name}.json")
        }
    }

    pub fn new(dir: &Path, name: &str, prefix: &str, content: &Value) -> Result<Self, FixtureError> {
        let json = Self {
            path: dir.join(Self::file_name(name, prefix)),
        };
        json.write_json(content)?;
        Ok(json)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File name without the `.json` extension.
    pub fn stem(&self) -> &str {
        self.path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
    }

    pub fn write_json(&self, content: &Value) -> Result<(), FixtureError> {
        let map = content_map(&self.path, content)?;
        Document::new(map, DocumentFormat::Json).save(&self.path)?;
        Ok(())
    }

    pub fn read_json(&self) -> Result<Value, FixtureError> {
        let raw = std::fs::read_to_string(&self.path).map_err(|e| io(&self.path, e))?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Overwrite top-level keys with those of `update`.
    pub fn update(&self, update: &Value) -> Result<(), FixtureError> {
        let mut content = self.read_json()?;
        merge(&mut content, update);
        self.write_json(&content)
    }
}

/// A YAML manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YmlBased {
    path: PathBuf,
}

impl YmlBased {
    pub fn new(dir: &Path, file_name: &str, content: &Value) -> Result<Self, FixtureError> {
        let yml = Self {
            path: dir.join(file_name),
        };
        yml.write_dict(content)?;
        Ok(yml)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn write_dict(&self, content: &Value) -> Result<(), FixtureError> {
        let map = content_map(&self.path, content)?;
        let text = if map.is_empty() {
            String::new()
        } else {
            serde_yaml::to_string(&map)?
        };
        std::fs::write(&self.path, text).map_err(|e| io(&self.path, e))
    }

    /// Parse the manifest. An empty file reads as an empty mapping.
    pub fn read_dict(&self) -> Result<Value, FixtureError> {
        Ok(Value::Object(Document::load(&self.path)?.into_data()))
    }

    /// Overwrite top-level keys with those of `update`.
    pub fn update(&self, update: &Value) -> Result<(), FixtureError> {
        let mut content = self.read_dict()?;
        merge(&mut content, update);
        self.write_dict(&content)
    }
}

/// A binary file, such as an integration image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryBased {
    path: PathBuf,
}

impl BinaryBased {
    pub fn new(dir: &Path, file_name: &str, content: &[u8]) -> Result<Self, FixtureError> {
        let binary = Self {
            path: dir.join(file_name),
        };
        binary.write_bytes(content)?;
        Ok(binary)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn write_bytes(&self, content: &[u8]) -> Result<(), FixtureError> {
        std::fs::write(&self.path, content).map_err(|e| io(&self.path, e))
    }

    pub fn read_bytes(&self) -> Result<Vec<u8>, FixtureError> {
        std::fs::read(&self.path).map_err(|e| io(&self.path, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn json_file_name_with_and_without_prefix() {
        assert_eq!(JsonBased::file_name("a", "dashboard"), "dashboard-a.json");
        assert_eq!(JsonBased::file_name("pack_metadata.json", ""), "pack_metadata.json");
    }

    #[test]
    fn json_written_with_four_space_indent() {
        let dir = tempfile::tempdir().unwrap();
        let json = JsonBased::new(dir.path(), "x", "layout", &json!({ "id": "x" })).unwrap();
        let raw = std::fs::read_to_string(json.path()).unwrap();
        assert_eq!(raw, "{\n    \"id\": \"x\"\n}\n");
        assert_eq!(json.stem(), "layout-x");
    }

    #[test]
    fn json_update_merges_top_level() {
        let dir = tempfile::tempdir().unwrap();
        let json = JsonBased::new(dir.path(), "x", "layout", &json!({ "id": "x", "name": "a" })).unwrap();
        json.update(&json!({ "name": "b", "version": -1 })).unwrap();
        assert_eq!(json.read_json().unwrap(), json!({ "id": "x", "name": "b", "version": -1 }));
    }

    #[test]
    fn json_rejects_non_mapping() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            JsonBased::new(dir.path(), "x", "layout", &json!([1, 2])),
            Err(FixtureError::NotAMapping { .. })
        ));
    }

    #[test]
    fn empty_yml_reads_as_empty_mapping() {
        let dir = tempfile::tempdir().unwrap();
        let yml = YmlBased::new(dir.path(), "a.yml", &json!({})).unwrap();
        assert_eq!(std::fs::read_to_string(yml.path()).unwrap(), "");
        assert_eq!(yml.read_dict().unwrap(), json!({}));
    }

    #[test]
    fn yml_update_keeps_other_keys() {
        let dir = tempfile::tempdir().unwrap();
        let yml = YmlBased::new(dir.path(), "a.yml", &json!({ "name": "a", "tests": ["t"] })).unwrap();
        yml.update(&json!({ "name": "b" })).unwrap();
        assert_eq!(yml.read_dict().unwrap(), json!({ "name": "b", "tests": ["t"] }));
    }

    #[test]
    fn text_and_binary_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let text = TextBased::new(dir.path(), "README.md", "").unwrap();
        text.write_text("# Pack").unwrap();
        assert_eq!(text.read_text().unwrap(), "# Pack");

        let image = BinaryBased::new(dir.path(), "a_image.png", &[0x89, b'P', b'N', b'G']).unwrap();
        assert_eq!(image.read_bytes().unwrap(), vec![0x89, b'P', b'N', b'G']);
    }

    #[test]
    fn write_into_missing_dir_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            TextBased::new(&dir.path().join("nope"), "a.md", ""),
            Err(FixtureError::Io { .. })
        ));
    }
}
