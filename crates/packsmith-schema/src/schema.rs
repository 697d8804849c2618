//! # Content Schemas
//!
//! A [`Schema`] is a parsed JSON Schema document. Schemas may be stored as
//! `.json` or `.yml`; both load into the same value tree. Local references
//! (`#/$defs/...`, `#/definitions/...`) are resolved by JSON Pointer against
//! the schema's own root. Cross-file references are not supported.

use std::path::Path;

use packsmith_core::Document;
use serde_json::Value;

use crate::error::SchemaError;

/// Upper bound on chained `$ref` hops, guarding against reference cycles.
const MAX_REF_DEPTH: usize = 32;

/// A loaded JSON Schema.
#[derive(Debug, Clone)]
pub struct Schema {
    name: String,
    root: Value,
}

impl Schema {
    /// Load a schema file (`.json`, `.yml`, or `.yaml`).
    pub fn load(path: &Path) -> Result<Self, SchemaError> {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .to_string();
        let doc = Document::load(path).map_err(|e| SchemaError::SchemaLoad {
            schema_name: name.clone(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            name,
            root: Value::Object(doc.into_data()),
        })
    }

    /// Build a schema from an in-memory value.
    pub fn from_value(name: impl Into<String>, root: Value) -> Self {
        Self {
            name: name.into(),
            root,
        }
    }

    /// File name (or caller-supplied name) of the schema.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn root(&self) -> &Value {
        &self.root
    }

    /// Follow local `$ref`s until reaching a concrete subschema.
    ///
    /// Unresolvable references leave the node as-is.
    pub fn resolve<'a>(&'a self, mut node: &'a Value) -> &'a Value {
        for _ in 0..MAX_REF_DEPTH {
            let target = node
                .get("$ref")
                .and_then(Value::as_str)
                .and_then(|reference| reference.strip_prefix('#'))
                .and_then(|pointer| self.root.pointer(pointer));
            match target {
                Some(next) => node = next,
                None => break,
            }
        }
        node
    }
}
