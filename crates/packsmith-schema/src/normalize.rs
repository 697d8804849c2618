//! # Schema-Driven Normalization
//!
//! Mutates a document so it matches the conventions encoded in its schema.
//! Both passes are idempotent: running them on their own output is a no-op.
//!
//! The walk descends through `properties`, object-valued
//! `additionalProperties` (used for id-keyed maps such as playbook tasks),
//! and array `items`.

use serde_json::{Map, Value};

use crate::schema::Schema;

impl Schema {
    /// Drop deprecated and unknown keys and fill in schema defaults.
    pub fn normalize(&self, data: &mut Map<String, Value>) {
        self.normalize_object(self.root(), data);
    }

    /// Order keys as the schema lists them; unlisted keys keep their
    /// relative order after the listed ones.
    pub fn reorder(&self, data: &mut Map<String, Value>) {
        self.reorder_object(self.root(), data);
    }

    fn normalize_object(&self, node: &Value, map: &mut Map<String, Value>) {
        let node = self.resolve(node);
        let props = node.get("properties").and_then(Value::as_object);
        let additional = node.get("additionalProperties");

        if let Some(props) = props {
            map.retain(|key, _| {
                !props
                    .get(key)
                    .is_some_and(|prop| is_deprecated(self.resolve(prop)))
            });
            if matches!(additional, Some(Value::Bool(false))) {
                map.retain(|key, _| {
                    let keep = props.contains_key(key);
                    if !keep {
                        tracing::debug!(key = %key, schema = %self.name(), "removing key not in schema");
                    }
                    keep
                });
            }
            for (key, prop) in props {
                if map.contains_key(key) {
                    continue;
                }
                let prop = self.resolve(prop);
                if is_deprecated(prop) {
                    continue;
                }
                if let Some(default) = prop.get("default") {
                    map.insert(key.clone(), default.clone());
                }
            }
        }

        for (key, value) in map.iter_mut() {
            if let Some(child) = child_schema(props, additional, key) {
                self.normalize_value(child, value);
            }
        }
    }

    fn normalize_value(&self, node: &Value, value: &mut Value) {
        let node = self.resolve(node);
        match value {
            Value::Object(map) => self.normalize_object(node, map),
            Value::Array(items) => {
                if let Some(item_schema) = node.get("items").filter(|i| i.is_object()) {
                    for item in items {
                        self.normalize_value(item_schema, item);
                    }
                }
            }
            _ => {}
        }
    }

    fn reorder_object(&self, node: &Value, map: &mut Map<String, Value>) {
        let node = self.resolve(node);
        let props = node.get("properties").and_then(Value::as_object);
        let additional = node.get("additionalProperties");

        for (key, value) in map.iter_mut() {
            if let Some(child) = child_schema(props, additional, key) {
                self.reorder_value(child, value);
            }
        }

        let Some(props) = props else {
            return;
        };
        let mut entries: Vec<(String, Value)> = std::mem::take(map).into_iter().collect();
        // Stable sort: keys outside the schema keep their relative order.
        entries.sort_by_key(|(key, _)| {
            props
                .keys()
                .position(|k| k == key)
                .unwrap_or(props.len())
        });
        *map = entries.into_iter().collect();
    }

    fn reorder_value(&self, node: &Value, value: &mut Value) {
        let node = self.resolve(node);
        match value {
            Value::Object(map) => self.reorder_object(node, map),
            Value::Array(items) => {
                if let Some(item_schema) = node.get("items").filter(|i| i.is_object()) {
                    for item in items {
                        self.reorder_value(item_schema, item);
                    }
                }
            }
            _ => {}
        }
    }
}

fn is_deprecated(node: &Value) -> bool {
    node.get("deprecated") == Some(&Value::Bool(true))
}

fn child_schema<'a>(
    props: Option<&'a Map<String, Value>>,
    additional: Option<&'a Value>,
    key: &str,
) -> Option<&'a Value> {
    props
        .and_then(|p| p.get(key))
        .or_else(|| additional.filter(|a| a.is_object()))
}
