//! # Base Rules
//!
//! The generic passes every formatter starts from (`update_yml` for YAML
//! content, `update_json` for JSON content) and the small rules several
//! content types share.

use packsmith_core::constants::DEFAULT_VERSION;
use packsmith_core::DocumentFormat;
use serde_json::{json, Value};

use crate::context::FormatterContext;
use crate::error::RuleError;

/// Placeholder written when a playbook, integration, or script lists no
/// test playbooks.
pub const NO_TESTS_MARKER: &str = "No tests (auto formatted)";

const COPY_SUFFIXES: &[&str] = &["_copy", "_dev"];

/// Python-style truthiness: absent, null, false, zero, and empty values are
/// all "unset".
pub fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(a)) => !a.is_empty(),
        Some(Value::Object(o)) => !o.is_empty(),
    }
}

/// Generic pass for YAML content.
pub fn update_yml(ctx: &mut FormatterContext) -> Result<(), RuleError> {
    set_from_version(ctx)?;
    remove_copy_and_dev_suffixes(ctx)?;
    normalize_with_schema(ctx)?;
    update_id_to_equal_name(ctx)?;
    set_version_to_default(ctx)
}

/// Generic pass for JSON content.
pub fn update_json(ctx: &mut FormatterContext) -> Result<(), RuleError> {
    set_version_to_default(ctx)?;
    normalize_with_schema(ctx)?;
    set_from_version(ctx)
}

/// Stamp the requested minimum platform version, if any.
pub fn set_from_version(ctx: &mut FormatterContext) -> Result<(), RuleError> {
    let Some(from_version) = ctx.from_version.clone() else {
        return Ok(());
    };
    let key = match ctx.document.format() {
        DocumentFormat::Yaml => "fromversion",
        DocumentFormat::Json => "fromVersion",
    };
    ctx.data_mut().insert(key.to_string(), Value::String(from_version));
    Ok(())
}

pub fn remove_copy_and_dev_suffixes(ctx: &mut FormatterContext) -> Result<(), RuleError> {
    for key in ["name", "display"] {
        strip_suffixes(ctx.data_mut().get_mut(key));
    }
    if let Ok(location) = ctx.id_location_mut() {
        strip_suffixes(location.get_mut("id"));
    }
    Ok(())
}

fn strip_suffixes(value: Option<&mut Value>) {
    if let Some(Value::String(s)) = value {
        let mut stripped = s.clone();
        for suffix in COPY_SUFFIXES {
            stripped = stripped.replace(suffix, "");
        }
        *s = stripped;
    }
}

/// Apply the schema's deprecated/unknown-key removal and defaults.
pub fn normalize_with_schema(ctx: &mut FormatterContext) -> Result<(), RuleError> {
    if let Some(schema) = ctx.schema.as_ref() {
        schema.normalize(ctx.document.data_mut());
    }
    Ok(())
}

/// `id` := `name`.
pub fn update_id_to_equal_name(ctx: &mut FormatterContext) -> Result<(), RuleError> {
    let name = match ctx.data().get("name").and_then(Value::as_str) {
        Some(name) => name.to_string(),
        None => return Err(ctx.missing_field("name")),
    };
    let location = ctx.id_location_mut()?;
    if location.get("id").and_then(Value::as_str) != Some(name.as_str()) {
        tracing::info!(id = %name, "updating id to match name");
    }
    location.insert("id".to_string(), Value::String(name));
    Ok(())
}

pub fn set_version_to_default(ctx: &mut FormatterContext) -> Result<(), RuleError> {
    ctx.id_location_mut()?
        .insert("version".to_string(), json!(DEFAULT_VERSION));
    Ok(())
}

/// Give content without test playbooks the "no tests" marker.
pub fn default_tests(ctx: &mut FormatterContext) -> Result<(), RuleError> {
    if !is_truthy(ctx.data().get("tests")) {
        tracing::warn!(file = %ctx.display_path(), "no test playbooks listed, marking as untested");
        ctx.data_mut()
            .insert("tests".to_string(), json!([NO_TESTS_MARKER]));
    }
    Ok(())
}

/// Ensure a `description` key exists.
pub fn set_description(ctx: &mut FormatterContext) -> Result<(), RuleError> {
    if !ctx.data().contains_key("description") {
        ctx.data_mut()
            .insert("description".to_string(), Value::String(String::new()));
    }
    Ok(())
}
