//! # Structural Validation
//!
//! Validates documents against their content schema with the `jsonschema`
//! crate (Draft 2020-12), and defines the [`ContentValidator`] seam for the
//! semantic checks each content type adds on top.
//!
//! Failures carry structured context: the instance path of the violating
//! field, the schema path that triggered it, and a message.

use std::fmt;

use jsonschema::Validator;
use packsmith_core::Document;
use serde_json::Value;

use crate::error::SchemaError;
use crate::schema::Schema;

/// Semantic validation for one content type.
///
/// Runs on a document that already passed (or skipped) structural
/// validation. Returns every problem found; an empty list means valid.
pub trait ContentValidator {
    /// Short name used in log output.
    fn name(&self) -> &'static str;

    fn validate(&self, document: &Document) -> Vec<String>;
}

/// A single validation violation with structured context.
#[derive(Debug, Clone)]
pub struct Violation {
    /// JSON Pointer path to the violating field in the instance.
    pub instance_path: String,
    /// JSON Pointer path within the schema that triggered the error.
    pub schema_path: String,
    /// Human-readable description of the violation.
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.instance_path.is_empty() {
            write!(f, "  (root): {}", self.message)
        } else {
            write!(f, "  {}: {}", self.instance_path, self.message)
        }
    }
}

/// Collection of validation violations.
#[derive(Debug, Clone)]
pub struct ValidationViolations {
    violations: Vec<Violation>,
}

impl ValidationViolations {
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    pub fn into_inner(self) -> Vec<Violation> {
        self.violations
    }
}

impl fmt::Display for ValidationViolations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, v) in self.violations.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{v}")?;
        }
        Ok(())
    }
}

/// A compiled schema, ready to validate documents.
pub struct StructureValidator {
    schema_name: String,
    validator: Validator,
}

impl fmt::Debug for StructureValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StructureValidator")
            .field("schema_name", &self.schema_name)
            .finish_non_exhaustive()
    }
}

impl StructureValidator {
    /// Compile `schema`.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::ValidatorBuild` if the schema is not a valid
    /// JSON Schema.
    pub fn new(schema: &Schema) -> Result<Self, SchemaError> {
        let validator = jsonschema::options()
            .with_draft(jsonschema::Draft::Draft202012)
            .build(schema.root())
            .map_err(|e| SchemaError::ValidatorBuild {
                schema_name: schema.name().to_string(),
                reason: e.to_string(),
            })?;
        Ok(Self {
            schema_name: schema.name().to_string(),
            validator,
        })
    }

    pub fn schema_name(&self) -> &str {
        &self.schema_name
    }

    /// Validate a JSON value.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::ValidationFailed` listing every violation.
    pub fn validate_value(&self, instance: &Value) -> Result<(), SchemaError> {
        let violations: Vec<Violation> = self
            .validator
            .iter_errors(instance)
            .map(|e| Violation {
                instance_path: e.instance_path.to_string(),
                schema_path: e.schema_path.to_string(),
                message: e.to_string(),
            })
            .collect();

        if violations.is_empty() {
            Ok(())
        } else {
            Err(SchemaError::ValidationFailed {
                schema_name: self.schema_name.clone(),
                violations: ValidationViolations { violations },
            })
        }
    }

    /// Validate a loaded content document.
    pub fn validate_document(&self, document: &Document) -> Result<(), SchemaError> {
        self.validate_value(&Value::Object(document.data().clone()))
    }
}
