//! # packsmith-schema: Schema Normalization & Validation
//!
//! Content schemas are JSON Schema documents (one per [`FileType`]) shipped
//! in the repository's `schemas/` directory. They serve two purposes:
//!
//! ## Normalization (`normalize`)
//!
//! [`Schema::normalize`] applies the schema-level conventions a formatter
//! runs before its type-specific rules: keys marked `"deprecated": true`
//! are dropped, keys outside `properties` are dropped where
//! `additionalProperties` is `false`, and absent properties with a `default`
//! are filled in. [`Schema::reorder`] puts keys into schema order once all
//! rules have run.
//!
//! ## Validation (`validate`)
//!
//! [`StructureValidator`] compiles a schema with the `jsonschema` crate and
//! reports structured [`Violation`]s. [`ContentValidator`] is the seam for
//! the semantic, per-type checks that run after it.
//!
//! [`FileType`]: packsmith_core::FileType

pub mod error;
pub mod normalize;
pub mod registry;
pub mod schema;
pub mod validate;

pub use error::SchemaError;
pub use registry::SchemaRegistry;
pub use schema::Schema;
pub use validate::{ContentValidator, StructureValidator, ValidationViolations, Violation};
