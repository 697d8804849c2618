//! # packsmith-core: Foundational Types for Content Packs
//!
//! Every other crate in the workspace depends on `packsmith-core`; it
//! depends on nothing internal.
//!
//! ## Key Types
//!
//! - [`Document`]: an ordered string-keyed mapping loaded from a YAML or
//!   JSON content file. Formatters mutate it in place and write it back
//!   with byte-deterministic serialization.
//!
//! - [`FileType`]: the closed set of content artifacts the toolkit knows
//!   about (integrations, scripts, playbooks, and the JSON configuration
//!   objects). Exhaustive `match` everywhere; adding a type forces every
//!   consumer to handle it.
//!
//! - [`FormatStatus`] / [`FormatOutcome`]: the tri-state success / error /
//!   skip contract reported by every formatter.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `packsmith-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod constants;
pub mod document;
pub mod error;
pub mod file_type;
pub mod status;

pub use document::{yaml_to_json_value, Document, DocumentFormat};
pub use error::CoreError;
pub use file_type::FileType;
pub use status::{
    FormatOutcome, FormatStatus, ERROR_RETURN_CODE, SKIP_RETURN_CODE, SUCCESS_RETURN_CODE,
};
