//! # packsmith-testsuite: On-Disk Fixtures
//!
//! Builders that lay out a content repository for tests:
//!
//! - [`Repo`] owns a root directory with a `Packs/` folder.
//! - [`Pack`] owns one pack directory and every artifact created in it.
//! - Artifact handles ([`TextBased`], [`JsonBased`], [`YmlBased`],
//!   [`BinaryBased`]) each own exactly one file.
//! - [`Integration`] and [`Script`] own a code directory with the code,
//!   manifest, readme, description, changelog, and image files.
//!
//! Every handle is returned only after its file has been written, so a
//! test can read back anything the builder has recorded.
//!
//! ```no_run
//! use packsmith_testsuite::Repo;
//! use serde_json::json;
//!
//! let dir = std::env::temp_dir().join("content");
//! let mut repo = Repo::new(&dir)?;
//! let pack = repo.create_pack("Phishing")?;
//! pack.create_dashboard(None, Some(json!({ "name": "Overview" })))?;
//! # Ok::<(), packsmith_testsuite::FixtureError>(())
//! ```

pub mod artifact;
pub mod code_unit;
pub mod error;
pub mod pack;
pub mod repo;
pub mod secrets;

pub use artifact::{BinaryBased, JsonBased, TextBased, YmlBased};
pub use code_unit::{CodeUnitSpec, Integration, Script};
pub use error::FixtureError;
pub use pack::{JsonArtifact, Pack};
pub use repo::Repo;
pub use secrets::Secrets;
