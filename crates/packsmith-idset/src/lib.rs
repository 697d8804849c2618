//! # packsmith-idset: Content ID Set
//!
//! Walks `Packs/*/` under a content root and records every content item
//! by type: its id, name, file, platform version range, owning pack, and
//! the ids it references (commands, script dependencies, sub-playbooks).
//!
//! The set is saved as `Tests/id_set.json` and is what downstream tooling
//! uses to resolve dependencies between packs. [`IdSet::find_duplicates`]
//! reports ids claimed by more than one item with overlapping version
//! ranges.

pub mod entry;
pub mod error;
pub mod extract;
pub mod id_set;
pub mod version;

pub use entry::IdSetEntry;
pub use error::IdSetError;
pub use id_set::{Duplicate, IdSet};
pub use version::ContentVersion;
