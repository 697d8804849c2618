//! Content repository layout and platform conventions shared across crates.

/// Version every content item carries once formatted.
pub const DEFAULT_VERSION: i64 = -1;

/// Root directory holding all packs in a content repository.
pub const PACKS_DIR: &str = "Packs";

pub const INTEGRATIONS_DIR: &str = "Integrations";
pub const SCRIPTS_DIR: &str = "Scripts";
pub const PLAYBOOKS_DIR: &str = "Playbooks";
pub const CLASSIFIERS_DIR: &str = "Classifiers";
pub const DASHBOARDS_DIR: &str = "Dashboards";
pub const INCIDENT_FIELDS_DIR: &str = "IncidentFields";
pub const INCIDENT_TYPES_DIR: &str = "IncidentTypes";
pub const INDICATOR_FIELDS_DIR: &str = "IndicatorFields";
pub const INDICATOR_TYPES_DIR: &str = "IndicatorTypes";
pub const LAYOUTS_DIR: &str = "Layouts";
pub const RELEASE_NOTES_DIR: &str = "ReleaseNotes";

/// Files present in every pack.
pub const PACK_IGNORE_FILE: &str = ".pack-ignore";
pub const SECRETS_IGNORE_FILE: &str = ".secrets-ignore";
pub const PACK_README_FILE: &str = "README.md";
pub const PACK_METADATA_FILE: &str = "pack_metadata.json";
