//! # Content File Types
//!
//! Defines the [`FileType`] enum, the single list of content artifacts the
//! toolkit formats, validates, and indexes. File names follow the platform's
//! `<prefix>-<name>.json` convention for JSON artifacts; YAML manifests are
//! recognized by their contents.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::constants;
use crate::document::{Document, DocumentFormat};
use crate::error::CoreError;

/// Every content artifact kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    Integration,
    Script,
    Playbook,
    Dashboard,
    Classifier,
    Mapper,
    Layout,
    IncidentField,
    IncidentType,
    IndicatorField,
    /// Stored on disk as a "reputation".
    #[serde(rename = "reputation")]
    IndicatorType,
}

impl FileType {
    /// All file types in canonical order.
    pub fn all() -> &'static [FileType] {
        &[
            Self::Integration,
            Self::Script,
            Self::Playbook,
            Self::Dashboard,
            Self::Classifier,
            Self::Mapper,
            Self::Layout,
            Self::IncidentField,
            Self::IncidentType,
            Self::IndicatorField,
            Self::IndicatorType,
        ]
    }

    /// Stable identifier, also the stem of the type's schema file.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Integration => "integration",
            Self::Script => "script",
            Self::Playbook => "playbook",
            Self::Dashboard => "dashboard",
            Self::Classifier => "classifier",
            Self::Mapper => "mapper",
            Self::Layout => "layout",
            Self::IncidentField => "incidentfield",
            Self::IncidentType => "incidenttype",
            Self::IndicatorField => "indicatorfield",
            Self::IndicatorType => "reputation",
        }
    }

    /// File-name prefix used by the fixture builder and the repository.
    pub fn file_prefix(&self) -> &'static str {
        match self {
            Self::Integration => "integration",
            Self::Script => "script",
            Self::Playbook => "playbook",
            Self::Dashboard => "dashboard",
            Self::Classifier => "classifier",
            Self::Mapper => "classifier-mapper",
            Self::Layout => "layout",
            // Indicator fields share the incident field prefix.
            Self::IncidentField | Self::IndicatorField => "incidentfield",
            Self::IncidentType => "incidenttype",
            Self::IndicatorType => "reputation",
        }
    }

    /// Directory inside a pack that holds this type.
    pub fn pack_dir(&self) -> &'static str {
        match self {
            Self::Integration => constants::INTEGRATIONS_DIR,
            Self::Script => constants::SCRIPTS_DIR,
            Self::Playbook => constants::PLAYBOOKS_DIR,
            Self::Dashboard => constants::DASHBOARDS_DIR,
            Self::Classifier | Self::Mapper => constants::CLASSIFIERS_DIR,
            Self::Layout => constants::LAYOUTS_DIR,
            Self::IncidentField => constants::INCIDENT_FIELDS_DIR,
            Self::IncidentType => constants::INCIDENT_TYPES_DIR,
            Self::IndicatorField => constants::INDICATOR_FIELDS_DIR,
            Self::IndicatorType => constants::INDICATOR_TYPES_DIR,
        }
    }

    /// File name of this type's schema inside a schema directory.
    pub fn schema_file_name(&self) -> String {
        format!("{}.schema.json", self.as_str())
    }

    /// Whether the artifact is a YAML manifest.
    pub fn is_yaml(&self) -> bool {
        matches!(self, Self::Integration | Self::Script | Self::Playbook)
    }

    /// Classify a file by its name and parent directory.
    ///
    /// YAML manifests cannot be classified by name alone; use
    /// [`FileType::find_type`] for those.
    pub fn from_file_name(path: &Path) -> Option<FileType> {
        let name = path.file_name()?.to_str()?;
        if !name.ends_with(".json") {
            return None;
        }
        let parent = path
            .parent()
            .and_then(|p| p.file_name())
            .and_then(|n| n.to_str())
            .unwrap_or("");

        // Longest prefixes first: "classifier-mapper" before "classifier".
        if name.starts_with("classifier-mapper-") || name.starts_with("mapper-") {
            return Some(Self::Mapper);
        }
        if name.starts_with("classifier-") {
            return Some(Self::Classifier);
        }
        if name.starts_with("dashboard-") {
            return Some(Self::Dashboard);
        }
        if name.starts_with("layout-") || name.starts_with("layoutscontainer-") {
            return Some(Self::Layout);
        }
        if name.starts_with("incidenttype-") {
            return Some(Self::IncidentType);
        }
        if name.starts_with("reputation-") {
            return Some(Self::IndicatorType);
        }
        if name.starts_with("indicatorfield-") {
            return Some(Self::IndicatorField);
        }
        if name.starts_with("incidentfield-") {
            return if parent == constants::INDICATOR_FIELDS_DIR {
                Some(Self::IndicatorField)
            } else {
                Some(Self::IncidentField)
            };
        }

        Self::all()
            .iter()
            .copied()
            .filter(|t| !t.is_yaml())
            .find(|t| t.pack_dir() == parent && *t != Self::Mapper)
    }

    /// Classify a parsed YAML manifest by its contents.
    pub fn from_yaml_document(doc: &Document) -> Option<FileType> {
        if doc.get("tasks").is_some_and(Value::is_object) {
            return Some(Self::Playbook);
        }
        match doc.get("script") {
            Some(Value::Object(_)) => return Some(Self::Integration),
            Some(Value::String(_)) => return Some(Self::Script),
            _ => {}
        }
        if doc.contains_key("configuration") {
            return Some(Self::Integration);
        }
        if doc.contains_key("commonfields")
            && matches!(
                doc.get_str("type"),
                Some("python") | Some("javascript") | Some("powershell")
            )
        {
            return Some(Self::Script);
        }
        None
    }

    /// Classify any content file, loading YAML manifests when needed.
    ///
    /// Returns `Ok(None)` for files that are not content artifacts.
    pub fn find_type(path: &Path) -> Result<Option<FileType>, CoreError> {
        match DocumentFormat::from_path(path) {
            Ok(DocumentFormat::Json) => Ok(Self::from_file_name(path)),
            Ok(DocumentFormat::Yaml) => {
                let doc = Document::load(path)?;
                Ok(Self::from_yaml_document(&doc))
            }
            Err(_) => Ok(None),
        }
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FileType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| CoreError::UnknownFileType(s.to_string()))
    }
}
