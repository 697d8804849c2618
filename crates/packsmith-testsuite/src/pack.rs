//! # Pack Fixture
//!
//! A pack directory with the standard sub-folders and top-level files,
//! plus every artifact created in it. Default artifact names come from an
//! explicit per-kind counter that advances on every create call, named or
//! not. A default name whose file already exists is skipped, and an
//! explicit name that is already taken is an error, so no create call
//! overwrites an earlier artifact.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use packsmith_core::constants::{
    CLASSIFIERS_DIR, DASHBOARDS_DIR, INCIDENT_FIELDS_DIR, INCIDENT_TYPES_DIR,
    INDICATOR_FIELDS_DIR, INDICATOR_TYPES_DIR, INTEGRATIONS_DIR, LAYOUTS_DIR, PACK_IGNORE_FILE,
    PACK_METADATA_FILE, PACK_README_FILE, PLAYBOOKS_DIR, RELEASE_NOTES_DIR, SCRIPTS_DIR,
};
use serde_json::{json, Value};

use crate::artifact::{JsonBased, TextBased};
use crate::code_unit::{CodeUnitSpec, Integration, Script};
use crate::error::{io, FixtureError};
use crate::secrets::Secrets;

/// Sub-directories every pack starts with.
pub const PACK_DIRS: &[&str] = &[
    INTEGRATIONS_DIR,
    SCRIPTS_DIR,
    PLAYBOOKS_DIR,
    CLASSIFIERS_DIR,
    DASHBOARDS_DIR,
    INCIDENT_FIELDS_DIR,
    INCIDENT_TYPES_DIR,
    INDICATOR_FIELDS_DIR,
    INDICATOR_TYPES_DIR,
    LAYOUTS_DIR,
    RELEASE_NOTES_DIR,
];

/// JSON artifact kinds a pack can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JsonArtifact {
    Classifier,
    Mapper,
    Dashboard,
    IncidentField,
    IncidentType,
    IndicatorField,
    IndicatorType,
    Layout,
}

impl JsonArtifact {
    /// File name prefix.
    pub fn prefix(self) -> &'static str {
        match self {
            Self::Classifier => "classifier",
            Self::Mapper => "classifier-mapper",
            Self::Dashboard => "dashboard",
            Self::IncidentField | Self::IndicatorField => "incidentfield",
            Self::IncidentType => "incidenttype",
            Self::IndicatorType => "reputation",
            Self::Layout => "layout",
        }
    }

    /// Directory inside the pack.
    pub fn dir(self) -> &'static str {
        match self {
            Self::Classifier | Self::Mapper => CLASSIFIERS_DIR,
            Self::Dashboard => DASHBOARDS_DIR,
            Self::IncidentField => INCIDENT_FIELDS_DIR,
            Self::IncidentType => INCIDENT_TYPES_DIR,
            Self::IndicatorField => INDICATOR_FIELDS_DIR,
            Self::IndicatorType => INDICATOR_TYPES_DIR,
            Self::Layout => LAYOUTS_DIR,
        }
    }

    /// Stem of default names, e.g. `incident_field_3`.
    pub fn default_stem(self) -> &'static str {
        match self {
            Self::Classifier => "classifier",
            Self::Mapper => "mapper",
            Self::Dashboard => "dashboard",
            Self::IncidentField => "incident_field",
            Self::IncidentType => "incident_type",
            Self::IndicatorField => "indicator_field",
            Self::IndicatorType => "indicator_type",
            Self::Layout => "layout",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Kind {
    Json(JsonArtifact),
    Integration,
    Script,
}

/// A content pack on disk.
#[derive(Debug)]
pub struct Pack {
    name: String,
    path: PathBuf,
    counters: HashMap<Kind, usize>,

    pub integrations: Vec<Integration>,
    pub scripts: Vec<Script>,
    pub classifiers: Vec<JsonBased>,
    pub mappers: Vec<JsonBased>,
    pub dashboards: Vec<JsonBased>,
    pub incident_fields: Vec<JsonBased>,
    /// Companion `_CHANGELOG.md` files of incident fields.
    pub incident_field_changelogs: Vec<TextBased>,
    pub incident_types: Vec<JsonBased>,
    pub indicator_fields: Vec<JsonBased>,
    pub indicator_types: Vec<JsonBased>,
    pub layouts: Vec<JsonBased>,
    pub release_notes: Vec<TextBased>,

    pub secrets: Secrets,
    pub pack_ignore: TextBased,
    pub readme: TextBased,
    pub pack_metadata: JsonBased,
}

impl Pack {
    /// Create `packs_dir/name` and its standard layout.
    ///
    /// # Errors
    ///
    /// Fails if the pack directory already exists or cannot be created.
    pub fn new(packs_dir: &Path, name: &str) -> Result<Self, FixtureError> {
        let path = packs_dir.join(name);
        std::fs::create_dir(&path).map_err(|e| io(&path, e))?;
        for dir in PACK_DIRS {
            let sub = path.join(dir);
            std::fs::create_dir(&sub).map_err(|e| io(&sub, e))?;
        }
        tracing::debug!(pack = %name, path = %path.display(), "created pack fixture");

        Ok(Self {
            name: name.to_string(),
            counters: HashMap::new(),
            integrations: Vec::new(),
            scripts: Vec::new(),
            classifiers: Vec::new(),
            mappers: Vec::new(),
            dashboards: Vec::new(),
            incident_fields: Vec::new(),
            incident_field_changelogs: Vec::new(),
            incident_types: Vec::new(),
            indicator_fields: Vec::new(),
            indicator_types: Vec::new(),
            layouts: Vec::new(),
            release_notes: Vec::new(),
            secrets: Secrets::new(&path)?,
            pack_ignore: TextBased::new(&path, PACK_IGNORE_FILE, "")?,
            readme: TextBased::new(&path, PACK_README_FILE, "")?,
            pack_metadata: JsonBased::new(&path, PACK_METADATA_FILE, "", &json!({}))?,
            path,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current counter value for `kind`, then advance it.
    fn next_index(&mut self, kind: Kind) -> usize {
        let counter = self.counters.entry(kind).or_insert(0);
        let index = *counter;
        *counter += 1;
        index
    }

    /// `<stem>_<n>` for the first counter value whose file is not taken.
    /// Every probed value is consumed.
    fn next_default_name(
        &mut self,
        kind: Kind,
        dir: &Path,
        stem: &str,
        file_name: impl Fn(&str) -> String,
    ) -> String {
        loop {
            let name = format!("{stem}_{}", self.next_index(kind));
            if !dir.join(file_name(&name)).exists() {
                return name;
            }
            tracing::debug!(name = %name, dir = %dir.display(), "default name taken, skipping");
        }
    }

    fn artifacts_mut(&mut self, kind: JsonArtifact) -> &mut Vec<JsonBased> {
        match kind {
            JsonArtifact::Classifier => &mut self.classifiers,
            JsonArtifact::Mapper => &mut self.mappers,
            JsonArtifact::Dashboard => &mut self.dashboards,
            JsonArtifact::IncidentField => &mut self.incident_fields,
            JsonArtifact::IncidentType => &mut self.incident_types,
            JsonArtifact::IndicatorField => &mut self.indicator_fields,
            JsonArtifact::IndicatorType => &mut self.indicator_types,
            JsonArtifact::Layout => &mut self.layouts,
        }
    }

    /// Write a JSON artifact of `kind` and record it.
    pub fn create_json_artifact(
        &mut self,
        kind: JsonArtifact,
        name: Option<&str>,
        content: Option<Value>,
    ) -> Result<&mut JsonBased, FixtureError> {
        let dir = self.path.join(kind.dir());
        let file_name = |name: &str| JsonBased::file_name(name, kind.prefix());
        let name = match name {
            Some(name) => {
                self.next_index(Kind::Json(kind));
                let path = dir.join(file_name(name));
                if path.exists() {
                    return Err(FixtureError::AlreadyExists { path });
                }
                name.to_string()
            }
            None => self.next_default_name(Kind::Json(kind), &dir, kind.default_stem(), file_name),
        };
        let content = content.unwrap_or_else(|| json!({}));
        let artifact = JsonBased::new(&dir, &name, kind.prefix(), &content)?;

        let list = self.artifacts_mut(kind);
        list.push(artifact);
        let last = list.len() - 1;
        Ok(&mut list[last])
    }

    pub fn create_classifier(
        &mut self,
        name: Option<&str>,
        content: Option<Value>,
    ) -> Result<&mut JsonBased, FixtureError> {
        self.create_json_artifact(JsonArtifact::Classifier, name, content)
    }

    pub fn create_mapper(
        &mut self,
        name: Option<&str>,
        content: Option<Value>,
    ) -> Result<&mut JsonBased, FixtureError> {
        self.create_json_artifact(JsonArtifact::Mapper, name, content)
    }

    pub fn create_dashboard(
        &mut self,
        name: Option<&str>,
        content: Option<Value>,
    ) -> Result<&mut JsonBased, FixtureError> {
        self.create_json_artifact(JsonArtifact::Dashboard, name, content)
    }

    /// Create an incident field, optionally with an empty
    /// `<file stem>_CHANGELOG.md` next to it.
    pub fn create_incident_field(
        &mut self,
        name: Option<&str>,
        content: Option<Value>,
        release_notes: bool,
    ) -> Result<&mut JsonBased, FixtureError> {
        let stem = self
            .create_json_artifact(JsonArtifact::IncidentField, name, content)?
            .stem()
            .to_string();
        if release_notes {
            let changelog = TextBased::new(
                &self.path.join(INCIDENT_FIELDS_DIR),
                &format!("{stem}_CHANGELOG.md"),
                "",
            )?;
            self.incident_field_changelogs.push(changelog);
        }
        let last = self.incident_fields.len() - 1;
        Ok(&mut self.incident_fields[last])
    }

    pub fn create_incident_type(
        &mut self,
        name: Option<&str>,
        content: Option<Value>,
    ) -> Result<&mut JsonBased, FixtureError> {
        self.create_json_artifact(JsonArtifact::IncidentType, name, content)
    }

    pub fn create_indicator_field(
        &mut self,
        name: Option<&str>,
        content: Option<Value>,
    ) -> Result<&mut JsonBased, FixtureError> {
        self.create_json_artifact(JsonArtifact::IndicatorField, name, content)
    }

    pub fn create_indicator_type(
        &mut self,
        name: Option<&str>,
        content: Option<Value>,
    ) -> Result<&mut JsonBased, FixtureError> {
        self.create_json_artifact(JsonArtifact::IndicatorType, name, content)
    }

    pub fn create_layout(
        &mut self,
        name: Option<&str>,
        content: Option<Value>,
    ) -> Result<&mut JsonBased, FixtureError> {
        self.create_json_artifact(JsonArtifact::Layout, name, content)
    }

    /// Write `ReleaseNotes/<version>.md`.
    pub fn create_release_notes(
        &mut self,
        version: &str,
        content: &str,
    ) -> Result<&mut TextBased, FixtureError> {
        let notes = TextBased::new(
            &self.path.join(RELEASE_NOTES_DIR),
            &format!("{version}.md"),
            content,
        )?;
        self.release_notes.push(notes);
        let last = self.release_notes.len() - 1;
        Ok(&mut self.release_notes[last])
    }

    pub fn create_integration(&mut self, spec: CodeUnitSpec) -> Result<&mut Integration, FixtureError> {
        let dir = self.path.join(INTEGRATIONS_DIR);
        let name = match &spec.name {
            Some(name) => {
                self.next_index(Kind::Integration);
                name.clone()
            }
            None => self.next_default_name(Kind::Integration, &dir, "integration", str::to_string),
        };
        let integration = Integration::build(&dir, &name, &spec)?;
        self.integrations.push(integration);
        let last = self.integrations.len() - 1;
        Ok(&mut self.integrations[last])
    }

    pub fn create_script(&mut self, spec: CodeUnitSpec) -> Result<&mut Script, FixtureError> {
        let dir = self.path.join(SCRIPTS_DIR);
        let name = match &spec.name {
            Some(name) => {
                self.next_index(Kind::Script);
                name.clone()
            }
            None => self.next_default_name(Kind::Script, &dir, "script", str::to_string),
        };
        let script = Script::build(&dir, &name, &spec)?;
        self.scripts.push(script);
        let last = self.scripts.len() - 1;
        Ok(&mut self.scripts[last])
    }

    /// `sample_script` with a default manifest.
    pub fn create_test_script(&mut self) -> Result<&mut Script, FixtureError> {
        let script = self.create_script(CodeUnitSpec::named("sample_script"))?;
        script.create_default_script()?;
        Ok(script)
    }
}
