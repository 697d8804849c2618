//! # ID Set Aggregate
//!
//! One sorted list of entries per content type. Section names in the saved
//! JSON follow the platform's `id_set.json` layout.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use packsmith_core::constants::PACKS_DIR;
use packsmith_core::{Document, FileType};
use serde::{Deserialize, Serialize};

use crate::entry::IdSetEntry;
use crate::error::IdSetError;
use crate::extract::extract_entry;

/// An id claimed by more than one item with overlapping versions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Duplicate {
    /// Section the id was found in, e.g. `integrations`.
    pub section: &'static str,
    pub id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdSet {
    #[serde(default)]
    pub scripts: Vec<IdSetEntry>,
    #[serde(default)]
    pub playbooks: Vec<IdSetEntry>,
    #[serde(default)]
    pub integrations: Vec<IdSetEntry>,
    #[serde(rename = "Classifiers", default)]
    pub classifiers: Vec<IdSetEntry>,
    #[serde(rename = "Dashboards", default)]
    pub dashboards: Vec<IdSetEntry>,
    #[serde(rename = "IncidentFields", default)]
    pub incident_fields: Vec<IdSetEntry>,
    #[serde(rename = "IncidentTypes", default)]
    pub incident_types: Vec<IdSetEntry>,
    #[serde(rename = "IndicatorFields", default)]
    pub indicator_fields: Vec<IdSetEntry>,
    #[serde(rename = "IndicatorTypes", default)]
    pub indicator_types: Vec<IdSetEntry>,
    #[serde(rename = "Layouts", default)]
    pub layouts: Vec<IdSetEntry>,
    #[serde(rename = "Mappers", default)]
    pub mappers: Vec<IdSetEntry>,
}

/// Section name in `id_set.json`.
pub fn section_name(file_type: FileType) -> &'static str {
    match file_type {
        FileType::Integration => "integrations",
        FileType::Script => "scripts",
        FileType::Playbook => "playbooks",
        FileType::Dashboard => "Dashboards",
        FileType::Classifier => "Classifiers",
        FileType::Mapper => "Mappers",
        FileType::Layout => "Layouts",
        FileType::IncidentField => "IncidentFields",
        FileType::IncidentType => "IncidentTypes",
        FileType::IndicatorField => "IndicatorFields",
        FileType::IndicatorType => "IndicatorTypes",
    }
}

impl IdSet {
    /// Index every content item under `content_root/Packs`.
    ///
    /// # Errors
    ///
    /// Fails if a directory cannot be read or a content file cannot be
    /// parsed.
    pub fn build(content_root: &Path) -> Result<Self, IdSetError> {
        let mut id_set = Self::default();
        let packs_dir = content_root.join(PACKS_DIR);
        if !packs_dir.is_dir() {
            tracing::warn!(dir = %packs_dir.display(), "no packs directory, id set is empty");
            return Ok(id_set);
        }

        for pack_dir in sorted_entries(&packs_dir)? {
            if !pack_dir.is_dir() {
                continue;
            }
            let pack = pack_dir.file_name().and_then(OsStr::to_str).map(str::to_string);
            let mut files = Vec::new();
            collect_files(&pack_dir, &mut files)?;
            files.sort();

            for path in files {
                let Some(file_type) = FileType::find_type(&path)? else {
                    continue;
                };
                let document = Document::load(&path)?;
                let relative = path.strip_prefix(content_root).unwrap_or(path.as_path());
                let file_path = relative.to_string_lossy().into_owned();
                if let Some(entry) = extract_entry(file_type, &document, &file_path, pack.as_deref()) {
                    tracing::debug!(id = %entry.id, file_type = %file_type, "indexed");
                    id_set.entries_mut(file_type).push(entry);
                }
            }
        }

        for file_type in FileType::all() {
            id_set
                .entries_mut(*file_type)
                .sort_by_key(|entry| entry.id.to_lowercase());
        }
        tracing::info!(items = id_set.len(), "id set built");
        Ok(id_set)
    }

    pub fn entries(&self, file_type: FileType) -> &[IdSetEntry] {
        match file_type {
            FileType::Integration => &self.integrations,
            FileType::Script => &self.scripts,
            FileType::Playbook => &self.playbooks,
            FileType::Dashboard => &self.dashboards,
            FileType::Classifier => &self.classifiers,
            FileType::Mapper => &self.mappers,
            FileType::Layout => &self.layouts,
            FileType::IncidentField => &self.incident_fields,
            FileType::IncidentType => &self.incident_types,
            FileType::IndicatorField => &self.indicator_fields,
            FileType::IndicatorType => &self.indicator_types,
        }
    }

    fn entries_mut(&mut self, file_type: FileType) -> &mut Vec<IdSetEntry> {
        match file_type {
            FileType::Integration => &mut self.integrations,
            FileType::Script => &mut self.scripts,
            FileType::Playbook => &mut self.playbooks,
            FileType::Dashboard => &mut self.dashboards,
            FileType::Classifier => &mut self.classifiers,
            FileType::Mapper => &mut self.mappers,
            FileType::Layout => &mut self.layouts,
            FileType::IncidentField => &mut self.incident_fields,
            FileType::IncidentType => &mut self.incident_types,
            FileType::IndicatorField => &mut self.indicator_fields,
            FileType::IndicatorType => &mut self.indicator_types,
        }
    }

    /// Entry with `id` in the given section.
    pub fn find(&self, file_type: FileType, id: &str) -> Option<&IdSetEntry> {
        self.entries(file_type).iter().find(|e| e.id == id)
    }

    /// Total number of entries.
    pub fn len(&self) -> usize {
        FileType::all().iter().map(|t| self.entries(*t).len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Ids claimed more than once within a section by items whose version
    /// ranges overlap. Incident and indicator fields share one id space
    /// and are also checked together. Layouts of different kinds never
    /// clash.
    pub fn find_duplicates(&self) -> Vec<Duplicate> {
        let mut duplicates = Vec::new();
        for file_type in FileType::all() {
            let section = section_name(*file_type);
            let entries: Vec<&IdSetEntry> = self.entries(*file_type).iter().collect();
            for id in duplicate_ids(&entries, *file_type == FileType::Layout) {
                duplicates.push(Duplicate { section, id });
            }
        }

        let fields: Vec<&IdSetEntry> = self
            .incident_fields
            .iter()
            .chain(self.indicator_fields.iter())
            .collect();
        for id in duplicate_ids(&fields, false) {
            if !duplicates.iter().any(|d| d.id == id && d.section.ends_with("Fields")) {
                duplicates.push(Duplicate {
                    section: "IncidentAndIndicatorFields",
                    id,
                });
            }
        }

        for duplicate in &duplicates {
            tracing::warn!(section = duplicate.section, id = %duplicate.id, "duplicate id");
        }
        duplicates
    }

    /// Write the set as 4-space indented JSON, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<(), IdSetError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| IdSetError::io(parent, e))?;
        }
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut ser)?;
        buf.push(b'\n');
        std::fs::write(path, buf).map_err(|e| IdSetError::io(path, e))?;
        tracing::info!(path = %path.display(), "id set saved");
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self, IdSetError> {
        let raw = std::fs::read_to_string(path).map_err(|e| IdSetError::io(path, e))?;
        Ok(serde_json::from_str(&raw)?)
    }
}

fn duplicate_ids(entries: &[&IdSetEntry], distinguish_kind: bool) -> Vec<String> {
    let mut ids: Vec<String> = Vec::new();
    for (i, a) in entries.iter().enumerate() {
        for b in &entries[i + 1..] {
            if a.id != b.id || ids.contains(&a.id) {
                continue;
            }
            if distinguish_kind && a.kind != b.kind {
                continue;
            }
            if a.name != b.name {
                tracing::warn!(id = %a.id, first = %a.name, second = %b.name, "same id, different names");
            }
            if a.overlaps(b) {
                ids.push(a.id.clone());
            }
        }
    }
    ids.sort();
    ids
}

fn sorted_entries(dir: &Path) -> Result<Vec<PathBuf>, IdSetError> {
    let mut paths = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(|e| IdSetError::io(dir, e))? {
        paths.push(entry.map_err(|e| IdSetError::io(dir, e))?.path());
    }
    paths.sort();
    Ok(paths)
}

fn collect_files(dir: &Path, files: &mut Vec<PathBuf>) -> Result<(), IdSetError> {
    for path in sorted_entries(dir)? {
        if path.is_dir() {
            collect_files(&path, files)?;
        } else {
            files.push(path);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str, from: Option<&str>, to: Option<&str>) -> IdSetEntry {
        let mut e = IdSetEntry::new(id, id, format!("Packs/P/{id}.json"));
        e.fromversion = from.map(str::to_string);
        e.toversion = to.map(str::to_string);
        e
    }

    #[test]
    fn overlapping_duplicates_reported() {
        let mut set = IdSet::default();
        set.scripts = vec![entry("a", None, None), entry("a", Some("5.0.0"), None), entry("b", None, None)];
        assert_eq!(
            set.find_duplicates(),
            vec![Duplicate { section: "scripts", id: "a".to_string() }]
        );
    }

    #[test]
    fn versioned_replacements_are_not_duplicates() {
        let mut set = IdSet::default();
        set.scripts = vec![entry("a", None, Some("5.9.9")), entry("a", Some("6.0.0"), None)];
        assert!(set.find_duplicates().is_empty());
    }

    #[test]
    fn layouts_of_different_kinds_coexist() {
        let mut set = IdSet::default();
        let mut details = entry("phish", None, None);
        details.kind = Some("details".to_string());
        let mut edit = entry("phish", None, None);
        edit.kind = Some("edit".to_string());
        set.layouts = vec![details, edit];
        assert!(set.find_duplicates().is_empty());
    }

    #[test]
    fn incident_and_indicator_fields_share_ids() {
        let mut set = IdSet::default();
        set.incident_fields = vec![entry("score", None, None)];
        set.indicator_fields = vec![entry("score", None, None)];
        assert_eq!(
            set.find_duplicates(),
            vec![Duplicate { section: "IncidentAndIndicatorFields", id: "score".to_string() }]
        );
    }

    #[test]
    fn save_uses_platform_section_names() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Tests/id_set.json");
        let mut set = IdSet::default();
        set.layouts = vec![entry("l", None, None)];
        set.save(&path).unwrap();
        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\n    \"Layouts\": ["));
        assert!(raw.ends_with("}\n"));
        assert_eq!(IdSet::load(&path).unwrap(), set);
    }

    #[test]
    fn missing_packs_dir_is_empty_set() {
        let dir = tempfile::tempdir().unwrap();
        assert!(IdSet::build(dir.path()).unwrap().is_empty());
    }
}
