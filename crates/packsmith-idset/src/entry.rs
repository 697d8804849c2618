use serde::{Deserialize, Serialize};

use crate::version::{ranges_overlap, ContentVersion, DEFAULT_FROM_VERSION, DEFAULT_TO_VERSION};

/// One content item in the ID set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdSetEntry {
    pub id: String,
    pub name: String,
    /// Path relative to the content root.
    pub file_path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fromversion: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub toversion: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pack: Option<String>,
    /// Layout kind (`details`, `edit`, ...); layouts of different kinds may
    /// share an id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Integration command names.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub commands: Vec<String>,
    /// Scripts a script must run with.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub depends_on: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub implementing_scripts: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub implementing_playbooks: Vec<String>,
}

impl IdSetEntry {
    pub fn new(id: impl Into<String>, name: impl Into<String>, file_path: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            file_path: file_path.into(),
            fromversion: None,
            toversion: None,
            pack: None,
            kind: None,
            commands: Vec::new(),
            depends_on: Vec::new(),
            implementing_scripts: Vec::new(),
            implementing_playbooks: Vec::new(),
        }
    }

    pub fn from_version(&self) -> ContentVersion {
        ContentVersion::parse(self.fromversion.as_deref().unwrap_or(DEFAULT_FROM_VERSION))
    }

    pub fn to_version(&self) -> ContentVersion {
        ContentVersion::parse(self.toversion.as_deref().unwrap_or(DEFAULT_TO_VERSION))
    }

    /// Whether both entries can be active on the same platform version.
    pub fn overlaps(&self, other: &IdSetEntry) -> bool {
        let (a_from, a_to) = (self.from_version(), self.to_version());
        let (b_from, b_to) = (other.from_version(), other.to_version());
        ranges_overlap((&a_from, &a_to), (&b_from, &b_to))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(from: Option<&str>, to: Option<&str>) -> IdSetEntry {
        let mut e = IdSetEntry::new("x", "x", "Packs/P/x.json");
        e.fromversion = from.map(str::to_string);
        e.toversion = to.map(str::to_string);
        e
    }

    #[test]
    fn unbounded_entries_overlap() {
        assert!(entry(None, None).overlaps(&entry(None, None)));
    }

    #[test]
    fn split_ranges_do_not_overlap() {
        let old = entry(None, Some("5.9.9"));
        let new = entry(Some("6.0.0"), None);
        assert!(!old.overlaps(&new));
        assert!(!new.overlaps(&old));
    }

    #[test]
    fn empty_lists_not_serialized() {
        let json = serde_json::to_value(entry(None, None)).unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj.len(), 3);
        assert!(!obj.contains_key("commands"));
    }
}
