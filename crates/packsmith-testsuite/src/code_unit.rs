//! # Integrations and Scripts
//!
//! Both live in their own directory (`Integrations/<name>/`,
//! `Scripts/<name>/`) with the same six files: code, manifest, readme,
//! description, changelog, and image.

use std::path::{Path, PathBuf};

use serde_json::{json, Value};

use crate::artifact::{BinaryBased, TextBased, YmlBased};
use crate::error::{io, FixtureError};

/// Contents for a new integration or script. Every part defaults to empty.
#[derive(Debug, Clone, Default)]
pub struct CodeUnitSpec {
    /// Directory and file stem; the pack picks a default when absent.
    pub name: Option<String>,
    pub code: String,
    pub yml: Option<Value>,
    pub readme: String,
    pub description: String,
    pub changelog: String,
    pub image: Vec<u8>,
}

impl CodeUnitSpec {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn with_yml(mut self, yml: Value) -> Self {
        self.yml = Some(yml);
        self
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = code.into();
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct UnitFiles {
    name: String,
    path: PathBuf,
    code: TextBased,
    yml: YmlBased,
    readme: TextBased,
    description: TextBased,
    changelog: TextBased,
    image: BinaryBased,
}

impl UnitFiles {
    fn build(parent: &Path, name: &str, spec: &CodeUnitSpec) -> Result<Self, FixtureError> {
        let path = parent.join(name);
        std::fs::create_dir(&path).map_err(|e| io(&path, e))?;
        let yml = spec.yml.clone().unwrap_or_else(|| json!({}));
        Ok(Self {
            name: name.to_string(),
            code: TextBased::new(&path, &format!("{name}.py"), &spec.code)?,
            yml: YmlBased::new(&path, &format!("{name}.yml"), &yml)?,
            readme: TextBased::new(&path, "README.md", &spec.readme)?,
            description: TextBased::new(&path, &format!("{name}_description.md"), &spec.description)?,
            changelog: TextBased::new(&path, "CHANGELOG.md", &spec.changelog)?,
            image: BinaryBased::new(&path, &format!("{name}_image.png"), &spec.image)?,
            path,
        })
    }
}

macro_rules! code_unit_accessors {
    ($ty:ident) => {
        impl $ty {
            pub fn name(&self) -> &str {
                &self.files.name
            }

            /// The unit's directory.
            pub fn path(&self) -> &Path {
                &self.files.path
            }

            pub fn code(&self) -> &TextBased {
                &self.files.code
            }

            pub fn yml(&self) -> &YmlBased {
                &self.files.yml
            }

            pub fn readme(&self) -> &TextBased {
                &self.files.readme
            }

            pub fn description(&self) -> &TextBased {
                &self.files.description
            }

            pub fn changelog(&self) -> &TextBased {
                &self.files.changelog
            }

            pub fn image(&self) -> &BinaryBased {
                &self.files.image
            }
        }
    };
}

/// An integration directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Integration {
    files: UnitFiles,
}

code_unit_accessors!(Integration);

impl Integration {
    pub(crate) fn build(parent: &Path, name: &str, spec: &CodeUnitSpec) -> Result<Self, FixtureError> {
        Ok(Self {
            files: UnitFiles::build(parent, name, spec)?,
        })
    }

    /// Minimal manifest for an integration with one command.
    pub fn default_yml(name: &str) -> Value {
        json!({
            "commonfields": { "id": name, "version": -1 },
            "name": name,
            "display": name,
            "category": "Utilities",
            "description": "",
            "configuration": [
                { "name": "url", "display": "Server URL", "type": 0, "required": true }
            ],
            "script": {
                "script": "",
                "type": "python",
                "subtype": "python3",
                "commands": [
                    { "name": "test-command", "description": "", "arguments": [], "outputs": [] }
                ]
            },
            "tests": ["No tests (auto formatted)"]
        })
    }

    /// Overwrite the manifest with [`Integration::default_yml`].
    pub fn create_default_integration(&self) -> Result<(), FixtureError> {
        self.files.yml.write_dict(&Self::default_yml(self.name()))
    }
}

/// A script directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Script {
    files: UnitFiles,
}

code_unit_accessors!(Script);

impl Script {
    pub(crate) fn build(parent: &Path, name: &str, spec: &CodeUnitSpec) -> Result<Self, FixtureError> {
        Ok(Self {
            files: UnitFiles::build(parent, name, spec)?,
        })
    }

    /// Minimal manifest for a Python script.
    pub fn default_yml(name: &str) -> Value {
        json!({
            "commonfields": { "id": name, "version": -1 },
            "name": name,
            "script": "",
            "type": "python",
            "subtype": "python3",
            "tags": [],
            "comment": "",
            "enabled": true,
            "args": [],
            "outputs": [],
            "scripttarget": 0,
            "runonce": false,
            "tests": ["No tests (auto formatted)"]
        })
    }

    /// Overwrite the manifest with [`Script::default_yml`].
    pub fn create_default_script(&self) -> Result<(), FixtureError> {
        self.files.yml.write_dict(&Self::default_yml(self.name()))
    }
}
