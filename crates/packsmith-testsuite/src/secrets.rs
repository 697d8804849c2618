//! The pack's `.secrets-ignore` allow-list.

use std::path::{Path, PathBuf};

use packsmith_core::constants::SECRETS_IGNORE_FILE;

use crate::error::{io, FixtureError};

/// Values the secrets scanner should not flag, one per line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Secrets {
    path: PathBuf,
}

impl Secrets {
    /// Create an empty `.secrets-ignore` in `pack_dir`.
    pub fn new(pack_dir: &Path) -> Result<Self, FixtureError> {
        let secrets = Self {
            path: pack_dir.join(SECRETS_IGNORE_FILE),
        };
        secrets.write_secrets::<&str>(&[])?;
        Ok(secrets)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replace the allow-list.
    pub fn write_secrets<S: AsRef<str>>(&self, entries: &[S]) -> Result<(), FixtureError> {
        let mut body = String::new();
        for entry in entries {
            body.push_str(entry.as_ref());
            body.push('\n');
        }
        std::fs::write(&self.path, body).map_err(|e| io(&self.path, e))
    }

    pub fn read_secrets(&self) -> Result<Vec<String>, FixtureError> {
        let body = std::fs::read_to_string(&self.path).map_err(|e| io(&self.path, e))?;
        Ok(body
            .lines()
            .filter(|l| !l.trim().is_empty())
            .map(str::to_string)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_empty_and_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let secrets = Secrets::new(dir.path()).unwrap();
        assert!(secrets.read_secrets().unwrap().is_empty());
        secrets
            .write_secrets(&["https://example.com", "10.0.0.1"])
            .unwrap();
        assert_eq!(
            secrets.read_secrets().unwrap(),
            vec!["https://example.com".to_string(), "10.0.0.1".to_string()]
        );
    }
}
