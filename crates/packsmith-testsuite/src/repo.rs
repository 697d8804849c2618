//! A content repository root holding `Packs/`.

use std::path::{Path, PathBuf};

use packsmith_core::constants::PACKS_DIR;

use crate::error::{io, FixtureError};
use crate::pack::Pack;

/// Directory, relative to the repository root, holding the ID set.
pub const TESTS_DIR: &str = "Tests";
pub const ID_SET_FILE: &str = "id_set.json";

#[derive(Debug)]
pub struct Repo {
    path: PathBuf,
    packs_dir: PathBuf,
    pub packs: Vec<Pack>,
}

impl Repo {
    /// Create `root/Packs` (and `root` itself if needed).
    pub fn new(root: impl Into<PathBuf>) -> Result<Self, FixtureError> {
        let path = root.into();
        let packs_dir = path.join(PACKS_DIR);
        std::fs::create_dir_all(&packs_dir).map_err(|e| io(&packs_dir, e))?;
        Ok(Self {
            path,
            packs_dir,
            packs: Vec::new(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn packs_dir(&self) -> &Path {
        &self.packs_dir
    }

    pub fn create_pack(&mut self, name: &str) -> Result<&mut Pack, FixtureError> {
        self.packs.push(Pack::new(&self.packs_dir, name)?);
        let last = self.packs.len() - 1;
        Ok(&mut self.packs[last])
    }

    /// Where the ID set for this repository is written.
    pub fn id_set_path(&self) -> PathBuf {
        self.path.join(TESTS_DIR).join(ID_SET_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packs_created_under_packs_dir() {
        let dir = tempfile::tempdir().unwrap();
        let mut repo = Repo::new(dir.path().join("content")).unwrap();
        let pack = repo.create_pack("Malware").unwrap();
        assert_eq!(pack.path(), dir.path().join("content/Packs/Malware"));
        assert_eq!(repo.packs.len(), 1);
        assert_eq!(
            repo.id_set_path(),
            dir.path().join("content/Tests/id_set.json")
        );
    }

    #[test]
    fn duplicate_pack_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let mut repo = Repo::new(dir.path()).unwrap();
        repo.create_pack("A").unwrap();
        assert!(repo.create_pack("A").is_err());
        assert_eq!(repo.packs.len(), 1);
    }
}
