//! # packsmith-cli: Content Pack Toolkit CLI
//!
//! Provides the `packsmith` command-line interface.
//!
//! ## Subcommands
//!
//! - `packsmith format`: Normalize content files, then validate them.
//! - `packsmith validate`: Validate content files without changing them.
//! - `packsmith create-id-set`: Index every content item in a repository.
//!
//! ```bash
//! packsmith format -i Packs/Phishing
//! packsmith format -i triage.yml -o Packs/Phishing/Playbooks/playbook-Triage.yml --from-version 6.0.0
//! packsmith validate -i Packs/Phishing/Dashboards
//! packsmith create-id-set --fail-duplicates
//! ```

pub mod format;
pub mod id_set;
pub mod validate;

use std::path::{Path, PathBuf};

use packsmith_format::ManagerReport;

/// Directory holding the content schemas.
pub const SCHEMAS_DIR: &str = "schemas";

/// Resolve a path that may be relative to the repository root.
///
/// Absolute paths are returned as-is. A relative path that exists under
/// `repo_root` resolves there; anything else stays relative to the
/// current directory.
pub fn resolve_path(path: &Path, repo_root: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    let repo_relative = repo_root.join(path);
    if repo_relative.exists() {
        repo_relative
    } else {
        path.to_path_buf()
    }
}

/// Walk up from `start` to the first directory containing `schemas/`.
pub fn find_repo_root(start: &Path) -> Option<PathBuf> {
    let mut dir = start;
    loop {
        if dir.join(SCHEMAS_DIR).is_dir() {
            return Some(dir.to_path_buf());
        }
        dir = dir.parent()?;
    }
}

/// The schema directory to use: `--schema-dir` if given, else
/// `<repo_root>/schemas` when it exists.
pub fn resolve_schema_dir(explicit: Option<&Path>, repo_root: &Path) -> Option<PathBuf> {
    if let Some(dir) = explicit {
        return Some(resolve_path(dir, repo_root));
    }
    let default = repo_root.join(SCHEMAS_DIR);
    if default.is_dir() {
        Some(default)
    } else {
        tracing::warn!("no schema directory found, structural checks are disabled");
        None
    }
}

/// Print one line per processed file and a summary.
pub fn print_report(report: &ManagerReport) {
    for file in &report.files {
        println!(
            "  [{}] format: {:<7} validation: {:<7} {}",
            file.file_type,
            file.outcome.format,
            file.outcome.validation,
            file.path.display()
        );
    }
    println!();
    println!(
        "{} file(s) processed, {} failed, {} skipped",
        report.files.len(),
        report.error_count(),
        report.skipped.len()
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_path_absolute_path_returned_as_is() {
        let result = resolve_path(Path::new("/absolute/Packs/x.yml"), Path::new("/some/repo"));
        assert_eq!(result, PathBuf::from("/absolute/Packs/x.yml"));
    }

    #[test]
    fn resolve_path_prefers_repo_root() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.json"), b"{}").unwrap();
        assert_eq!(resolve_path(Path::new("a.json"), dir.path()), dir.path().join("a.json"));
        assert_eq!(
            resolve_path(Path::new("missing.json"), dir.path()),
            PathBuf::from("missing.json")
        );
    }

    #[test]
    fn repo_root_found_from_nested_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("schemas")).unwrap();
        let nested = dir.path().join("Packs/P/Scripts");
        std::fs::create_dir_all(&nested).unwrap();
        assert_eq!(find_repo_root(&nested), Some(dir.path().to_path_buf()));
    }

    #[test]
    fn explicit_schema_dir_wins() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("schemas")).unwrap();
        let custom = dir.path().join("custom");
        assert_eq!(resolve_schema_dir(Some(&custom), dir.path()), Some(custom));
        assert_eq!(
            resolve_schema_dir(None, dir.path()),
            Some(dir.path().join("schemas"))
        );
    }

    #[test]
    fn missing_schema_dir_is_none() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(resolve_schema_dir(None, dir.path()), None);
    }
}
