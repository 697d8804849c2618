use std::path::{Path, PathBuf};

use packsmith_core::CoreError;
use thiserror::Error;

/// Failure to lay out or read back a fixture.
#[derive(Error, Debug)]
pub enum FixtureError {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Core(#[from] CoreError),

    /// An explicitly named artifact would overwrite an existing file.
    #[error("{path} already exists")]
    AlreadyExists { path: PathBuf },

    /// JSON and YAML artifacts hold a mapping at the top level.
    #[error("content for {path} must be a mapping")]
    NotAMapping { path: PathBuf },
}

pub(crate) fn io(path: &Path, source: std::io::Error) -> FixtureError {
    FixtureError::Io {
        path: path.to_path_buf(),
        source,
    }
}
