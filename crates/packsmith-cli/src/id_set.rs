//! # Create-ID-Set Subcommand
//!
//! Indexes every content item under `<input>/Packs` and writes the result
//! to `<input>/Tests/id_set.json` unless `--output` says otherwise.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use packsmith_idset::IdSet;

use crate::resolve_path;

pub const DEFAULT_ID_SET_PATH: &str = "Tests/id_set.json";

/// Arguments for the create-id-set subcommand.
#[derive(Args, Debug)]
pub struct IdSetArgs {
    /// Content repository root (the directory holding `Packs/`).
    #[arg(short, long, default_value = ".")]
    pub input: PathBuf,

    /// Where to write the ID set.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Exit with status 1 when duplicate ids are found.
    #[arg(long)]
    pub fail_duplicates: bool,
}

/// Execute the create-id-set subcommand.
pub fn run_create_id_set(args: &IdSetArgs, repo_root: &Path) -> Result<u8> {
    let content_root = resolve_path(&args.input, repo_root);
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| content_root.join(DEFAULT_ID_SET_PATH));

    let id_set = IdSet::build(&content_root)
        .with_context(|| format!("failed to index {}", content_root.display()))?;
    id_set
        .save(&output)
        .with_context(|| format!("failed to write {}", output.display()))?;
    println!("ID set with {} item(s) written to {}", id_set.len(), output.display());

    let duplicates = id_set.find_duplicates();
    if duplicates.is_empty() {
        return Ok(0);
    }
    println!();
    println!("Duplicate ids:");
    for duplicate in &duplicates {
        println!("  {:<28} {}", duplicate.section, duplicate.id);
    }
    Ok(u8::from(args.fail_duplicates))
}
