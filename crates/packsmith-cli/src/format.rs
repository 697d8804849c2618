//! # Format Subcommand
//!
//! Formats one file, or every content file under a directory, and
//! validates the result unless `--no-validate` is given.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use packsmith_format::{format_manager, ManagerOptions};

use crate::{print_report, resolve_path, resolve_schema_dir};

/// Arguments for the format subcommand.
#[derive(Args, Debug)]
pub struct FormatArgs {
    /// Content file or directory to format.
    #[arg(short, long)]
    pub input: PathBuf,

    /// Write the result here instead of over the input (single files only).
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Minimum platform version to stamp on formatted files.
    #[arg(long)]
    pub from_version: Option<String>,

    /// Skip validation after formatting.
    #[arg(long)]
    pub no_validate: bool,

    /// Directory with `<type>.schema.json` files.
    #[arg(long)]
    pub schema_dir: Option<PathBuf>,
}

/// Execute the format subcommand. Returns 1 if any file failed.
pub fn run_format(args: &FormatArgs, repo_root: &Path) -> Result<u8> {
    let input = resolve_path(&args.input, repo_root);
    let options = ManagerOptions {
        output: args.output.clone(),
        schema_dir: resolve_schema_dir(args.schema_dir.as_deref(), repo_root),
        from_version: args.from_version.clone(),
        no_validate: args.no_validate,
    };

    let report = format_manager(&input, &options)
        .with_context(|| format!("failed to format {}", input.display()))?;
    print_report(&report);
    Ok(report.exit_code())
}
