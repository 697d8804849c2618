//! # Validate Subcommand

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use packsmith_format::validate_manager;

use crate::{print_report, resolve_path, resolve_schema_dir};

/// Arguments for the validate subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Content file or directory to validate.
    #[arg(short, long)]
    pub input: PathBuf,

    /// Directory with `<type>.schema.json` files.
    #[arg(long)]
    pub schema_dir: Option<PathBuf>,
}

/// Execute the validate subcommand. Returns 1 if any file is invalid.
pub fn run_validate(args: &ValidateArgs, repo_root: &Path) -> Result<u8> {
    let input = resolve_path(&args.input, repo_root);
    let schema_dir = resolve_schema_dir(args.schema_dir.as_deref(), repo_root);

    let report = validate_manager(&input, schema_dir.as_deref())
        .with_context(|| format!("failed to validate {}", input.display()))?;
    print_report(&report);
    Ok(report.exit_code())
}
