//! # packsmith CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use packsmith_cli::format::{run_format, FormatArgs};
use packsmith_cli::id_set::{run_create_id_set, IdSetArgs};
use packsmith_cli::validate::{run_validate, ValidateArgs};

/// Content pack toolkit.
///
/// Formats integrations, scripts, playbooks, and JSON configuration objects
/// to platform conventions, validates them against their schemas, and
/// builds the repository ID set.
#[derive(Parser, Debug)]
#[command(name = "packsmith", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Format content files, then validate the result.
    Format(FormatArgs),

    /// Validate content files without modifying them.
    Validate(ValidateArgs),

    /// Build the ID set of every content item in a repository.
    CreateIdSet(IdSetArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let repo_root = packsmith_cli::find_repo_root(&cwd).unwrap_or_else(|| {
        tracing::info!("no schemas/ directory above the current directory; using it as the root");
        cwd.clone()
    });
    tracing::debug!(repo_root = %repo_root.display(), "resolved repository root");

    let result = match cli.command {
        Commands::Format(args) => run_format(&args, &repo_root),
        Commands::Validate(args) => run_validate(&args, &repo_root),
        Commands::CreateIdSet(args) => run_create_id_set(&args, &repo_root),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
