//! # regcheck CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use regcheck_cli::check::{list_checks, run_check, CheckArgs};
use regcheck_cli::config::DEFAULT_DATA_PATH;

/// Integrity checks for the contributor/company registry.
///
/// Validates the registry document against its schema and a battery of
/// ordering, uniqueness, affiliation and formatting rules.
#[derive(Parser, Debug)]
#[command(name = "regcheck", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to a YAML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the check battery against a registry document.
    Check(CheckArgs),

    /// List every check with a short description.
    List,
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
        .with_writer(std::io::stderr)
        .init();

    let repo_root = resolve_repo_root().unwrap_or_else(|| {
        tracing::debug!("no registry found above current directory; using it as root");
        std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
    });

    tracing::debug!(repo_root = %repo_root.display(), "resolved repository root");

    let mut stdout = std::io::stdout().lock();
    let result = match cli.command {
        Commands::Check(args) => run_check(&args, cli.config.as_deref(), &repo_root, &mut stdout),
        Commands::List => list_checks(&mut stdout).map(|()| 0),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(2)
        }
    }
}

/// Walk up from the current directory to the first directory holding the
/// default registry.
fn resolve_repo_root() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    let mut dir = cwd.as_path();
    loop {
        if dir.join(DEFAULT_DATA_PATH).is_file() {
            return Some(dir.to_path_buf());
        }
        dir = dir.parent()?;
    }
}
