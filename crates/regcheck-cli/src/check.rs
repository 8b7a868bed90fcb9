//! # Check Subcommand
//!
//! Loads the registry and its schema, runs the selected checks, prints the
//! report and turns it into an exit code.
//!
//! A failing check never stops the others; every selected check runs and
//! reports before the exit code is decided.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};

use regcheck_rules::{CheckId, Inputs, Report, IGNORED_COMPANIES};

use crate::config::{Overrides, RunConfig, Settings};

/// Report format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// One line per check, violations indented below failures.
    #[default]
    Text,
    /// The full report as pretty-printed JSON.
    Json,
}

/// Arguments for the `regcheck check` subcommand.
#[derive(Args, Debug, Default)]
pub struct CheckArgs {
    /// Registry document to validate [default: etc/default_data.json].
    #[arg(long, value_name = "PATH")]
    pub data: Option<PathBuf>,

    /// JSON Schema for the registry [default: etc/schema.json].
    #[arg(long, value_name = "PATH")]
    pub schema: Option<PathBuf>,

    /// Run only this check. Repeatable.
    #[arg(long = "check", value_name = "NAME")]
    pub checks: Vec<CheckId>,

    /// Leave this check out. Repeatable.
    #[arg(long = "skip", value_name = "NAME")]
    pub skip: Vec<CheckId>,

    /// Report format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Execute the check subcommand, writing the report to `out`.
///
/// Returns exit code: 0 when every selected check passed, 1 otherwise.
///
/// # Errors
///
/// Returns an error if the config file or the registry cannot be read, or
/// if no check is left to run.
pub fn run_check(
    args: &CheckArgs,
    config_path: Option<&Path>,
    repo_root: &Path,
    out: &mut impl Write,
) -> Result<u8> {
    let config = match config_path {
        Some(path) => RunConfig::from_file(&crate::resolve_path(path, repo_root))
            .context("failed to load configuration")?,
        None => RunConfig::default(),
    };
    let overrides = Overrides {
        data: args.data.clone(),
        schema: args.schema.clone(),
        checks: args.checks.clone(),
        skip: args.skip.clone(),
    };
    let settings = Settings::resolve(config, overrides, repo_root)?;

    tracing::info!(
        data = %settings.data.display(),
        schema = %settings.schema.display(),
        checks = settings.selection.len(),
        "running checks"
    );

    let inputs = Inputs::load(&settings.data, &settings.schema)
        .with_context(|| format!("failed to load registry {}", settings.data.display()))?;
    let report = regcheck_rules::run(&inputs, &settings.selection, IGNORED_COMPANIES);

    match args.format {
        OutputFormat::Text => write_text(&report, out)?,
        OutputFormat::Json => write_json(&report, out)?,
    }

    Ok(if report.passed { 0 } else { 1 })
}

/// Print one line per check and indent each violation under its check.
pub fn write_text(report: &Report, out: &mut impl Write) -> Result<()> {
    for outcome in &report.checks {
        if outcome.passed {
            writeln!(out, "PASS {}", outcome.check)?;
            continue;
        }
        let n = outcome.violations.len();
        writeln!(
            out,
            "FAIL {} ({n} violation{})",
            outcome.check,
            if n == 1 { "" } else { "s" }
        )?;
        for violation in &outcome.violations {
            let text = violation.to_string();
            let mut lines = text.lines();
            if let Some(first) = lines.next() {
                writeln!(out, "  - {first}")?;
            }
            for line in lines {
                writeln!(out, "    {line}")?;
            }
        }
    }

    let passed = report.checks.len() - report.failed_count();
    writeln!(out, "\nChecks: {passed}/{} passed", report.checks.len())?;
    Ok(())
}

/// Print the report as pretty JSON.
pub fn write_json(report: &Report, out: &mut impl Write) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, report).context("failed to serialize report")?;
    writeln!(out)?;
    Ok(())
}

/// Print the name and description of every check.
pub fn list_checks(out: &mut impl Write) -> Result<()> {
    for check in CheckId::ALL {
        writeln!(out, "{:<22} {}", check.name(), check.description())?;
    }
    Ok(())
}
