//! # regcheck-cli — Registry Check Command-Line Interface
//!
//! Runs the registry check battery from the command line and reports the
//! outcome through the exit code.
//!
//! ## Subcommands
//!
//! - `check` — Run the selected checks against a registry document
//! - `list` — Print every check with a one-line description
//!
//! ## Exit codes
//!
//! | code | meaning                                          |
//! |------|--------------------------------------------------|
//! | 0    | every selected check passed                      |
//! | 1    | at least one check reported a violation          |
//! | 2    | the registry or config file could not be loaded  |
//!
//! ## Crate Policy
//!
//! - Argument parsing lives in `main.rs`; handlers take parsed arguments.
//! - No rule logic here. Checks live in `regcheck-rules`.

use std::path::{Path, PathBuf};

pub mod check;
pub mod config;

/// Resolve a path relative to the repository root.
///
/// Absolute paths are returned as-is. A relative path is joined to
/// `repo_root` when the result exists, otherwise left relative to the
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
