//! # Run Configuration
//!
//! Settings are layered: built-in defaults, then an optional YAML file
//! (`--config`), then command-line flags.
//!
//! ```yaml
//! data: etc/default_data.json
//! schema: etc/schema.json
//! checks: [schema, whitespace]
//! skip: [users-order]
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use regcheck_core::LoadError;
use regcheck_rules::CheckId;

/// Default registry location, relative to the repository root.
pub const DEFAULT_DATA_PATH: &str = "etc/default_data.json";

/// Default schema location, relative to the repository root.
pub const DEFAULT_SCHEMA_PATH: &str = "etc/schema.json";

/// Error reading the configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error(transparent)]
    Read(#[from] LoadError),

    #[error("invalid config '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("no checks left to run after applying the check and skip lists")]
    EmptySelection,
}

/// Contents of a configuration file. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunConfig {
    pub data: Option<PathBuf>,
    pub schema: Option<PathBuf>,
    /// Checks to run; empty means all.
    #[serde(default)]
    pub checks: Vec<CheckId>,
    /// Checks to leave out.
    #[serde(default)]
    pub skip: Vec<CheckId>,
}

impl RunConfig {
    /// Read a YAML configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or does not match
    /// the expected shape (including unknown check names).
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = regcheck_core::read_text(path)?;
        Self::from_yaml(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content)
    }
}

/// Command-line overrides applied on top of a [`RunConfig`].
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub data: Option<PathBuf>,
    pub schema: Option<PathBuf>,
    pub checks: Vec<CheckId>,
    pub skip: Vec<CheckId>,
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub data: PathBuf,
    pub schema: PathBuf,
    /// Checks to run, in reporting order.
    pub selection: Vec<CheckId>,
}

impl Settings {
    /// Merge defaults, config file and overrides. Relative paths resolve
    /// against `repo_root` when the file exists there.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptySelection`] when the skip lists remove
    /// every selected check.
    pub fn resolve(
        config: RunConfig,
        overrides: Overrides,
        repo_root: &Path,
    ) -> Result<Self, ConfigError> {
        let data = overrides
            .data
            .or(config.data)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_PATH));
        let schema = overrides
            .schema
            .or(config.schema)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SCHEMA_PATH));

        let wanted = if !overrides.checks.is_empty() {
            overrides.checks
        } else if !config.checks.is_empty() {
            config.checks
        } else {
            CheckId::ALL.to_vec()
        };
        let selection: Vec<CheckId> = CheckId::ALL
            .into_iter()
            .filter(|c| wanted.contains(c))
            .filter(|c| !config.skip.contains(c) && !overrides.skip.contains(c))
            .collect();
        if selection.is_empty() {
            return Err(ConfigError::EmptySelection);
        }

        Ok(Self {
            data: crate::resolve_path(&data, repo_root),
            schema: crate::resolve_path(&schema, repo_root),
            selection,
        })
    }
}
