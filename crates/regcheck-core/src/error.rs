//! # Error Types
//!
//! Errors raised while loading inputs. All errors use `thiserror` for
//! derive-based `Display` and `Error` implementations.
//!
//! - [`LoadError`] is operational: the file could not be read at all. The
//!   run cannot proceed and the binary exits with status 2.
//! - [`ParseError`] is a finding: the text was read but is not valid JSON
//!   (or not a registry document). It fails only the checks that need the
//!   parsed form.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure to read an input file from disk.
#[derive(Error, Debug)]
pub enum LoadError {
    /// The file could not be opened or read.
    #[error("cannot read '{path}': {source}")]
    Io {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid UTF-8.
    #[error("'{path}' is not valid UTF-8: {source}")]
    Utf8 {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying decoding error.
        #[source]
        source: std::string::FromUtf8Error,
    },
}

/// Malformed JSON, or JSON that does not map onto the registry model.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[error("{message}")]
pub struct ParseError {
    /// Parser diagnostic, including position when known.
    pub message: String,
    /// 1-based line of the error, 0 when the position is unknown.
    pub line: usize,
    /// 1-based column of the error, 0 when the position is unknown.
    pub column: usize,
}

impl From<serde_json::Error> for ParseError {
    fn from(err: serde_json::Error) -> Self {
        Self {
            message: err.to_string(),
            line: err.line(),
            column: err.column(),
        }
    }
}
