//! # Loading
//!
//! Reads input files and parses them into generic JSON values. The file
//! handle lives only for the duration of [`read_text`].

use std::path::Path;

use serde_json::Value;

use crate::error::{LoadError, ParseError};

/// Read a file as UTF-8 text.
///
/// # Errors
///
/// Returns [`LoadError::Io`] if the file cannot be read and
/// [`LoadError::Utf8`] if its bytes are not valid UTF-8.
pub fn read_text(path: &Path) -> Result<String, LoadError> {
    let bytes = std::fs::read(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let text = String::from_utf8(bytes).map_err(|source| LoadError::Utf8 {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), bytes = text.len(), "read input file");
    Ok(text)
}

/// Parse text into a generic JSON value.
///
/// Repeated keys keep their last value, as most JSON readers do; the
/// duplicate-key check uses [`JsonTree`](crate::tree::JsonTree) instead to
/// see every occurrence.
///
/// # Errors
///
/// Returns [`ParseError`] if the text is not a single valid JSON value.
pub fn parse_value(raw: &str) -> Result<Value, ParseError> {
    Ok(serde_json::from_str(raw)?)
}
