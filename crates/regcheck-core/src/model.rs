//! # Registry Data Model
//!
//! Typed records for the company/contributor registry. Fields the checks do
//! not read are kept in `extra` so a record prints back in full inside
//! diagnostics.
//!
//! ## Identity fields
//!
//! The registry treats an empty string the same as a missing value for
//! `launchpad_id`, `github_id`, `gerrit_id` and `end_date`. The accessor
//! methods apply that rule; the raw `Option<String>` fields do not.

use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ParseError;

/// Convert the top-level array `key` of `document` into typed records.
///
/// The two registry sections convert independently, so a malformed user
/// leaves the companies usable and the other way round. A missing section
/// is empty; schema conformance reports it.
///
/// # Errors
///
/// Returns [`ParseError`] when the section is not an array or a record has
/// a field of the wrong JSON type, for example a user whose `emails` is a
/// string.
pub fn records<T: DeserializeOwned>(document: &Value, key: &str) -> Result<Vec<T>, ParseError> {
    let Some(section) = document.get(key) else {
        return Ok(Vec::new());
    };
    Vec::<T>::deserialize(section).map_err(|e| {
        let mut err = ParseError::from(e);
        err.message = format!("{key}: {}", err.message);
        err
    })
}

/// An organization entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Company {
    /// Canonical name. Missing names are left to schema conformance.
    #[serde(default)]
    pub company_name: String,
    /// Alternative names users may reference.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,
    /// Mail domains; the first one is the sort key.
    #[serde(default)]
    pub domains: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Company {
    /// The first listed domain, if any.
    pub fn first_domain(&self) -> Option<&str> {
        self.domains.first().map(String::as_str)
    }

    /// Ordering key of the companies list. A company without domains sorts
    /// under the empty string.
    pub fn sort_key(&self) -> &str {
        self.first_domain().unwrap_or("")
    }

    /// The canonical name followed by every alias.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.company_name.as_str()).chain(self.aliases.iter().map(String::as_str))
    }
}

/// An individual contributor entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Launchpad login; primary ordering key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub launchpad_id: Option<String>,
    /// GitHub login; ordering key when there is no launchpad id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github_id: Option<String>,
    /// Gerrit account name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gerrit_id: Option<String>,
    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    /// Mail addresses; each identifies this user alone.
    #[serde(default)]
    pub emails: Vec<String>,
    /// Employment history.
    #[serde(default)]
    pub companies: Vec<Affiliation>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl User {
    /// Launchpad id, treating an empty string as absent.
    pub fn launchpad_id(&self) -> Option<&str> {
        non_empty(&self.launchpad_id)
    }

    /// GitHub id, treating an empty string as absent.
    pub fn github_id(&self) -> Option<&str> {
        non_empty(&self.github_id)
    }

    /// Gerrit id, treating an empty string as absent.
    pub fn gerrit_id(&self) -> Option<&str> {
        non_empty(&self.gerrit_id)
    }

    /// Ordering key of the users list: launchpad id, else GitHub id, else
    /// the empty string.
    pub fn sort_key(&self) -> &str {
        self.launchpad_id().or_else(|| self.github_id()).unwrap_or("")
    }

    /// Affiliations with no end date.
    pub fn open_affiliations(&self) -> impl Iterator<Item = &Affiliation> {
        self.companies.iter().filter(|a| a.is_open())
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_compact(f, self)
    }
}

impl fmt::Display for Company {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_compact(f, self)
    }
}

/// One period of a user's employment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Affiliation {
    /// Canonical name or alias of the employer.
    #[serde(default)]
    pub company_name: String,
    /// End of the period; `None` or empty means current employment.
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Affiliation {
    /// Whether this affiliation is open-ended (current).
    pub fn is_open(&self) -> bool {
        non_empty(&self.end_date).is_none()
    }
}

fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.is_empty())
}

fn write_compact<T: Serialize>(f: &mut fmt::Formatter<'_>, item: &T) -> fmt::Result {
    let rendered = serde_json::to_string(item).map_err(|_| fmt::Error)?;
    f.write_str(&rendered)
}
