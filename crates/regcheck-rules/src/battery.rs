//! # Check Battery
//!
//! Runs a selection of checks over one set of loaded inputs and collects an
//! outcome per check.
//!
//! ## Failure isolation
//!
//! Inputs are parsed once, up front, and every parse result is kept. The
//! `companies` and `users` sections convert separately. A check whose input
//! failed to parse fails with that error as its only violation; checks that
//! read the raw text or the other section still run. No check's failure
//! stops another.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use regcheck_core::{
    parse_value, read_text, records, Company, LoadError, ParseError, User, Violation,
};
use regcheck_schema::{SchemaValidationError, SchemaValidator};

use crate::{companies, duplicate_keys, employment, identity, ordering, schema, whitespace};

/// Identifier of one check in the battery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CheckId {
    DuplicateKeys,
    Schema,
    CompaniesOrder,
    UsersOrder,
    UniqueIdentities,
    Whitespace,
    KnownCompanies,
    OneCurrentEmployer,
}

impl CheckId {
    /// Every check, in reporting order.
    pub const ALL: [CheckId; 8] = [
        Self::DuplicateKeys,
        Self::Schema,
        Self::CompaniesOrder,
        Self::UsersOrder,
        Self::UniqueIdentities,
        Self::Whitespace,
        Self::KnownCompanies,
        Self::OneCurrentEmployer,
    ];

    /// Stable command-line name.
    pub fn name(self) -> &'static str {
        match self {
            Self::DuplicateKeys => "duplicate-keys",
            Self::Schema => "schema",
            Self::CompaniesOrder => "companies-order",
            Self::UsersOrder => "users-order",
            Self::UniqueIdentities => "unique-identities",
            Self::Whitespace => "whitespace",
            Self::KnownCompanies => "known-companies",
            Self::OneCurrentEmployer => "one-current-employer",
        }
    }

    /// One-line summary of what the check enforces.
    pub fn description(self) -> &'static str {
        match self {
            Self::DuplicateKeys => "no object repeats a key",
            Self::Schema => "document conforms to the schema",
            Self::CompaniesOrder => "companies ascend by first domain",
            Self::UsersOrder => "users ascend by launchpad id, else github id",
            Self::UniqueIdentities => "launchpad ids, gerrit ids and emails belong to one user",
            Self::Whitespace => "no tabs and no trailing whitespace",
            Self::KnownCompanies => "affiliations name registered or exempt companies",
            Self::OneCurrentEmployer => "at most one open-ended affiliation per user",
        }
    }
}

impl fmt::Display for CheckId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A check name that matches no [`CheckId`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown check '{0}'")]
pub struct UnknownCheck(pub String);

impl FromStr for CheckId {
    type Err = UnknownCheck;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.name() == s)
            .ok_or_else(|| UnknownCheck(s.to_string()))
    }
}

/// Everything the checks read, loaded once per run.
#[derive(Debug)]
pub struct Inputs {
    raw: String,
    value: Result<Value, ParseError>,
    companies: Result<Vec<Company>, ParseError>,
    users: Result<Vec<User>, ParseError>,
    schema: Result<SchemaValidator, String>,
}

impl Inputs {
    /// Parse `raw` into its generic form and each section into typed records.
    ///
    /// A schema that failed to load is kept as its message and fails only the
    /// schema check.
    pub fn new(raw: String, schema: Result<SchemaValidator, SchemaValidationError>) -> Self {
        let value = parse_value(&raw);
        let companies = section(&value, "companies");
        let users = section(&value, "users");
        let schema = schema.map_err(|e| {
            tracing::warn!(error = %e, "schema could not be loaded");
            e.to_string()
        });
        Self {
            raw,
            value,
            companies,
            users,
            schema,
        }
    }

    /// Read the document and schema from disk.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError`] if the document cannot be read. Schema problems
    /// are not errors here; they fail the schema check.
    pub fn load(data_path: &Path, schema_path: &Path) -> Result<Self, LoadError> {
        let raw = read_text(data_path)?;
        let schema = SchemaValidator::from_file(schema_path);
        Ok(Self::new(raw, schema))
    }

    fn with_companies(&self, f: impl FnOnce(&[Company]) -> Vec<Violation>) -> Vec<Violation> {
        match &self.companies {
            Ok(companies) => f(companies),
            Err(e) => vec![e.clone().into()],
        }
    }

    fn with_users(&self, f: impl FnOnce(&[User]) -> Vec<Violation>) -> Vec<Violation> {
        match &self.users {
            Ok(users) => f(users),
            Err(e) => vec![e.clone().into()],
        }
    }
}

/// Convert one section, carrying a parse failure of the whole text through.
fn section<T: DeserializeOwned>(
    value: &Result<Value, ParseError>,
    key: &str,
) -> Result<Vec<T>, ParseError> {
    let converted = value.as_ref().map_err(Clone::clone).and_then(|v| records(v, key));
    if let (Ok(_), Err(e)) = (value, &converted) {
        tracing::warn!(section = key, error = %e, "section could not be converted");
    }
    converted
}

/// Result of one check.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckOutcome {
    pub check: CheckId,
    pub passed: bool,
    pub violations: Vec<Violation>,
}

impl CheckOutcome {
    pub fn new(check: CheckId, violations: Vec<Violation>) -> Self {
        Self {
            check,
            passed: violations.is_empty(),
            violations,
        }
    }
}

/// Outcomes of a battery run, in [`CheckId::ALL`] order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub passed: bool,
    pub checks: Vec<CheckOutcome>,
}

impl Report {
    pub fn new(checks: Vec<CheckOutcome>) -> Self {
        Self {
            passed: checks.iter().all(|c| c.passed),
            checks,
        }
    }

    /// Number of checks that reported at least one violation.
    pub fn failed_count(&self) -> usize {
        self.checks.iter().filter(|c| !c.passed).count()
    }

    /// Outcome of a specific check, if it was run.
    pub fn outcome(&self, check: CheckId) -> Option<&CheckOutcome> {
        self.checks.iter().find(|c| c.check == check)
    }
}

/// Run one check.
pub fn run_check(inputs: &Inputs, check: CheckId, exemptions: &[&str]) -> Vec<Violation> {
    match check {
        CheckId::DuplicateKeys => duplicate_keys::check(&inputs.raw),
        CheckId::Schema => match (&inputs.value, &inputs.schema) {
            (Err(e), _) => vec![e.clone().into()],
            (Ok(_), Err(message)) => vec![Violation::SchemaLoad {
                message: message.clone(),
            }],
            (Ok(value), Ok(validator)) => schema::check(value, validator),
        },
        CheckId::CompaniesOrder => inputs.with_companies(ordering::check_companies),
        CheckId::UsersOrder => inputs.with_users(ordering::check_users),
        CheckId::UniqueIdentities => inputs.with_users(identity::check),
        CheckId::Whitespace => whitespace::check(&inputs.raw),
        CheckId::KnownCompanies => inputs.with_companies(|registered| {
            inputs.with_users(|users| companies::check(registered, users, exemptions))
        }),
        CheckId::OneCurrentEmployer => inputs.with_users(employment::check),
    }
}

/// Run every check in `selection`, reporting in [`CheckId::ALL`] order.
///
/// Checks listed more than once run once.
pub fn run(inputs: &Inputs, selection: &[CheckId], exemptions: &[&str]) -> Report {
    let outcomes = CheckId::ALL
        .into_iter()
        .filter(|check| selection.contains(check))
        .map(|check| {
            let span = tracing::info_span!("check", check = %check);
            let _guard = span.enter();
            let violations = run_check(inputs, check, exemptions);
            if violations.is_empty() {
                tracing::info!("passed");
            } else {
                tracing::info!(violations = violations.len(), "failed");
            }
            CheckOutcome::new(check, violations)
        })
        .collect();
    Report::new(outcomes)
}
