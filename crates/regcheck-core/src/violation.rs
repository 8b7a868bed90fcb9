//! # Violations
//!
//! A violation is one concrete finding produced by a check. Records that
//! take part in a finding (companies, users) are carried as JSON values so
//! both the text report and `--format json` can show them unchanged.

use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;
use serde_json::Value;

use crate::error::ParseError;

/// Which registry sequence an ordering finding refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderedSequence {
    Companies,
    Users,
}

impl fmt::Display for OrderedSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Companies => f.write_str("List of companies should be ordered by the first domain"),
            Self::Users => f.write_str(
                "List of users should be ordered by launchpad id or github id",
            ),
        }
    }
}

/// The user field an identity key came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentityField {
    LaunchpadId,
    GerritId,
    Email,
}

impl fmt::Display for IdentityField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::LaunchpadId => "launchpad_id",
            Self::GerritId => "gerrit_id",
            Self::Email => "email",
        })
    }
}

/// Kind of whitespace problem on a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WhitespaceIssue {
    Tab,
    TrailingSpaces,
}

impl fmt::Display for WhitespaceIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Tab => "tab character",
            Self::TrailingSpaces => "trailing spaces",
        })
    }
}

/// A single finding reported by a check.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Violation {
    /// Input is not valid JSON or does not fit the registry model.
    Parse {
        message: String,
        line: usize,
        column: usize,
    },

    /// A key repeats within one object.
    DuplicateKey {
        /// JSON Pointer of the enclosing object.
        pointer: String,
        key: String,
        /// Value of the repeated occurrence.
        value: Value,
    },

    /// The document does not conform to the schema.
    Schema {
        /// JSON Pointer of the offending instance.
        instance_path: String,
        message: String,
    },

    /// The schema itself could not be loaded or compiled.
    SchemaLoad { message: String },

    /// Two adjacent elements are out of order.
    Ordering {
        sequence: OrderedSequence,
        /// Index of the first element of the pair.
        index: usize,
        first: Value,
        second: Value,
    },

    /// An identity key is claimed by a second user.
    Uniqueness {
        field: IdentityField,
        value: String,
        /// The user that registered the key first.
        original: Value,
        duplicate: Value,
    },

    /// An affiliation names a company that is neither listed nor exempt.
    UnknownCompany { company_name: String, user: Value },

    /// A user has more than one open-ended affiliation.
    MultipleCurrentEmployers {
        companies: BTreeSet<String>,
        user: Value,
    },

    /// A line holds a tab or trailing whitespace.
    Whitespace {
        /// 1-based line number.
        line: usize,
        content: String,
        issue: WhitespaceIssue,
    },
}

impl Violation {
    /// Serialize a registry record for inclusion in a violation.
    pub fn record(item: &impl Serialize) -> Value {
        serde_json::to_value(item).unwrap_or_default()
    }
}

impl From<ParseError> for Violation {
    fn from(err: ParseError) -> Self {
        Self::Parse {
            message: err.message,
            line: err.line,
            column: err.column,
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse { message, .. } => write!(f, "invalid document: {message}"),
            Self::DuplicateKey {
                pointer,
                key,
                value,
            } => {
                let at = if pointer.is_empty() { "(root)" } else { pointer };
                write!(f, "duplicate key: {key} (value: {value}) in object {at}")
            }
            Self::Schema {
                instance_path,
                message,
            } => {
                if instance_path.is_empty() {
                    write!(f, "(root): {message}")
                } else {
                    write!(f, "{instance_path}: {message}")
                }
            }
            Self::SchemaLoad { message } => write!(f, "schema unavailable: {message}"),
            Self::Ordering {
                sequence,
                index,
                first,
                second,
            } => write!(
                f,
                "{sequence}\nOrder fails at index {index}, elements:\n{first}:\n{second}"
            ),
            Self::Uniqueness {
                field,
                value,
                original,
                duplicate,
            } => write!(
                f,
                "Duplicate {field} {value}, collision between:\n{original}\nand\n{duplicate}"
            ),
            Self::UnknownCompany { company_name, user } => write!(
                f,
                "Company \"{company_name}\" is unknown. Please add it into the list of \
                 companies in default_data.json file (referenced by {user})"
            ),
            Self::MultipleCurrentEmployers { companies, user } => {
                let names: Vec<&str> = companies.iter().map(String::as_str).collect();
                write!(
                    f,
                    "More than 1 company is specified as current: {}. Please keep only one \
                     (user {user})",
                    names.join(", ")
                )
            }
            Self::Whitespace {
                line,
                content,
                issue,
            } => write!(f, "Whitespace issue in \"{content}\", line {line}: {issue}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serializes_with_kind_tag() {
        let v = Violation::Whitespace {
            line: 3,
            content: "\t{".into(),
            issue: WhitespaceIssue::Tab,
        };
        let value = serde_json::to_value(&v).unwrap();
        assert_eq!(value["kind"], "whitespace");
        assert_eq!(value["issue"], "tab");
        assert_eq!(value["line"], 3);
    }

    #[test]
    fn ordering_message_names_index_and_elements() {
        let v = Violation::Ordering {
            sequence: OrderedSequence::Companies,
            index: 0,
            first: json!({"domains": ["b.com"]}),
            second: json!({"domains": ["a.com"]}),
        };
        let text = v.to_string();
        assert!(text.starts_with("List of companies should be ordered by the first domain"));
        assert!(text.contains("index 0"));
        assert!(text.contains("b.com") && text.contains("a.com"));
    }

    #[test]
    fn multiple_employers_lists_sorted_names() {
        let v = Violation::MultipleCurrentEmployers {
            companies: ["Beta".to_string(), "Acme".to_string()].into_iter().collect(),
            user: json!({"launchpad_id": "u"}),
        };
        assert!(v.to_string().contains("current: Acme, Beta."));
    }

    #[test]
    fn duplicate_key_at_root_is_labelled() {
        let v = Violation::DuplicateKey {
            pointer: String::new(),
            key: "users".into(),
            value: json!([]),
        };
        assert_eq!(v.to_string(), "duplicate key: users (value: []) in object (root)");
    }

    #[test]
    fn parse_error_converts_with_position() {
        let err = ParseError {
            message: "expected value at line 4 column 2".into(),
            line: 4,
            column: 2,
        };
        assert!(matches!(Violation::from(err), Violation::Parse { line: 4, column: 2, .. }));
    }
}
