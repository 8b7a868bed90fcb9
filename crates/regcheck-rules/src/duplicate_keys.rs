//! # Duplicate Keys
//!
//! Most JSON readers keep the last value of a repeated key and drop the
//! rest without a word. This check reads the raw text into a
//! [`JsonTree`] and reports every repetition.

use regcheck_core::{JsonTree, Violation};

/// Report every key repeated within one object of `raw`.
///
/// Malformed text produces a single [`Violation::Parse`].
pub fn check(raw: &str) -> Vec<Violation> {
    match JsonTree::parse(raw) {
        Ok(tree) => tree
            .duplicate_keys()
            .into_iter()
            .map(|d| Violation::DuplicateKey {
                pointer: d.pointer,
                key: d.key,
                value: d.value,
            })
            .collect(),
        Err(e) => vec![e.into()],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn clean_document_passes() {
        assert!(check(r#"{"companies": [], "users": [{"emails": []}]}"#).is_empty());
    }

    #[test]
    fn duplicate_in_user_record_reported() {
        let raw = r#"{
    "users": [
        {"launchpad_id": "a", "emails": ["a@x.org"], "emails": ["b@x.org"]}
    ]
}"#;
        let violations = check(raw);
        assert_eq!(
            violations,
            [Violation::DuplicateKey {
                pointer: "/users/0".into(),
                key: "emails".into(),
                value: json!(["b@x.org"]),
            }]
        );
        assert!(violations[0].to_string().contains("duplicate key: emails"));
    }

    #[test]
    fn every_duplicate_reported() {
        let raw = r#"{"a": 1, "a": 2, "b": {"c": 1, "c": 1}}"#;
        assert_eq!(check(raw).len(), 2);
    }

    #[test]
    fn malformed_text_is_parse_violation() {
        let violations = check("{\"users\": [}");
        assert_eq!(violations.len(), 1);
        assert!(matches!(violations[0], Violation::Parse { line: 1, .. }));
    }
}
