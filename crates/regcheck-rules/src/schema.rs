//! Schema conformance as a check.

use regcheck_core::Violation;
use regcheck_schema::SchemaValidator;
use serde_json::Value;

/// Report every schema violation of `document`.
pub fn check(document: &Value, validator: &SchemaValidator) -> Vec<Violation> {
    validator
        .violations(document)
        .into_iter()
        .map(|v| {
            tracing::debug!(
                schema = validator.schema_name(),
                schema_path = %v.schema_path,
                "{v}"
            );
            Violation::Schema {
                instance_path: v.instance_path,
                message: v.message,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn conforming_document_passes() {
        let validator =
            SchemaValidator::from_value("t", json!({"type": "object", "required": ["users"]}))
                .unwrap();
        assert!(check(&json!({"users": []}), &validator).is_empty());
    }

    #[test]
    fn violation_keeps_instance_path() {
        let validator = SchemaValidator::from_value(
            "t",
            json!({"properties": {"users": {"type": "array"}}}),
        )
        .unwrap();
        let violations = check(&json!({"users": {}}), &validator);
        assert_eq!(violations.len(), 1);
        assert!(
            matches!(&violations[0], Violation::Schema { instance_path, .. } if instance_path == "/users")
        );
    }
}
