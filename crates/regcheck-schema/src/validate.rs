//! # Schema Validation
//!
//! Runtime validation of the registry document against its JSON Schema.
//! The draft is taken from the schema's `$schema` keyword.
//!
//! ## Schema Resolution
//!
//! References to other schema files are resolved from the directory that
//! holds the root schema, looked up by file name. Nothing is fetched over
//! the network; an unresolvable reference fails validator construction.

use std::fmt;
use std::path::{Path, PathBuf};

use jsonschema::{Retrieve, Uri, Validator};
use serde_json::Value;
use thiserror::Error;

use regcheck_core::LoadError;

/// Retriever that maps `$ref` URIs to files next to the root schema.
struct LocalSchemaRetriever {
    base_dir: Option<PathBuf>,
}

impl Retrieve for LocalSchemaRetriever {
    fn retrieve(
        &self,
        uri: &Uri<&str>,
    ) -> Result<Value, Box<dyn std::error::Error + Send + Sync>> {
        let uri_str = uri.as_str();
        let Some(base_dir) = &self.base_dir else {
            return Err(format!("no local schema directory to resolve '{uri_str}'").into());
        };

        let filename = uri_str.rsplit('/').next().unwrap_or(uri_str);
        let path = base_dir.join(filename);
        if !path.is_file() {
            return Err(format!("'{uri_str}' does not name a schema in {}", base_dir.display()).into());
        }

        let content = std::fs::read_to_string(&path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

/// Error during schema validation.
#[derive(Error, Debug)]
pub enum SchemaValidationError {
    /// The schema file could not be parsed.
    #[error("schema load error for '{schema_name}': {reason}")]
    SchemaLoadError {
        /// Schema filename or identifier.
        schema_name: String,
        /// Reason the schema could not be loaded.
        reason: String,
    },

    /// The compiled validator could not be built (e.g., invalid schema).
    #[error("validator build error for schema '{schema_name}': {reason}")]
    ValidatorBuildError {
        /// Schema filename or identifier.
        schema_name: String,
        /// Reason the validator could not be built.
        reason: String,
    },

    /// The schema file could not be read.
    #[error(transparent)]
    Load(#[from] LoadError),
}

/// A single validation violation with structured context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaViolation {
    /// JSON Pointer path to the violating field in the instance.
    pub instance_path: String,
    /// JSON Pointer path within the schema that triggered the error.
    pub schema_path: String,
    /// Human-readable description of the violation.
    pub message: String,
}

impl fmt::Display for SchemaViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.instance_path.is_empty() {
            write!(f, "  (root): {}", self.message)
        } else {
            write!(f, "  {}: {}", self.instance_path, self.message)
        }
    }
}

/// A compiled registry schema backed by the `jsonschema` crate.
///
/// The schema is compiled once at construction; validation afterwards only
/// reads it, so one `SchemaValidator` can be shared across threads.
pub struct SchemaValidator {
    schema_name: String,
    compiled: Validator,
}

impl fmt::Debug for SchemaValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchemaValidator")
            .field("schema_name", &self.schema_name)
            .finish_non_exhaustive()
    }
}

impl SchemaValidator {
    /// Load and compile the schema stored at `path`.
    ///
    /// Sibling files in the same directory are available to `$ref`.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaValidationError::Load`] if the file cannot be read,
    /// [`SchemaValidationError::SchemaLoadError`] if it is not JSON, and
    /// [`SchemaValidationError::ValidatorBuildError`] if it is not a valid
    /// schema.
    pub fn from_file(path: &Path) -> Result<Self, SchemaValidationError> {
        let schema_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("schema")
            .to_string();
        let content = regcheck_core::read_text(path)?;
        let schema: Value = serde_json::from_str(&content).map_err(|e| {
            SchemaValidationError::SchemaLoadError {
                schema_name: schema_name.clone(),
                reason: format!("invalid JSON: {e}"),
            }
        })?;
        let base_dir = path.parent().map(Path::to_path_buf);
        Self::compile(schema_name, schema, base_dir)
    }

    /// Compile an in-memory schema. References to other files cannot be
    /// resolved.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaValidationError::ValidatorBuildError`] if the value is
    /// not a valid schema.
    pub fn from_value(
        schema_name: impl Into<String>,
        schema: Value,
    ) -> Result<Self, SchemaValidationError> {
        Self::compile(schema_name.into(), schema, None)
    }

    fn compile(
        schema_name: String,
        schema: Value,
        base_dir: Option<PathBuf>,
    ) -> Result<Self, SchemaValidationError> {
        let mut opts = jsonschema::options();
        opts.with_retriever(LocalSchemaRetriever { base_dir });

        let compiled = opts.build(&schema).map_err(|e| {
            SchemaValidationError::ValidatorBuildError {
                schema_name: schema_name.clone(),
                reason: e.to_string(),
            }
        })?;

        tracing::debug!(schema = %schema_name, "compiled schema");
        Ok(Self {
            schema_name,
            compiled,
        })
    }

    /// Name of the schema (its file name when loaded from disk).
    pub fn schema_name(&self) -> &str {
        &self.schema_name
    }

    /// Every violation of `instance` against the schema, in the order the
    /// engine reports them.
    pub fn violations(&self, instance: &Value) -> Vec<SchemaViolation> {
        self.compiled
            .iter_errors(instance)
            .map(|e| SchemaViolation {
                instance_path: e.instance_path.to_string(),
                schema_path: e.schema_path.to_string(),
                message: e.to_string(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn registry_schema() -> Value {
        json!({
            "$schema": "http://json-schema.org/draft-04/schema#",
            "type": "object",
            "required": ["companies", "users"],
            "properties": {
                "companies": {"type": "array"},
                "users": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "required": ["emails"],
                        "properties": {
                            "emails": {"type": "array", "items": {"type": "string"}}
                        }
                    }
                }
            },
            "additionalProperties": false
        })
    }

    #[test]
    fn test_validate_valid_document() {
        let validator = SchemaValidator::from_value("registry", registry_schema()).unwrap();
        let doc = json!({"companies": [], "users": [{"emails": ["a@b.org"]}]});
        assert!(validator.violations(&doc).is_empty());
    }

    #[test]
    fn test_validate_missing_required_field() {
        let validator = SchemaValidator::from_value("registry", registry_schema()).unwrap();
        let violations = validator.violations(&json!({"users": []}));
        assert_eq!(violations.len(), 1, "{violations:?}");
        assert_eq!(violations[0].instance_path, "");
        assert_eq!(violations[0].schema_path, "/required");
        assert!(violations[0].message.contains("companies"));
    }

    #[test]
    fn test_all_violations_reported() {
        let validator = SchemaValidator::from_value("registry", registry_schema()).unwrap();
        let doc = json!({
            "companies": [],
            "users": [{"emails": "not-a-list"}, {}],
            "extra": true
        });
        let violations = validator.violations(&doc);
        assert_eq!(violations.len(), 3, "{violations:?}");
        let paths: Vec<&str> = violations.iter().map(|v| v.instance_path.as_str()).collect();
        assert!(paths.contains(&"/users/0/emails"));
        assert!(paths.contains(&"/users/1"));
    }

    #[test]
    fn test_invalid_schema_fails_to_build() {
        let err = SchemaValidator::from_value("broken", json!({"type": 12})).unwrap_err();
        assert!(
            matches!(err, SchemaValidationError::ValidatorBuildError { .. }),
            "Expected ValidatorBuildError, got: {err}"
        );
    }

    #[test]
    fn test_sibling_ref_resolution() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("email.json"),
            r#"{"type": "string", "pattern": "@"}"#,
        )
        .unwrap();
        std::fs::write(
            dir.path().join("schema.json"),
            r#"{"type": "array", "items": {"$ref": "email.json"}}"#,
        )
        .unwrap();

        let validator = SchemaValidator::from_file(&dir.path().join("schema.json")).unwrap();
        assert_eq!(validator.schema_name(), "schema.json");
        assert!(validator.violations(&json!(["a@b.org"])).is_empty());
        assert_eq!(validator.violations(&json!(["nope"])).len(), 1);
    }

    #[test]
    fn test_schema_file_not_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schema.json");
        std::fs::write(&path, "{ not json").unwrap();
        let err = SchemaValidator::from_file(&path).unwrap_err();
        assert!(matches!(err, SchemaValidationError::SchemaLoadError { .. }));
    }

    #[test]
    fn test_schema_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        let err = SchemaValidator::from_file(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, SchemaValidationError::Load(_)));
    }

    #[test]
    fn test_violation_display_root() {
        let v = SchemaViolation {
            instance_path: String::new(),
            schema_path: "/required".to_string(),
            message: r#""users" is a required property"#.to_string(),
        };
        assert!(v.to_string().contains("(root)"));
    }
}
