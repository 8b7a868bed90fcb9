//! # regcheck-schema — Schema Conformance
//!
//! Compiles the registry's JSON Schema once and validates documents against
//! it, returning every violation the engine finds with its instance path.
//!
//! The schema engine is a black box: this crate only adapts its
//! diagnostics into [`SchemaViolation`] records.
//!
//! ## Crate Policy
//!
//! - Depends only on `regcheck-core` internally.
//! - No network access: `$ref` resolves against files next to the schema.

pub mod validate;

pub use validate::{SchemaValidationError, SchemaValidator, SchemaViolation};
