//! # regcheck-core — Foundational Types for regcheck
//!
//! Defines the types every other regcheck crate builds on: the registry data
//! model, an order-preserving JSON tree, violation records, and the loader
//! that turns a file on disk into text and parsed values.
//!
//! ## Key Design Principles
//!
//! 1. **Two views of one document.** Raw-text concerns (duplicate keys,
//!    whitespace) see the text or the [`JsonTree`], which keeps every
//!    object member in source order. Semantic checks see typed
//!    [`Company`] and [`User`] records, converted once at load time by
//!    [`records`], one section at a time.
//!
//! 2. **Violations are data.** A check returns `Vec<Violation>`; an empty
//!    vector is a pass. Nothing in this crate panics on bad input.
//!
//! 3. **Lenient typed conversion.** Missing names and collections default to
//!    empty so a malformed record is reported by schema conformance instead
//!    of blinding every semantic check.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `regcheck-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod error;
pub mod load;
pub mod model;
pub mod tree;
pub mod violation;

// Re-export primary types for ergonomic imports.
pub use error::{LoadError, ParseError};
pub use load::{parse_value, read_text};
pub use model::{records, Affiliation, Company, User};
pub use tree::{DuplicateKey, JsonTree};
pub use violation::{IdentityField, OrderedSequence, Violation, WhitespaceIssue};
