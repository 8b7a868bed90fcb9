//! # regcheck-rules — Registry Integrity Checks
//!
//! The rule battery applied to the contributor registry. Each check is a
//! pure function from its input (raw text, generic JSON value, or typed
//! [`Company`](regcheck_core::Company) and [`User`](regcheck_core::User)
//! records) to a list of [`Violation`](regcheck_core::Violation)s; an empty
//! list is a pass.
//!
//! ## Checks
//!
//! | check                  | module             | input                          |
//! |------------------------|--------------------|--------------------------------|
//! | `duplicate-keys`       | [`duplicate_keys`] | raw text                       |
//! | `schema`               | [`schema`]         | JSON value + schema            |
//! | `companies-order`      | [`ordering`]       | companies                      |
//! | `users-order`          | [`ordering`]       | users                          |
//! | `unique-identities`    | [`identity`]       | users                          |
//! | `whitespace`           | [`whitespace`]     | raw text                       |
//! | `known-companies`      | [`companies`]      | companies + users + exemptions |
//! | `one-current-employer` | [`employment`]     | users                          |
//!
//! [`battery::run`] applies a selection of checks to loaded [`Inputs`] and
//! returns a [`Report`].
//!
//! ## Crate Policy
//!
//! - Checks share no mutable state and may run in any order.
//! - The exemption list is a parameter, never read from a global inside a
//!   check.

pub mod battery;
pub mod companies;
pub mod duplicate_keys;
pub mod employment;
pub mod exemptions;
pub mod identity;
pub mod ordering;
pub mod schema;
pub mod whitespace;

pub use battery::{run, run_check, CheckId, CheckOutcome, Inputs, Report, UnknownCheck};
pub use exemptions::IGNORED_COMPANIES;
