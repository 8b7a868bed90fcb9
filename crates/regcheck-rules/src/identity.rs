//! # Unique User Identities
//!
//! A launchpad id, a gerrit id and an email each identify exactly one user.
//! Keys are registered in one map in user order:
//!
//! | field          | key                 |
//! |----------------|---------------------|
//! | `launchpad_id` | the id              |
//! | `gerrit_id`    | `gerrit:` + the id  |
//! | each email     | the email           |
//!
//! Launchpad ids and emails share a namespace, so an email equal to another
//! user's launchpad id is a collision. Gerrit ids are prefixed and only
//! collide with each other.

use std::collections::HashMap;

use regcheck_core::{IdentityField, User, Violation};

/// Prefix separating gerrit ids from the shared key namespace.
pub const GERRIT_KEY_PREFIX: &str = "gerrit:";

/// Report every identity key claimed by more than one user.
///
/// A key stays with the first user that registered it; each later claim is
/// reported against that user.
pub fn check(users: &[User]) -> Vec<Violation> {
    let mut owners: HashMap<String, usize> = HashMap::new();
    let mut violations = Vec::new();

    for (index, user) in users.iter().enumerate() {
        for (field, value, key) in identity_keys(user) {
            match owners.get(&key) {
                Some(&owner) => violations.push(Violation::Uniqueness {
                    field,
                    value: value.to_string(),
                    original: Violation::record(&users[owner]),
                    duplicate: Violation::record(user),
                }),
                None => {
                    owners.insert(key, index);
                }
            }
        }
    }

    tracing::debug!(keys = owners.len(), "registered identity keys");
    violations
}

/// Identity keys of one user in registration order.
fn identity_keys(user: &User) -> Vec<(IdentityField, &str, String)> {
    let mut keys = Vec::with_capacity(user.emails.len() + 2);
    if let Some(id) = user.launchpad_id() {
        keys.push((IdentityField::LaunchpadId, id, id.to_string()));
    }
    if let Some(id) = user.gerrit_id() {
        keys.push((IdentityField::GerritId, id, format!("{GERRIT_KEY_PREFIX}{id}")));
    }
    for email in &user.emails {
        keys.push((IdentityField::Email, email.as_str(), email.clone()));
    }
    keys
}
