//! # Ordering
//!
//! Both registry lists are kept sorted so diffs stay small and entries are
//! easy to find. Keys compare as plain strings (code point order); equal
//! keys are in order.

use std::cmp::Ordering;

use serde::Serialize;

use regcheck_core::{Company, OrderedSequence, User, Violation};

/// Report the first adjacent pair of `items` whose keys are descending.
pub fn verify_ordering<T, F>(items: &[T], key: F, sequence: OrderedSequence) -> Option<Violation>
where
    T: Serialize,
    F: Fn(&T) -> &str,
{
    items
        .windows(2)
        .position(|pair| key(&pair[0]).cmp(key(&pair[1])) == Ordering::Greater)
        .map(|index| Violation::Ordering {
            sequence,
            index,
            first: Violation::record(&items[index]),
            second: Violation::record(&items[index + 1]),
        })
}

/// Companies must ascend by first domain.
pub fn check_companies(companies: &[Company]) -> Vec<Violation> {
    verify_ordering(companies, Company::sort_key, OrderedSequence::Companies)
        .into_iter()
        .collect()
}

/// Users must ascend by launchpad id, else GitHub id, else the empty string.
pub fn check_users(users: &[User]) -> Vec<Violation> {
    verify_ordering(users, User::sort_key, OrderedSequence::Users)
        .into_iter()
        .collect()
}
