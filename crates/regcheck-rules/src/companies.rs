//! # Known Companies
//!
//! Every affiliation must point at a registered company, by canonical name
//! or alias. Names on the exemption list are accepted without an entry.

use std::collections::HashSet;

use regcheck_core::{Company, User, Violation};

/// Report every affiliation naming a company that is neither registered
/// nor exempt.
pub fn check(companies: &[Company], users: &[User], exemptions: &[&str]) -> Vec<Violation> {
    let known: HashSet<&str> = companies.iter().flat_map(|c| c.names()).collect();
    let exempt: HashSet<&str> = exemptions.iter().copied().collect();

    let mut violations = Vec::new();
    for user in users {
        for affiliation in &user.companies {
            let name = affiliation.company_name.as_str();
            if !known.contains(name) && !exempt.contains(name) {
                violations.push(Violation::UnknownCompany {
                    company_name: name.to_string(),
                    user: Violation::record(user),
                });
            }
        }
    }
    violations
}
