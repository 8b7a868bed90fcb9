//! At most one current employer per user.

use std::collections::BTreeSet;

use regcheck_core::{User, Violation};

/// Report every user with more than one distinct open-ended affiliation.
///
/// The same company listed twice as current counts once.
pub fn check(users: &[User]) -> Vec<Violation> {
    users
        .iter()
        .filter_map(|user| {
            let current: BTreeSet<String> = user
                .open_affiliations()
                .map(|a| a.company_name.clone())
                .collect();
            (current.len() > 1).then(|| Violation::MultipleCurrentEmployers {
                companies: current,
                user: Violation::record(user),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use regcheck_core::Affiliation;

    fn affiliation(name: &str, end_date: Option<&str>) -> Affiliation {
        Affiliation {
            company_name: name.to_string(),
            end_date: end_date.map(String::from),
            ..Affiliation::default()
        }
    }

    fn user(companies: Vec<Affiliation>) -> User {
        User {
            launchpad_id: Some("u".into()),
            companies,
            ..User::default()
        }
    }

    #[test]
    fn two_open_affiliations_reported_with_set() {
        let users = [user(vec![affiliation("Acme", None), affiliation("Beta", None)])];
        let violations = check(&users);
        assert_eq!(violations.len(), 1);
        let Violation::MultipleCurrentEmployers { companies, .. } = &violations[0] else {
            panic!("Expected MultipleCurrentEmployers, got: {}", violations[0]);
        };
        let names: Vec<&str> = companies.iter().map(String::as_str).collect();
        assert_eq!(names, ["Acme", "Beta"]);
    }

    #[test]
    fn closed_affiliations_do_not_count() {
        let users = [user(vec![
            affiliation("Acme", Some("2012-Jan-01")),
            affiliation("Beta", Some("2014-Jan-01")),
            affiliation("Gamma", None),
        ])];
        assert!(check(&users).is_empty());
    }

    #[test]
    fn repeated_open_company_counts_once() {
        let users = [user(vec![affiliation("Acme", None), affiliation("Acme", None)])];
        assert!(check(&users).is_empty());
    }

    #[test]
    fn empty_end_date_is_open() {
        let users = [user(vec![affiliation("Acme", Some("")), affiliation("Beta", None)])];
        assert_eq!(check(&users).len(), 1);
    }

    #[test]
    fn no_affiliations_passes() {
        assert!(check(&[user(Vec::new())]).is_empty());
    }
}
