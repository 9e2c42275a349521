//! Domain module
//!
//! Core domain types: entry kinds, record models, and the default
//! category set seeded at registration.

pub mod kind;
pub mod models;

pub use kind::EntryKind;
pub use models::{Category, Transaction, User};

/// Categories created for every new user at registration time.
pub const DEFAULT_CATEGORIES: &[(&str, EntryKind)] = &[
    ("Salary", EntryKind::Income),
    ("Freelancing", EntryKind::Income),
    ("Food", EntryKind::Expense),
    ("Rent", EntryKind::Expense),
    ("Shopping", EntryKind::Expense),
    ("Utilities", EntryKind::Expense),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_categories_split() {
        assert_eq!(DEFAULT_CATEGORIES.len(), 6);

        let income: Vec<&str> = DEFAULT_CATEGORIES
            .iter()
            .filter(|(_, kind)| *kind == EntryKind::Income)
            .map(|(name, _)| *name)
            .collect();
        assert_eq!(income, vec!["Salary", "Freelancing"]);

        let expense_count = DEFAULT_CATEGORIES
            .iter()
            .filter(|(_, kind)| *kind == EntryKind::Expense)
            .count();
        assert_eq!(expense_count, 4);
    }
}
