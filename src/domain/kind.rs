//! Entry kind
//!
//! Every category and transaction is either income or expense. A
//! transaction's kind is not checked against its category's kind; the two
//! are independent fields, as in the original system.

use serde::{Deserialize, Serialize};

/// Direction of a monetary entry.
///
/// Stored in PostgreSQL as the `entry_kind` enum and serialized on the wire
/// as lowercase (`"income"` / `"expense"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "entry_kind", rename_all = "lowercase")]
pub enum EntryKind {
    Income,
    Expense,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&EntryKind::Income).unwrap(), r#""income""#);
        assert_eq!(serde_json::to_string(&EntryKind::Expense).unwrap(), r#""expense""#);
    }

    #[test]
    fn test_deserializes_lowercase_only() {
        let kind: EntryKind = serde_json::from_str(r#""expense""#).unwrap();
        assert_eq!(kind, EntryKind::Expense);

        // Only the two lowercase values are valid on the wire
        assert!(serde_json::from_str::<EntryKind>(r#""Income""#).is_err());
        assert!(serde_json::from_str::<EntryKind>(r#""transfer""#).is_err());
    }
}
