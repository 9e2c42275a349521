//! Record models
//!
//! Row types for the three collections. These map directly to database rows
//! and double as response bodies, so the serde attributes define the wire
//! format: camelCase keys, the kind discriminator named `type`.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use super::EntryKind;

/// Identity record. Owns zero or more categories and transactions.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    /// Argon2 PHC string. Never serialized.
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// User-defined label of kind income/expense applied to transactions.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: EntryKind,
    pub created_at: DateTime<Utc>,
}

/// A single dated monetary event tied to one category and one owning user.
///
/// `category_id` may dangle: categories delete independently and creation
/// does not verify the reference.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: Uuid,
    pub user_id: Uuid,
    pub category_id: Uuid,
    pub title: String,
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub kind: EntryKind,
    pub date: DateTime<Utc>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}
