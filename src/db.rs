//! Database module
//!
//! Database connection and schema verification utilities.

use sqlx::PgPool;

/// Verify database connectivity
/// Note: Schema is managed via raw SQL files in the migrations/ directory
pub async fn verify_connection(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1")
        .execute(pool)
        .await?;

    Ok(())
}

/// Check if required tables exist
pub async fn check_schema(pool: &PgPool) -> Result<bool, sqlx::Error> {
    let required_tables = vec!["users", "categories", "transactions"];

    for table in required_tables {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM information_schema.tables
                WHERE table_schema = 'public' AND table_name = $1
            )
            "#,
        )
        .bind(table)
        .fetch_one(pool)
        .await?;

        if !exists {
            tracing::error!("Required table '{}' does not exist", table);
            return Ok(false);
        }
    }

    // The entry_kind enum backs the kind columns
    let kind_exists: bool = sqlx::query_scalar(
        "SELECT EXISTS (SELECT 1 FROM pg_type WHERE typname = 'entry_kind')",
    )
    .fetch_one(pool)
    .await?;

    if !kind_exists {
        tracing::error!("Required type 'entry_kind' does not exist");
        return Ok(false);
    }

    Ok(true)
}
