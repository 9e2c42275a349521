//! Identity handlers
//!
//! Registration with default-category seeding, and credential verification.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::auth::password;
use crate::domain::DEFAULT_CATEGORIES;
use crate::error::AppError;

use super::{AuthResult, LoginCommand, RegisterCommand};

/// Handler for user registration
pub struct RegisterHandler {
    pool: PgPool,
}

impl RegisterHandler {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Execute the register command
    ///
    /// The duplicate check, user insert, and default-category seeding all
    /// run in one transaction: a failed seed must not leave a half-created
    /// identity behind.
    pub async fn execute(&self, command: RegisterCommand) -> Result<AuthResult, AppError> {
        let mut tx = self.pool.begin().await?;

        // Check if the email is already registered
        let existing: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM users WHERE email = $1")
            .bind(&command.email)
            .fetch_optional(&mut *tx)
            .await?;

        if existing.is_some() {
            return Err(AppError::DuplicateEmail);
        }

        let password_hash = password::hash(&command.password)?;

        // A concurrent registration can slip past the pre-check; the unique
        // constraint on email is the backstop, reported the same way.
        let inserted: Result<(Uuid, DateTime<Utc>), sqlx::Error> = sqlx::query_as(
            r#"
            INSERT INTO users (name, email, password_hash)
            VALUES ($1, $2, $3)
            RETURNING id, created_at
            "#,
        )
        .bind(&command.name)
        .bind(&command.email)
        .bind(&password_hash)
        .fetch_one(&mut *tx)
        .await;

        let (user_id, created_at) = match inserted {
            Ok(row) => row,
            Err(sqlx::Error::Database(e)) if e.code().as_deref() == Some("23505") => {
                return Err(AppError::DuplicateEmail);
            }
            Err(e) => return Err(e.into()),
        };

        // Seed the default category set for the new identity
        for (name, kind) in DEFAULT_CATEGORIES {
            sqlx::query("INSERT INTO categories (user_id, name, kind) VALUES ($1, $2, $3)")
                .bind(user_id)
                .bind(*name)
                .bind(*kind)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        tracing::info!(user_id = %user_id, "Registered new user");

        Ok(AuthResult {
            user_id,
            name: command.name,
            email: command.email,
            created_at,
        })
    }
}

/// Handler for user login
pub struct LoginHandler {
    pool: PgPool,
}

impl LoginHandler {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Execute the login command
    ///
    /// Unknown email and failed hash comparison surface the same error, so
    /// callers cannot probe which emails are registered.
    pub async fn execute(&self, command: LoginCommand) -> Result<AuthResult, AppError> {
        let row: Option<(Uuid, String, String, DateTime<Utc>)> = sqlx::query_as(
            "SELECT id, name, password_hash, created_at FROM users WHERE email = $1",
        )
        .bind(&command.email)
        .fetch_optional(&self.pool)
        .await?;

        let (user_id, name, password_hash, created_at) =
            row.ok_or(AppError::InvalidCredentials)?;

        if !password::verify(&password_hash, &command.password) {
            return Err(AppError::InvalidCredentials);
        }

        Ok(AuthResult {
            user_id,
            name,
            email: command.email,
            created_at,
        })
    }
}
