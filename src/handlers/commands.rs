//! Command definitions
//!
//! Commands represent intentions to change or prove identity state.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Command to register a new user
#[derive(Debug, Clone)]
pub struct RegisterCommand {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl RegisterCommand {
    pub fn new(name: String, email: String, password: String) -> Self {
        Self {
            name,
            email,
            password,
        }
    }
}

/// Command to authenticate an existing user
#[derive(Debug, Clone)]
pub struct LoginCommand {
    pub email: String,
    pub password: String,
}

impl LoginCommand {
    pub fn new(email: String, password: String) -> Self {
        Self { email, password }
    }
}

/// Public profile of a successfully registered or authenticated user
#[derive(Debug, Clone)]
pub struct AuthResult {
    pub user_id: Uuid,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}
