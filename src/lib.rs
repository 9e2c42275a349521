//! fin_tracker Library
//!
//! Re-exports modules for integration testing and external use.

pub mod api;
pub mod auth;
pub mod domain;
pub mod handlers;

// Private modules (used only by main.rs binary)
pub mod config;
pub mod db;
mod error;

pub use api::AppState;
pub use config::Config;
pub use domain::{Category, EntryKind, Transaction, User, DEFAULT_CATEGORIES};
pub use error::{AppError, AppResult};
